//! Safe evaluation of calculator expression text.
//!
//! This module is the boundary between free-form user input and the expression
//! grammar. `evaluate` runs three stages in order:
//!
//! 1. Canonicalization: display glyphs (`×`, `÷`, U+2212 minus) are replaced with
//!    their computational equivalents.
//! 2. Allow-set gate: the canonical text must consist solely of digits, operator
//!    and grouping characters, whitespace, and the letters of the supported
//!    function and constant names. Anything else rejects the whole expression.
//!    This is a security gate against arbitrary input, not sanitization: nothing
//!    is stripped or rewritten to make bad input pass.
//! 3. Parsing and evaluation over the closed grammar; a NaN or infinite result is
//!    reported as an error.
//!
//! `format_result` renders results for display with fixed, deterministic rules so
//! the same value always produces the same string.

use tracing::debug;

use crate::errors::EvalError;
use crate::parser::parse;

/// Letters of the supported tokens: `Math`, `sin`, `cos`, `tan`, `log`, `ln`,
/// `sqrt`, `pow`, `abs`, `pi`, `e`, `E`.
const ALLOWED_LETTERS: &str = "MathsincoelgqrpwEb";

/// Beyond this magnitude results are displayed in exponential notation.
const EXPONENTIAL_UPPER: f64 = 1e15;
/// Below this magnitude (but above zero) results are displayed in exponential
/// notation.
const EXPONENTIAL_LOWER: f64 = 1e-6;
/// Whole numbers below this magnitude are displayed as plain integers.
const INTEGER_DISPLAY_LIMIT: f64 = 1e10;

/// Evaluates a calculator expression string to a finite number.
///
/// # Arguments
/// * `input` - The expression text, possibly containing display glyphs
///
/// # Returns
/// * `Result<f64, EvalError>` - The value, or why the text was rejected
///
/// # Example
/// ```
/// # use calcore::evaluator::evaluate;
/// assert_eq!(evaluate("2 + 3 × 4").unwrap(), 14.0);
/// assert!(evaluate("2; drop()").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let canonical = canonicalize(input);
    if !canonical.chars().all(is_allowed) {
        return Err(EvalError::DisallowedCharacters);
    }

    let expr = parse(&canonical)?;
    let value = expr.eval();
    debug!(input, parsed = %expr, value, "evaluated expression");

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Replaces display operator glyphs with their computational equivalents.
fn canonicalize(input: &str) -> String {
    input.replace('×', "*").replace('÷', "/").replace('−', "-")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | ',' | '^')
        || ALLOWED_LETTERS.contains(c)
}

/// Formats a result value for display.
///
/// The rules are fixed and deterministic:
/// - magnitude above `1e15`, or between zero and `1e-6`: exponential notation
///   with 6 fractional digits and an explicit exponent sign (`1.234000e-7`)
/// - whole numbers below `1e10` in magnitude: plain integer string
/// - everything else: rounded to 12 significant digits and rendered as the
///   shortest decimal that round-trips
pub fn format_result(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > EXPONENTIAL_UPPER || (magnitude > 0.0 && magnitude < EXPONENTIAL_LOWER) {
        to_exponential(value)
    } else if value.fract() == 0.0 && magnitude < INTEGER_DISPLAY_LIMIT {
        format!("{}", value as i64)
    } else {
        let rounded: f64 = format!("{value:.11e}").parse().unwrap_or(value);
        rounded.to_string()
    }
}

/// Exponential notation with 6 fractional digits and a signed exponent.
///
/// Rust's `{:e}` omits the `+` on non-negative exponents; the display format
/// keeps it explicit (`1.000000e+16`).
fn to_exponential(value: f64) -> String {
    let formatted = format!("{value:.6e}");
    match formatted.rfind('e') {
        Some(idx) if !formatted[idx + 1..].starts_with('-') => {
            format!("{}e+{}", &formatted[..idx], &formatted[idx + 1..])
        }
        _ => formatted,
    }
}
