//! Numerical calculus over functions supplied as text.
//!
//! This module provides the `Function1d` type: a single-variable real function
//! given as expression text (e.g. `"x^2 + 1"`) together with its variable name.
//! Construction compiles a whole-word substitution pattern once; every sample
//! replaces the variable with a parenthesized decimal value and delegates to the
//! expression evaluator.
//!
//! Three numerical methods are built on top of point sampling:
//!
//! - `derivative_at`: central difference with a fixed step of `1e-7`. There is no
//!   adaptive step sizing; accuracy is bounded by the fixed step and by
//!   floating-point cancellation near flat regions.
//! - `integrate`: composite Simpson's rule with a fixed 1000 subintervals (even,
//!   as Simpson's rule requires).
//! - `limit_at`: two-sided numerical approach over steps `10^-1 .. 10^-10`. When
//!   both sides agree within `1e-10` the average is returned; otherwise the
//!   right-side value is returned as a best-effort estimate. Disagreement is not
//!   reported as non-existence.
//!
//! # Example
//! ```
//! # use calcore::calculus::Function1d;
//! let f = Function1d::new("x^2", "x").unwrap();
//! let slope = f.derivative_at(2.0).unwrap();
//! assert!((slope - 4.0).abs() < 1e-5);
//! ```

use itertools::Itertools;
use regex::{NoExpand, Regex};
use tracing::debug;

use crate::errors::CalculusError;
use crate::evaluator::evaluate;

/// Variable name used when the caller supplies none.
pub const DEFAULT_VARIABLE: &str = "x";

/// Fixed step for the central-difference derivative.
const DERIVATIVE_STEP: f64 = 1e-7;
/// Number of Simpson subintervals. Must stay even.
const SIMPSON_INTERVALS: usize = 1000;
/// Agreement threshold between the two sides of a limit.
const LIMIT_EPSILON: f64 = 1e-10;
/// Number of shrinking steps taken toward the limit point from each side.
const LIMIT_DEPTH: i32 = 10;

/// Default integration bounds when the interval text is absent or malformed.
const DEFAULT_LOWER_BOUND: f64 = 0.0;
const DEFAULT_UPPER_BOUND: f64 = 1.0;

/// A single-variable real function defined by expression text.
///
/// Holds the function body, the variable name, and the precompiled whole-word
/// substitution pattern. Instances are cheap, transient values created per
/// calculus operation; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Function1d {
    body: String,
    variable: String,
    substitution: Regex,
}

impl Function1d {
    /// Creates a function from body text and a variable name.
    ///
    /// A blank variable name falls back to [`DEFAULT_VARIABLE`]. The variable is
    /// matched as a whole word only, so a variable named `i` never touches the
    /// `i` inside `sin`.
    ///
    /// # Arguments
    /// * `body` - The function body, e.g. `"x^2 + 1"`
    /// * `variable` - The variable name, e.g. `"x"`
    ///
    /// # Returns
    /// * `Result<Self, CalculusError>` - The function, or why it was rejected
    pub fn new(
        body: impl Into<String>,
        variable: impl Into<String>,
    ) -> Result<Self, CalculusError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(CalculusError::EmptyFunction);
        }

        let variable = variable.into();
        let variable = if variable.trim().is_empty() {
            DEFAULT_VARIABLE.to_string()
        } else {
            variable
        };

        let pattern = format!(r"\b{}\b", regex::escape(&variable));
        let substitution =
            Regex::new(&pattern).map_err(|_| CalculusError::InvalidVariable(variable.clone()))?;

        Ok(Self {
            body,
            variable,
            substitution,
        })
    }

    /// The function body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Evaluates the function at a point.
    ///
    /// Every whole-word occurrence of the variable is replaced with the value,
    /// rendered as a parenthesized plain decimal string so negative points keep
    /// their sign grouped through `^` and `*`.
    pub fn eval_at(&self, x: f64) -> Result<f64, CalculusError> {
        let value = format!("({x})");
        let substituted = self.substitution.replace_all(&self.body, NoExpand(&value));
        evaluate(&substituted)
            .map_err(|source| CalculusError::PointEvaluation { point: x, source })
    }

    /// Approximates the derivative at a point via central difference.
    ///
    /// Uses the fixed step `h = 1e-7`: `(f(p+h) - f(p-h)) / (2h)`.
    pub fn derivative_at(&self, point: f64) -> Result<f64, CalculusError> {
        let h = DERIVATIVE_STEP;
        let result = (self.eval_at(point + h)? - self.eval_at(point - h)?) / (2.0 * h);
        debug!(body = %self.body, point, result, "central-difference derivative");
        Ok(result)
    }

    /// Approximates the definite integral over `[a, b]` via composite Simpson's
    /// rule with 1000 subintervals.
    ///
    /// Endpoint samples weigh 1, odd-indexed interior samples 4, even-indexed
    /// interior samples 2; the weighted sum is scaled by `h/3`.
    pub fn integrate(&self, a: f64, b: f64) -> Result<f64, CalculusError> {
        let n = SIMPSON_INTERVALS;
        let h = (b - a) / n as f64;
        let mut sum = 0.0;

        for i in 0..=n {
            let x = a + i as f64 * h;
            let weight = if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            sum += weight * self.eval_at(x)?;
        }

        let result = h / 3.0 * sum;
        debug!(body = %self.body, a, b, result, "Simpson integral");
        Ok(result)
    }

    /// Approximates the limit as the variable approaches a point, from both sides.
    ///
    /// Samples `f(point ± 10^-i)` for `i = 1..=10` and compares the final
    /// (smallest-step) sample from each side. Agreement within `1e-10` returns
    /// their average; disagreement returns the right-side value as a best-effort
    /// estimate rather than signaling non-existence.
    pub fn limit_at(&self, point: f64) -> Result<f64, CalculusError> {
        let mut left = 0.0;
        let mut right = 0.0;

        for i in 1..=LIMIT_DEPTH {
            let h = 10f64.powi(-i);
            left = self.eval_at(point - h)?;
            right = self.eval_at(point + h)?;
        }

        let result = if (left - right).abs() < LIMIT_EPSILON {
            (left + right) / 2.0
        } else {
            right
        };
        debug!(body = %self.body, point, left, right, result, "two-sided limit");
        Ok(result)
    }
}

/// Parses an interval from text of the form `"[a,b]"` (brackets optional).
///
/// Each bound falls back to its default (`a = 0`, `b = 1`) when absent or
/// unparseable; so does the whole interval when there is no comma at all.
pub fn parse_interval(text: &str) -> (f64, f64) {
    let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');
    match trimmed.split(',').collect_tuple() {
        Some((a, b)) => (
            a.trim().parse().unwrap_or(DEFAULT_LOWER_BOUND),
            b.trim().parse().unwrap_or(DEFAULT_UPPER_BOUND),
        ),
        None => (DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND),
    }
}
