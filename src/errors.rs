//! Error types for the calcore crate.
//!
//! This module defines the various error types that can occur during expression
//! tokenization, parsing, evaluation, and the numerical calculus routines. The main
//! error types are:
//!
//! - `ParseError`: Errors while tokenizing or parsing an expression string
//! - `EvalError`: Errors while evaluating a canonicalized expression
//! - `CalculusError`: Errors while applying a numerical method to a function of one
//!   variable
//!
//! None of these escape the calculator-level API (`Calculator::calculate` and the
//! calculus report operations); at that boundary every failure is converted into a
//! display string.

use thiserror::Error;

/// Errors that can occur while tokenizing or parsing an expression string.
///
/// The parser operates over a closed grammar (numbers, `+ - * / ^`, parentheses,
/// a fixed set of named functions, two named constants), so any token outside that
/// vocabulary is a hard parse failure rather than something to sanitize away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character the tokenizer does not recognize
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// A numeric literal that could not be converted to a float
    #[error("malformed number literal '{0}'")]
    MalformedNumber(String),
    /// An identifier that is neither a known function nor a known constant
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    /// A token that does not fit the grammar at its position
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    /// The expression ended where the grammar required more input
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// A named function called with the wrong number of arguments
    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Errors that can occur while evaluating an expression string.
///
/// `DisallowedCharacters` is the security gate: free-form user text is rejected
/// outright when it contains anything outside the closed character vocabulary,
/// before the parser ever sees it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The expression contains characters outside the allowed set
    #[error("expression contains disallowed characters")]
    DisallowedCharacters,
    /// The expression failed to parse against the closed grammar
    #[error("failed to parse expression: {0}")]
    Parse(#[from] ParseError),
    /// The expression evaluated to NaN or infinity
    #[error("expression did not produce a finite number")]
    NonFinite,
}

/// Errors that can occur in the numerical calculus routines.
///
/// Each routine samples the supplied function text at one or more points; a failure
/// carries the sample point so the calculator layer can render a message specific
/// to the operation that was running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculusError {
    /// The function text was empty
    #[error("function text is empty")]
    EmptyFunction,
    /// The variable name could not be compiled into a substitution pattern
    #[error("invalid variable name '{0}'")]
    InvalidVariable(String),
    /// Substituting and evaluating the function at a sample point failed
    #[error("failed to evaluate f({point}): {source}")]
    PointEvaluation {
        point: f64,
        #[source]
        source: EvalError,
    },
}
