//! Expression evaluation and numerical calculus engine for an interactive calculator.
//!
//! This crate implements the core of a dashboard calculator: safe evaluation of
//! user-entered mathematical expressions over a closed grammar, deterministic
//! result formatting, a numerical calculus engine (central-difference derivative,
//! composite Simpson integration, two-sided limit approximation), a bounded
//! calculation history, and the calculator state machine driven by button and key
//! events.
//!
//! # Features
//!
//! - Allow-set gated, parser-based evaluation — free text never reaches anything
//!   executable
//! - Standard operator precedence, parentheses, `^`, named functions, `pi`/`e`
//! - Numerical derivative, definite integral, and limit of a function given as text
//! - 50-entry calculation history with a serde persistence format
//! - Explicit owned calculator state, no global singleton
//!
//! # Example
//!
//! ```rust
//! use calcore::{evaluate, format_result, Function1d};
//!
//! let value = evaluate("2 + 3 × 4").unwrap();
//! assert_eq!(format_result(value), "14");
//!
//! let f = Function1d::new("x^2", "x").unwrap();
//! let slope = f.derivative_at(2.0).unwrap();
//! assert!((slope - 4.0).abs() < 1e-5);
//! ```

pub use calculator::{Calculator, Constant, Mode};
pub use calculus::Function1d;
pub use evaluator::{evaluate, format_result};
pub use history::{History, HistoryEntry};

pub mod prelude {
    pub use crate::calculator::{
        calculate_derivative, calculate_integral, calculate_limit, evaluate_function, Calculator,
        Constant, Mode,
    };
    pub use crate::calculus::{parse_interval, Function1d};
    pub use crate::evaluator::{evaluate, format_result};
    pub use crate::history::{History, HistoryEntry};
}

/// Calculator state machine and calculus report operations
pub mod calculator;
/// Numerical calculus over functions supplied as text
pub mod calculus;
/// Error types for the various failure modes
pub mod errors;
/// Canonicalization, allow-set gate, evaluation, and result formatting
pub mod evaluator;
/// Expression tree representation and evaluation
pub mod expr;
/// Recursive-descent parser over the closed grammar
pub mod parser;
/// Tokenizer for expression text
pub mod token;
/// Bounded calculation history with persistence format
pub mod history;
