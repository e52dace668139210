//! Expression tree representation and evaluation.
//!
//! This module defines the core expression type used to represent parsed
//! mathematical expressions. The tree is variable-free: variable substitution
//! happens textually before parsing, so every leaf is a constant. The main type is:
//!
//! - `Expr`: An enum representing different kinds of mathematical expressions
//!
//! The expression tree is built recursively using `Box<Expr>` for nested
//! expressions and can be:
//! - Evaluated to a 64-bit floating point number
//! - Formatted back into standard mathematical notation
//!
//! Supported operations:
//! - Basic arithmetic (+, -, *, /)
//! - Exponentiation (`^`, right-associative, expression exponents)
//! - Negation
//! - Unary functions: sin, cos, tan (radians), log (base 10), ln, sqrt, abs
//!
//! Evaluation never fails on its own: domain violations (division by zero,
//! logarithm of a negative number) follow IEEE 754 and produce NaN or infinity,
//! which the evaluator maps to an error after the fact.

/// An expression tree node representing mathematical operations.
///
/// The tree is built recursively using `Box<Expr>` for nested expressions. Every
/// leaf is a `Const`; named constants (`pi`, `e`) are resolved to their values by
/// the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant floating point value
    Const(f64),
    /// Addition of two expressions
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction of two expressions
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication of two expressions
    Mul(Box<Expr>, Box<Expr>),
    /// Division of two expressions
    Div(Box<Expr>, Box<Expr>),
    /// Exponentiation of an expression by another expression
    Pow(Box<Expr>, Box<Expr>),
    /// Negation of an expression
    Neg(Box<Expr>),
    /// Absolute value of an expression
    Abs(Box<Expr>),
    /// Square root of an expression
    Sqrt(Box<Expr>),
    /// Natural logarithm of an expression
    Ln(Box<Expr>),
    /// Base-10 logarithm of an expression
    Log10(Box<Expr>),
    /// Sine of an expression (argument in radians)
    Sin(Box<Expr>),
    /// Cosine of an expression (argument in radians)
    Cos(Box<Expr>),
    /// Tangent of an expression (argument in radians)
    Tan(Box<Expr>),
}

impl Expr {
    /// Evaluates the expression tree to a 64-bit floating point number.
    ///
    /// Domain violations are not detected here; they surface as NaN or infinity
    /// in the result, which the evaluator rejects as non-finite.
    pub fn eval(&self) -> f64 {
        match self {
            Expr::Const(value) => *value,
            Expr::Add(left, right) => left.eval() + right.eval(),
            Expr::Sub(left, right) => left.eval() - right.eval(),
            Expr::Mul(left, right) => left.eval() * right.eval(),
            Expr::Div(left, right) => left.eval() / right.eval(),
            Expr::Pow(base, exponent) => base.eval().powf(exponent.eval()),
            Expr::Neg(expr) => -expr.eval(),
            Expr::Abs(expr) => expr.eval().abs(),
            Expr::Sqrt(expr) => expr.eval().sqrt(),
            Expr::Ln(expr) => expr.eval().ln(),
            Expr::Log10(expr) => expr.eval().log10(),
            Expr::Sin(expr) => expr.eval().sin(),
            Expr::Cos(expr) => expr.eval().cos(),
            Expr::Tan(expr) => expr.eval().tan(),
        }
    }
}

/// Implements string formatting for expressions.
///
/// Converts expressions back to standard mathematical notation: binary operations
/// are wrapped in parentheses, functions use call notation, exponents use `^`,
/// negation uses a `-` prefix.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{value}"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Sub(left, right) => write!(f, "({left} - {right})"),
            Expr::Mul(left, right) => write!(f, "({left} * {right})"),
            Expr::Div(left, right) => write!(f, "({left} / {right})"),
            Expr::Pow(base, exponent) => write!(f, "({base}^{exponent})"),
            Expr::Neg(expr) => write!(f, "-({expr})"),
            Expr::Abs(expr) => write!(f, "abs({expr})"),
            Expr::Sqrt(expr) => write!(f, "sqrt({expr})"),
            Expr::Ln(expr) => write!(f, "ln({expr})"),
            Expr::Log10(expr) => write!(f, "log({expr})"),
            Expr::Sin(expr) => write!(f, "sin({expr})"),
            Expr::Cos(expr) => write!(f, "cos({expr})"),
            Expr::Tan(expr) => write!(f, "tan({expr})"),
        }
    }
}
