//! Calculator state machine and the calculus report operations.
//!
//! [`Calculator`] is an explicit owned value (no global singleton) holding the
//! committed expression prefix, the in-progress operand or final result as display
//! text, the active mode, and the calculation history. Button and key events map
//! onto its methods; `calculate` is the `=` handler.
//!
//! The expression builder keeps at most one pending binary operator: committing an
//! operator overwrites the prefix with `"<operand> <op> "`, so each `=` evaluates
//! a single accumulated string rather than an operator stack.
//!
//! Every failure at this boundary becomes a display string — the `"Error"`
//! sentinel for the basic/scientific paths, an operation-specific message for the
//! calculus reports. Nothing here panics or returns an error to the caller.

use std::fmt;

use colored::Colorize;
use tracing::warn;

use crate::calculus::{parse_interval, Function1d, DEFAULT_VARIABLE};
use crate::evaluator::{evaluate, format_result};
use crate::history::History;

/// Display sentinel for any failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// The calculator's input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
    Calculus,
}

/// Named constants insertable from the scientific keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Calculator state: expression prefix, display operand, mode, and history.
#[derive(Debug, Clone)]
pub struct Calculator {
    expression: String,
    result: String,
    mode: Mode,
    history: History,
}

impl Calculator {
    /// Creates a calculator showing `0` in basic mode with an empty history.
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            result: "0".to_string(),
            mode: Mode::Basic,
            history: History::new(),
        }
    }

    /// The committed expression prefix, e.g. `"3 + "`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The in-progress operand or final result as display text.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Appends a digit (or decimal point) to the operand.
    ///
    /// A fresh `"0"` or the error sentinel is replaced outright.
    pub fn append_number(&mut self, digit: &str) {
        if self.result == "0" || self.result == ERROR_DISPLAY {
            self.result = digit.to_string();
        } else {
            self.result.push_str(digit);
        }
    }

    /// Commits the operand and a binary operator as the new expression prefix.
    ///
    /// Ignored while the error sentinel is displayed. Committing twice in a row
    /// overwrites the prefix, which is what keeps at most one operator pending.
    pub fn append_operator(&mut self, op: &str) {
        if self.result != ERROR_DISPLAY {
            self.expression = format!("{} {} ", self.result, op);
            self.result = "0".to_string();
        }
    }

    /// Wraps the operand in a function call, e.g. `sqrt(` ... `)`.
    pub fn append_function(&mut self, func: &str, suffix: &str) {
        self.result = format!("{}{}{}", func, self.result, suffix);
    }

    /// Replaces the operand with a named constant's decimal text.
    pub fn append_constant(&mut self, constant: Constant) {
        self.result = constant.value().to_string();
    }

    /// Resets both the operand and the expression prefix.
    pub fn clear_all(&mut self) {
        self.result = "0".to_string();
        self.expression.clear();
    }

    /// Resets only the operand; the committed prefix survives.
    pub fn clear_entry(&mut self) {
        self.result = "0".to_string();
    }

    /// Removes the last character of the operand, bottoming out at `"0"`.
    pub fn backspace(&mut self) {
        if self.result.chars().count() > 1 {
            self.result.pop();
        } else {
            self.result = "0".to_string();
        }
    }

    /// Evaluates the accumulated expression. The `=` handler.
    ///
    /// On success the calculation is recorded in history (expression beautified
    /// back to display glyphs), the formatted result becomes the new operand, and
    /// the prefix is cleared. On any failure the operand becomes the `"Error"`
    /// sentinel; no error propagates.
    pub fn calculate(&mut self) {
        let expression = format!("{}{}", self.expression, self.result);
        match evaluate(&expression) {
            Ok(value) => {
                let display_expression = format!(
                    "{}{}",
                    self.expression,
                    self.result.replace('*', "×").replace('/', "÷")
                );
                let formatted = format_result(value);
                self.history.push(display_expression, formatted.clone());
                self.result = formatted;
                self.expression.clear();
            }
            Err(err) => {
                warn!(expression = %expression, error = %err, "evaluation failed");
                self.result = ERROR_DISPLAY.to_string();
            }
        }
    }

    /// Recalls a history entry's result as the current operand.
    pub fn use_history_item(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.result = entry.result.clone();
            self.expression.clear();
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{\n")?;
        writeln!(f, "    {}: {:?}\n", "Mode".cyan(), self.mode)?;
        writeln!(f, "    {}: {}\n", "Expression".cyan(), self.expression)?;
        writeln!(f, "    {}: {}\n", "Result".cyan(), self.result)?;
        writeln!(f, "}}")?;
        Ok(())
    }
}

fn effective_variable(variable: &str) -> &str {
    let trimmed = variable.trim();
    if trimmed.is_empty() {
        DEFAULT_VARIABLE
    } else {
        trimmed
    }
}

/// Renders the derivative report for a function at a point.
///
/// The point text defaults to `0` when absent or unparseable. All failures come
/// back as an operation-specific message, never as an error value.
pub fn calculate_derivative(func: &str, variable: &str, point_text: &str) -> String {
    if func.trim().is_empty() {
        return "Please enter a function".to_string();
    }
    let variable = effective_variable(variable);
    let point: f64 = point_text.trim().parse().unwrap_or(0.0);

    match Function1d::new(func, variable).and_then(|f| f.derivative_at(point)) {
        Ok(result) => format!(
            "Derivative of {func}:\n\nd/d{variable}[{func}] ≈ {result:.8}\n\nAt {variable} = {point}"
        ),
        Err(err) => format!("Error calculating derivative:\n{err}"),
    }
}

/// Renders the definite-integral report for a function over an interval.
///
/// The interval text uses the `"[a,b]"` form (brackets optional); missing or
/// malformed bounds default to `[0,1]`.
pub fn calculate_integral(func: &str, variable: &str, interval_text: &str) -> String {
    if func.trim().is_empty() {
        return "Please enter a function".to_string();
    }
    let variable = effective_variable(variable);
    let (a, b) = parse_interval(interval_text);

    match Function1d::new(func, variable).and_then(|f| f.integrate(a, b)) {
        Ok(result) => format!(
            "Definite integral of {func}:\n\n∫[{a} to {b}] {func} d{variable} ≈ {result:.8}\n\nUsing Simpson's rule with 1000 intervals"
        ),
        Err(err) => format!("Error calculating integral:\n{err}"),
    }
}

/// Renders the two-sided limit report for a function at a point.
pub fn calculate_limit(func: &str, variable: &str, point_text: &str) -> String {
    if func.trim().is_empty() || point_text.trim().is_empty() {
        return "Please enter a function and point".to_string();
    }
    let variable = effective_variable(variable);
    let point_text = point_text.trim();
    let Ok(point) = point_text.parse::<f64>() else {
        return format!("Error calculating limit:\ninvalid point '{point_text}'");
    };

    match Function1d::new(func, variable).and_then(|f| f.limit_at(point)) {
        Ok(result) => format!(
            "Limit of {func}:\n\nlim({variable}→{point_text}) {func} ≈ {result:.8}\n\nUsing numerical approximation"
        ),
        Err(err) => format!("Error calculating limit:\n{err}"),
    }
}

/// Renders the direct function-evaluation report at a point.
pub fn evaluate_function(func: &str, variable: &str, point_text: &str) -> String {
    if func.trim().is_empty() || point_text.trim().is_empty() {
        return "Please enter a function and point".to_string();
    }
    let variable = effective_variable(variable);
    let point_text = point_text.trim();
    let Ok(point) = point_text.parse::<f64>() else {
        return format!("Error evaluating function:\ninvalid point '{point_text}'");
    };

    match Function1d::new(func, variable).and_then(|f| f.eval_at(point)) {
        Ok(result) => format!(
            "Function evaluation:\n\nf({point_text}) = {result}\n\nwhere f({variable}) = {func}"
        ),
        Err(err) => format!("Error evaluating function:\n{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_flow() {
        let mut calc = Calculator::new();
        calc.append_number("1");
        calc.append_number("2");
        assert_eq!(calc.result(), "12");
        calc.append_operator("+");
        assert_eq!(calc.expression(), "12 + ");
        calc.append_number("3");
        calc.calculate();
        assert_eq!(calc.result(), "15");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_display_glyph_operator() {
        let mut calc = Calculator::new();
        calc.append_number("3");
        calc.append_operator("×");
        calc.append_number("4");
        calc.calculate();
        assert_eq!(calc.result(), "12");
        assert_eq!(calc.history().get(0).unwrap().expression, "3 × 4");
    }

    #[test]
    fn test_division_by_zero_shows_error() {
        let mut calc = Calculator::new();
        calc.append_number("1");
        calc.append_operator("÷");
        calc.append_number("0");
        calc.calculate();
        assert_eq!(calc.result(), ERROR_DISPLAY);
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_error_recovery() {
        let mut calc = Calculator::new();
        calc.append_number("1");
        calc.append_operator("÷");
        calc.append_number("0");
        calc.calculate();
        // Operators are ignored while Error is displayed; digits replace it.
        calc.append_operator("+");
        assert_eq!(calc.result(), ERROR_DISPLAY);
        calc.append_number("7");
        assert_eq!(calc.result(), "7");
    }

    #[test]
    fn test_single_pending_operator() {
        let mut calc = Calculator::new();
        calc.append_number("5");
        calc.append_operator("+");
        calc.append_operator("-");
        // Recommitting overwrites the prefix rather than stacking operators.
        assert_eq!(calc.expression(), "0 - ");
    }

    #[test]
    fn test_append_function_wraps_operand() {
        let mut calc = Calculator::new();
        calc.append_number("16");
        calc.append_function("sqrt(", ")");
        assert_eq!(calc.result(), "sqrt(16)");
        calc.calculate();
        assert_eq!(calc.result(), "4");
    }

    #[test]
    fn test_append_constant() {
        let mut calc = Calculator::new();
        calc.append_constant(Constant::Pi);
        assert_eq!(calc.result(), "3.141592653589793");
    }

    #[test]
    fn test_clear_entry_keeps_prefix() {
        let mut calc = Calculator::new();
        calc.append_number("8");
        calc.append_operator("+");
        calc.append_number("9");
        calc.clear_entry();
        assert_eq!(calc.result(), "0");
        assert_eq!(calc.expression(), "8 + ");
        calc.clear_all();
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        calc.append_number("1");
        calc.append_number("2");
        calc.backspace();
        assert_eq!(calc.result(), "1");
        calc.backspace();
        assert_eq!(calc.result(), "0");
        calc.backspace();
        assert_eq!(calc.result(), "0");
    }

    #[test]
    fn test_use_history_item() {
        let mut calc = Calculator::new();
        calc.append_number("6");
        calc.append_operator("×");
        calc.append_number("7");
        calc.calculate();
        calc.append_number("9");
        calc.use_history_item(0);
        assert_eq!(calc.result(), "42");
    }

    #[test]
    fn test_history_cap_through_calculator() {
        let mut calc = Calculator::new();
        for _ in 0..51 {
            calc.append_number("2");
            calc.append_operator("+");
            calc.append_number("2");
            calc.calculate();
            calc.clear_all();
        }
        assert_eq!(calc.history().len(), 50);
    }

    #[test]
    fn test_repeat_evaluation_is_idempotent() {
        let run = || {
            let mut calc = Calculator::new();
            calc.append_number("1");
            calc.append_operator("÷");
            calc.append_number("3");
            calc.calculate();
            calc.result().to_string()
        };
        assert_eq!(run(), run());
        assert_eq!(run(), "0.333333333333");
    }

    #[test]
    fn test_mode_switch() {
        let mut calc = Calculator::new();
        assert_eq!(calc.mode(), Mode::Basic);
        calc.switch_mode(Mode::Calculus);
        assert_eq!(calc.mode(), Mode::Calculus);
    }

    #[test]
    fn test_derivative_report() {
        let report = calculate_derivative("x^2", "x", "2");
        assert!(report.contains("d/dx[x^2]"));
        assert!(report.contains("4.00000000"));
    }

    #[test]
    fn test_derivative_report_defaults() {
        // Missing point defaults to 0, missing variable to x.
        let report = calculate_derivative("x^2", "", "");
        assert!(report.contains("At x = 0"));
    }

    #[test]
    fn test_integral_report() {
        let report = calculate_integral("x", "x", "[0,1]");
        assert!(report.contains("0.50000000"));
        assert!(report.contains("Simpson's rule with 1000 intervals"));
    }

    #[test]
    fn test_limit_report() {
        let report = calculate_limit("sin(x)/x", "x", "0");
        assert!(report.contains("lim(x→0)"));
        assert!(report.contains("1.00000000"));
    }

    #[test]
    fn test_evaluate_function_report() {
        let report = evaluate_function("x^2", "x", "3");
        assert!(report.contains("f(3) = 9"));
    }

    #[test]
    fn test_missing_inputs() {
        assert_eq!(calculate_derivative("", "x", "2"), "Please enter a function");
        assert_eq!(
            calculate_limit("x", "x", ""),
            "Please enter a function and point"
        );
        assert_eq!(
            evaluate_function("", "x", "1"),
            "Please enter a function and point"
        );
    }

    #[test]
    fn test_operation_specific_errors() {
        let report = calculate_derivative("ln(x)", "x", "-5");
        assert!(report.starts_with("Error calculating derivative:"));
        let report = calculate_integral("1/x", "x", "[0,1]");
        assert!(report.starts_with("Error calculating integral:"));
        let report = calculate_limit("x", "x", "oops");
        assert!(report.starts_with("Error calculating limit:"));
    }
}
