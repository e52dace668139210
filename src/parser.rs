//! Recursive-descent parser for the closed expression grammar.
//!
//! Turns a token stream into an [`Expr`] tree. The grammar is deliberately closed:
//! numbers, `+ - * / ^`, parentheses, a fixed set of named functions, and the two
//! named constants `pi` and `e`. There is no identifier lookup beyond that table,
//! so free-form user text can never reach anything executable.
//!
//! Precedence, loosest to tightest:
//!
//! 1. `+`, `-` (left-associative)
//! 2. `*`, `/` (left-associative)
//! 3. unary `+`/`-`
//! 4. `^` (right-associative, binds tighter than unary minus so `-3^2` is `-9`)
//!
//! `log` is the base-10 logarithm and `ln` the natural logarithm, matching the
//! calculator's button vocabulary. `pow(a, b)` is the only binary function.

use std::f64::consts;

use crate::errors::ParseError;
use crate::expr::Expr;
use crate::token::{tokenize, Token};

/// Parses an expression string into an expression tree.
///
/// # Arguments
/// * `input` - The expression text, already canonicalized by the evaluator
///
/// # Returns
/// * `Result<Expr, ParseError>` - The expression tree or the first syntax error
///
/// # Example
/// ```
/// # use calcore::parser::parse;
/// let expr = parse("2 + 3 * 4").unwrap();
/// assert_eq!(expr.eval(), 14.0);
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    match parser.peek() {
        Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
        None => Ok(expr),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token == *expected => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.advance();
                    expr = Expr::Add(Box::new(expr), Box::new(self.term()?));
                }
                Token::Minus => {
                    self.advance();
                    expr = Expr::Sub(Box::new(expr), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.advance();
                    expr = Expr::Mul(Box::new(expr), Box::new(self.unary()?));
                }
                Token::Slash => {
                    self.advance();
                    expr = Expr::Div(Box::new(expr), Box::new(self.unary()?));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// unary := ('+' | '-') unary | power
    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    /// power := primary ('^' unary)?
    ///
    /// The exponent recurses through `unary` so `2^-3` parses and `2^3^2` is
    /// right-associative (`2^(3^2)`).
    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    /// primary := number | constant | function '(' args ')' | '(' expression ')'
    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Const(value)),
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Ident(name)) => self.resolve_identifier(name),
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Resolves an identifier against the fixed table of constants and functions.
    fn resolve_identifier(&mut self, name: String) -> Result<Expr, ParseError> {
        match name.as_str() {
            "pi" => Ok(Expr::Const(consts::PI)),
            "e" => Ok(Expr::Const(consts::E)),
            "sin" | "cos" | "tan" | "log" | "ln" | "sqrt" | "abs" => {
                let mut args = self.arguments()?;
                if args.len() != 1 {
                    return Err(ParseError::WrongArity {
                        name,
                        expected: 1,
                        got: args.len(),
                    });
                }
                let arg = Box::new(args.remove(0));
                Ok(match name.as_str() {
                    "sin" => Expr::Sin(arg),
                    "cos" => Expr::Cos(arg),
                    "tan" => Expr::Tan(arg),
                    "log" => Expr::Log10(arg),
                    "ln" => Expr::Ln(arg),
                    "sqrt" => Expr::Sqrt(arg),
                    _ => Expr::Abs(arg),
                })
            }
            "pow" => {
                let mut args = self.arguments()?;
                if args.len() != 2 {
                    return Err(ParseError::WrongArity {
                        name,
                        expected: 2,
                        got: args.len(),
                    });
                }
                let exponent = Box::new(args.remove(1));
                let base = Box::new(args.remove(0));
                Ok(Expr::Pow(base, exponent))
            }
            _ => Err(ParseError::UnknownIdentifier(name)),
        }
    }

    /// arguments := '(' expression (',' expression)* ')'
    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&Token::LParen)?;
        let mut args = vec![self.expression()?];
        loop {
            match self.advance() {
                Some(Token::Comma) => args.push(self.expression()?),
                Some(Token::RParen) => return Ok(args),
                Some(token) => return Err(ParseError::UnexpectedToken(token.to_string())),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(parse("2 + 3 * 4").unwrap().eval(), 14.0);
        assert_eq!(parse("(2 + 3) * 4").unwrap().eval(), 20.0);
        assert_eq!(parse("10 - 4 / 2").unwrap().eval(), 8.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse("10 - 3 - 2").unwrap().eval(), 5.0);
        assert_eq!(parse("16 / 4 / 2").unwrap().eval(), 2.0);
    }

    #[test]
    fn test_power_right_associative() {
        // 2^(3^2) = 512, not (2^3)^2 = 64
        assert_eq!(parse("2^3^2").unwrap().eval(), 512.0);
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(parse("-3^2").unwrap().eval(), -9.0);
        assert_eq!(parse("(-3)^2").unwrap().eval(), 9.0);
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(parse("2^-2").unwrap().eval(), 0.25);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(parse("sqrt(16)").unwrap().eval(), 4.0);
        assert_eq!(parse("pow(2, 10)").unwrap().eval(), 1024.0);
        assert!((parse("sin(pi)").unwrap().eval()).abs() < 1e-12);
        assert!((parse("ln(e)").unwrap().eval() - 1.0).abs() < 1e-12);
        assert_eq!(parse("log(100)").unwrap().eval(), 2.0);
        assert_eq!(parse("abs(-3)").unwrap().eval(), 3.0);
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert_eq!(
            parse("alert(1)"),
            Err(ParseError::UnknownIdentifier("alert".to_string()))
        );
    }

    #[test]
    fn test_word_boundary_discipline() {
        // "sinx" must never resolve as sin applied to x.
        assert_eq!(
            parse("sinx"),
            Err(ParseError::UnknownIdentifier("sinx".to_string()))
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            parse("pow(2)"),
            Err(ParseError::WrongArity {
                name: "pow".to_string(),
                expected: 2,
                got: 1,
            })
        );
        assert_eq!(
            parse("sin(1, 2)"),
            Err(ParseError::WrongArity {
                name: "sin".to_string(),
                expected: 1,
                got: 2,
            })
        );
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert_eq!(
            parse("2 3"),
            Err(ParseError::UnexpectedToken("3".to_string()))
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(parse("(2 + 3"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse("2 + 3)"),
            Err(ParseError::UnexpectedToken(")".to_string()))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
    }
}
