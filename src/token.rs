//! Tokenizer for the closed expression grammar.
//!
//! Splits an expression string into tokens: numeric literals (including scientific
//! notation such as `1e-10`, which substitution and exponent-style input can
//! produce), identifiers, operators, parentheses, and the argument comma. Maximal
//! munch on identifiers gives the word-boundary discipline the rewriting rules
//! require: `sinx` tokenizes as one identifier, never as `sin` followed by `x`.

use std::fmt;

use crate::errors::ParseError;

/// A single lexical token of the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal, e.g. `3`, `1.5`, `.5`, `2e-7`
    Number(f64),
    /// An identifier, e.g. `sin`, `pi`
    Ident(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// Tokenizes an expression string.
///
/// # Arguments
/// * `input` - The expression text, already canonicalized by the evaluator
///
/// # Returns
/// * `Result<Vec<Token>, ParseError>` - The token stream or the first lexical error
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c if c.is_ascii_digit() || c == '.' => {
                tokens.push(read_number(&mut chars)?);
            }
            c if c.is_ascii_alphabetic() => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphabetic() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            c => return Err(ParseError::UnexpectedChar(c)),
        }
    }

    Ok(tokens)
}

/// Reads a numeric literal: digits, optional fraction, optional exponent.
///
/// The exponent marker (`e`/`E`) is only consumed when followed by a digit or a
/// signed digit; otherwise it is left for the identifier rules, so `2e` becomes
/// `2` followed by the identifier `e` (which the parser then rejects as two
/// adjacent operands).
fn read_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Token, ParseError> {
    let mut literal = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if let Some(&marker) = chars.peek() {
        if marker == 'e' || marker == 'E' {
            let mut lookahead = chars.clone();
            lookahead.next();
            let mut exponent = String::from(marker);
            if let Some(&sign) = lookahead.peek() {
                if sign == '+' || sign == '-' {
                    exponent.push(sign);
                    lookahead.next();
                }
            }
            if lookahead.peek().is_some_and(char::is_ascii_digit) {
                while let Some(&d) = lookahead.peek() {
                    if d.is_ascii_digit() {
                        exponent.push(d);
                        lookahead.next();
                    } else {
                        break;
                    }
                }
                literal.push_str(&exponent);
                *chars = lookahead;
            }
        }
    }

    literal
        .parse::<f64>()
        .map(Token::Number)
        .map_err(|_| ParseError::MalformedNumber(literal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_arithmetic() {
        let tokens = tokenize("2 + 3 * 4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Plus,
                Token::Number(3.0),
                Token::Star,
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_function_call() {
        let tokens = tokenize("sqrt(16)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("sqrt".to_string()),
                Token::LParen,
                Token::Number(16.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_scientific_notation() {
        let tokens = tokenize("1e-10 + 2.5E+3").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(1e-10), Token::Plus, Token::Number(2.5e3)]
        );
    }

    #[test]
    fn test_tokenize_leading_dot() {
        let tokens = tokenize(".5").unwrap();
        assert_eq!(tokens, vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_exponent_marker_without_digits_is_identifier() {
        // "2e" is the number 2 followed by the identifier e, not a malformed literal.
        let tokens = tokenize("2e").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2.0), Token::Ident("e".to_string())]
        );
    }

    #[test]
    fn test_tokenize_rejects_unknown_character() {
        assert_eq!(tokenize("2 ; 3"), Err(ParseError::UnexpectedChar(';')));
    }

    #[test]
    fn test_tokenize_rejects_double_dot() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(ParseError::MalformedNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn test_identifier_maximal_munch() {
        let tokens = tokenize("sinx").unwrap();
        assert_eq!(tokens, vec![Token::Ident("sinx".to_string())]);
    }
}
