//! Arithmetic expressions.
//!
//! A small recursive-descent parser over numbers, named variables and the
//! operators `+ - * / ^` (with `**` accepted for `^`). Precedence from
//! loosest to tightest:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | ident | '(' expr ')'
//! ```
//!
//! So `-2^2` is `-4` and `2^3^2` is `2^9`.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::fmt;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Ident(name) => write!(f, "identifier {:?}", name),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::Caret => f.write_str("'^'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => {
                tokens.push((offset, Token::Plus));
                i += 1;
            }
            '-' => {
                tokens.push((offset, Token::Minus));
                i += 1;
            }
            '*' => {
                if chars.get(i + 1).map(|&(_, c)| c) == Some('*') {
                    tokens.push((offset, Token::Caret));
                    i += 2;
                } else {
                    tokens.push((offset, Token::Star));
                    i += 1;
                }
            }
            '/' => {
                tokens.push((offset, Token::Slash));
                i += 1;
            }
            '^' => {
                tokens.push((offset, Token::Caret));
                i += 1;
            }
            '(' => {
                tokens.push((offset, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((offset, Token::RParen));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|&(_, c)| c).collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| Error::InvalidNumber(text.clone()))?;
                tokens.push((offset, Token::Number(value)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_alphanumeric() || chars[i].1 == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().map(|&(_, c)| c).collect();
                tokens.push((offset, Token::Ident(name)));
            }
            found => return Err(Error::UnexpectedChar { offset, found }),
        }
    }

    Ok(tokens)
}

/// A parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary(Box<Expr>, Operator, Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Variable bindings used during evaluation.
pub type Variables = HashMap<String, f64>;

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Operator::Add,
                Some(Token::Minus) => Operator::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Operator::Mul,
                Some(Token::Slash) => Operator::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Expr::Binary(
                Box::new(base),
                Operator::Pow,
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.next() {
            Some((_, Token::Number(n))) => Ok(Expr::Number(n)),
            Some((_, Token::Ident(name))) => Ok(Expr::Variable(name)),
            Some((_, Token::LParen)) => {
                let inner = self.expr()?;
                match self.next() {
                    Some((_, Token::RParen)) => Ok(inner),
                    Some((offset, tok)) => Err(Error::UnexpectedToken {
                        offset,
                        found: tok.to_string(),
                    }),
                    None => Err(Error::UnexpectedEnd),
                }
            }
            Some((offset, tok)) => Err(Error::UnexpectedToken {
                offset,
                found: tok.to_string(),
            }),
            None => Err(Error::UnexpectedEnd),
        }
    }
}

impl Expr {
    /// Parse an expression.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expr()?;
        match parser.next() {
            None => Ok(expr),
            Some((offset, tok)) => Err(Error::UnexpectedToken {
                offset,
                found: tok.to_string(),
            }),
        }
    }

    /// Evaluate with the given variable bindings.
    ///
    /// `pi` and `e` are always available unless shadowed by a binding.
    pub fn eval(&self, vars: &Variables) -> Result<f64> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => match vars.get(name) {
                Some(v) => Ok(*v),
                None => match name.as_str() {
                    "pi" => Ok(PI),
                    "e" => Ok(E),
                    _ => Err(Error::UnknownVariable(name.clone())),
                },
            },
            Expr::Neg(inner) => Ok(-inner.eval(vars)?),
            Expr::Binary(lhs, op, rhs) => {
                let l = lhs.eval(vars)?;
                let r = rhs.eval(vars)?;
                match op {
                    Operator::Add => Ok(l + r),
                    Operator::Sub => Ok(l - r),
                    Operator::Mul => Ok(l * r),
                    Operator::Div if r == 0.0 => Err(Error::DivisionByZero),
                    Operator::Div => Ok(l / r),
                    Operator::Pow => Ok(l.powf(r)),
                }
            }
        }
    }
}

/// Parse and evaluate an expression with no variables besides the constants.
pub fn evaluate(input: &str) -> Result<f64> {
    Expr::parse(input)?.eval(&Variables::new())
}

/// Parse and evaluate an expression with a single variable bound.
pub fn evaluate_with(input: &str, name: &str, value: f64) -> Result<f64> {
    let mut vars = Variables::new();
    vars.insert(name.to_string(), value);
    Expr::parse(input)?.eval(&vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("8 / 4 / 2").unwrap(), 1.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(evaluate("2^3").unwrap(), 8.0);
        assert_eq!(evaluate("2**3").unwrap(), 8.0);
        assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
        assert_eq!(evaluate("-2^2").unwrap(), -4.0);
        assert_eq!(evaluate("2^-1").unwrap(), 0.5);
    }

    #[test]
    fn test_constants_and_variables() {
        assert!(close(evaluate("pi/10").unwrap(), PI / 10.0));
        assert!(close(evaluate("e").unwrap(), E));
        assert_eq!(evaluate_with("(a*1.8)+32", "a", 100.0).unwrap(), 212.0);
        assert_eq!(
            evaluate("a + 1"),
            Err(Error::UnknownVariable("a".to_string()))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 +"), Err(Error::UnexpectedEnd));
        assert_eq!(evaluate("1 / 0"), Err(Error::DivisionByZero));
        assert!(matches!(
            evaluate("1 $ 2"),
            Err(Error::UnexpectedChar { found: '$', .. })
        ));
        assert!(matches!(
            evaluate("(1 2)"),
            Err(Error::UnexpectedToken { .. })
        ));
        assert!(matches!(evaluate("1.2.3"), Err(Error::InvalidNumber(_))));
        assert!(matches!(evaluate("3 4"), Err(Error::UnexpectedToken { .. })));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(evaluate(".5 + 1.").unwrap(), 1.5);
        assert_eq!(evaluate("1/4").unwrap(), 0.25);
    }
}
