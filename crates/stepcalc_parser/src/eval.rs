//! Numeric expression evaluator.
//!
//! Accepts the purely numeric subset of normalized math: decimal literals,
//! `+ - * / ^`, unary signs and parentheses. Precedence, highest first:
//! parentheses, `^` (right-associative), unary sign, `*` `/`, `+` `-`.
//! A number or group directly followed by `(`, or a group followed by a
//! number, multiplies (`2(3+1)` is `8`). Two number literals may not touch:
//! `3.5.2` is rejected, not read as `3.5 * .2`.
//!
//! The value tree is implicit in the recursion; nothing outlives the call.
//! Nesting (groups, signs, exponents) is capped at [`MAX_DEPTH`].

use crate::error::EvalError;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::pair,
    IResult,
};
use tracing::trace;

/// Deepest nesting of groups and prefix signs accepted by [`calculate`].
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "^".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

// ============================================================================
// Tokenizer (using nom)
// ============================================================================

/// Decimal literal: `12`, `12.`, `12.5` or `.5`.
fn number(input: &str) -> IResult<&str, Token> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>().map(Token::Number),
    )(input)
}

fn operator_or_grouping(input: &str) -> IResult<&str, Token> {
    alt((
        map(char('+'), |_| Token::Plus),
        map(char('-'), |_| Token::Minus),
        map(char('*'), |_| Token::Star),
        map(char('/'), |_| Token::Slash),
        map(char('^'), |_| Token::Caret),
        map(alt((tag("("), tag("["), tag("{"))), |_| Token::LParen),
        map(alt((tag(")"), tag("]"), tag("}"))), |_| Token::RParen),
    ))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((number, operator_or_grouping))(input)
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        match token(remaining) {
            Ok((_, Token::Number(_))) if matches!(tokens.last(), Some(Token::Number(_))) => {
                let pos = input.len() - remaining.len();
                let c = remaining.chars().next().unwrap_or('?');
                return Err(EvalError::UnexpectedChar(c, pos));
            }
            Ok((rest, tok)) => {
                tokens.push(tok);
                remaining = rest;
            }
            Err(_) => {
                let pos = input.len() - remaining.len();
                let c = remaining.chars().next().unwrap_or('?');
                return Err(EvalError::UnexpectedChar(c, pos));
            }
        }
    }

    Ok(tokens)
}

// ============================================================================
// Parser (Recursive Descent)
// ============================================================================

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Lowest precedence: addition/subtraction, folded left to right.
    fn parse_expr(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_term()?;

        while let Some(tok) = self.peek() {
            match tok {
                Token::Plus => {
                    self.advance();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    /// Multiplication/division, explicit or implicit, folded left to right.
    fn parse_term(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_unary()?;

        while let Some(tok) = self.peek() {
            match tok {
                Token::Star => {
                    self.advance();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    left /= divisor;
                }
                Token::Number(_) | Token::LParen => {
                    left *= self.parse_power()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    /// Every level of nesting passes through here, so this is where depth is counted.
    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let value = self.parse_signed();
        self.depth -= 1;
        value
    }

    fn parse_signed(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    /// `base ^ exponent`; the exponent may itself carry a sign or a power,
    /// which makes the operator right-associative.
    fn parse_power(&mut self) -> Result<f64, EvalError> {
        let base = self.parse_atom()?;

        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exponent = self.parse_unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_atom(&mut self) -> Result<f64, EvalError> {
        match self.advance().cloned() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
                    None => Err(EvalError::UnbalancedParens),
                }
            }
            Some(Token::RParen) => Err(EvalError::UnbalancedParens),
            Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate a numeric expression.
///
/// Spaces are ignored and empty input evaluates to `0`. A divisor that
/// evaluates to exactly zero yields [`EvalError::DivisionByZero`].
pub fn calculate(expr: &str) -> Result<f64, EvalError> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(0.0);
    }

    let tokens = tokenize(&compact)?;
    let mut parser = Parser::new(&tokens);
    let value = parser.parse_expr()?;

    if let Some(tok) = parser.peek() {
        return Err(match tok {
            Token::RParen => EvalError::UnbalancedParens,
            other => EvalError::UnexpectedToken(other.describe()),
        });
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }

    trace!(expr = %compact, value, "evaluated");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn precedence() {
        assert_eq!(calculate("2+3*4").unwrap(), 14.0);
        assert_eq!(calculate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(calculate("10-4-3").unwrap(), 3.0);
        assert_eq!(calculate("100/10/5").unwrap(), 2.0);
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(calculate("2^3^2").unwrap(), 512.0);
        assert_eq!(calculate("(2^3)^2").unwrap(), 64.0);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(calculate("-5+3").unwrap(), -2.0);
        assert_eq!(calculate("2*-3").unwrap(), -6.0);
        assert_eq!(calculate("-2^2").unwrap(), -4.0);
        assert_eq!(calculate("2^-1").unwrap(), 0.5);
        assert_eq!(calculate("--4").unwrap(), 4.0);
        assert_eq!(calculate("+7").unwrap(), 7.0);
    }

    #[test]
    fn decimals_and_spaces() {
        assert!(approx(calculate(" 1.5 * 2 ").unwrap(), 3.0));
        assert!(approx(calculate(".5+.25").unwrap(), 0.75));
        assert!(approx(calculate("3.").unwrap(), 3.0));
    }

    #[test]
    fn nested_groups() {
        assert_eq!(calculate("((1+2)*(3+4))").unwrap(), 21.0);
        assert_eq!(calculate("[2+3]*{4}").unwrap(), 20.0);
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(calculate("2(3+1)").unwrap(), 8.0);
        assert_eq!(calculate("(2)(3)").unwrap(), 6.0);
        assert_eq!(calculate("(2)^2(3)").unwrap(), 12.0);
    }

    #[test]
    fn touching_literals_are_rejected() {
        assert_eq!(calculate("3.5.2"), Err(EvalError::UnexpectedChar('.', 3)));
        assert_eq!(calculate("1.2.3"), Err(EvalError::UnexpectedChar('.', 3)));
        assert!(calculate("1..2").is_err());
        assert_eq!(calculate("3.5*.2").map(|v| (v * 10.0).round()), Ok(7.0));
    }

    #[test]
    fn nesting_is_capped() {
        let ok = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(calculate(&ok), Ok(1.0));

        let deep = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        assert_eq!(calculate(&deep), Err(EvalError::TooDeep(MAX_DEPTH)));
        assert_eq!(
            calculate(&"-".repeat(20_000)),
            Err(EvalError::TooDeep(MAX_DEPTH))
        );
        assert_eq!(
            calculate(&format!("2{}", "^2".repeat(5_000))),
            Err(EvalError::TooDeep(MAX_DEPTH))
        );
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(calculate("").unwrap(), 0.0);
        assert_eq!(calculate("   ").unwrap(), 0.0);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(calculate("10/0"), Err(EvalError::DivisionByZero));
        assert_eq!(calculate("1/(2-2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(
            calculate("2+x"),
            Err(EvalError::UnexpectedChar('x', 2))
        ));
        assert_eq!(calculate("(1+2"), Err(EvalError::UnbalancedParens));
        assert_eq!(calculate("1+2)"), Err(EvalError::UnbalancedParens));
        assert_eq!(calculate("3+"), Err(EvalError::UnexpectedEnd));
        assert!(matches!(calculate("*3"), Err(EvalError::UnexpectedToken(_))));
    }

    #[test]
    fn non_finite_results_are_rejected() {
        assert_eq!(calculate("0^-1"), Err(EvalError::NonFinite));
        assert_eq!(calculate("(-8)^0.5"), Err(EvalError::NonFinite));
    }
}
