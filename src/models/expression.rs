//! Arithmetic amount expressions
//!
//! Amounts can be typed as small sums such as "1200 + 350*2". Input is first
//! reduced to digits, `+ - * / .` and spaces; whatever remains is evaluated
//! with the usual precedence. Any failure yields 0.

use super::money::Money;

/// Evaluate an amount expression, returning 0 on any failure
pub fn evaluate(text: &str) -> f64 {
    try_evaluate(text).unwrap_or(0.0)
}

/// Evaluate an amount expression, returning `None` when it cannot be read
pub fn try_evaluate(text: &str) -> Option<f64> {
    let sanitized: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | ' '))
        .collect();

    if sanitized.trim().is_empty() {
        return None;
    }

    let tokens = tokenize(&sanitized)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    (parser.pos == parser.tokens.len() && value.is_finite()).then_some(value)
}

/// Evaluate an amount expression into cents
pub fn evaluate_money(text: &str) -> Money {
    Money::from_f64(evaluate(text))
}

/// Whether non-blank `text` cannot be evaluated
pub fn is_invalid(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && try_evaluate(trimmed).is_none()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(literal.parse().ok()?));
            }
        }
    }

    Some(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Some(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star { value * rhs } else { value / rhs };
        }
        Some(value)
    }

    // unary := ('+' | '-')* number
    fn unary(&mut self) -> Option<f64> {
        match self.next()? {
            Token::Minus => self.unary().map(|v| -v),
            Token::Plus => self.unary(),
            Token::Number(n) => Some(n),
            _ => None,
        }
    }
}
