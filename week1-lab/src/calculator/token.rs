//! Token types emitted by the expression scanner

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operators understood by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// Map a character to an operator, if it is one
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The operator's source symbol
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator to two operands
    ///
    /// Division follows IEEE-754, so dividing by zero yields an infinity or NaN
    /// rather than an error.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single token from an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A number, including its prefix sign if it had one
    Number(f64),
    /// A binary operator
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A token together with the character index where it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}
