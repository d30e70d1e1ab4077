//! Core types shared by the lab modules
//!
//! This module defines the error type returned by the calculator and the
//! crate-wide `Result` alias. The observer registry has no error paths: a
//! failed weak upgrade is handled by pruning, never surfaced.

/// Result type for lab operations
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors that can occur while parsing or evaluating an expression
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabError {
    #[error("Empty expression")]
    EmptyExpression,

    #[error("Failed to parse number: {0}")]
    NumericParse(String),

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Misplaced token at position {position}")]
    MisplacedToken { position: usize },

    #[error("Operator count mismatch: {operands} operand(s) need {} operator(s), found {operators}", .operands.saturating_sub(1))]
    OperatorMismatch { operands: usize, operators: usize },

    #[error("Expression too long: {len} characters (limit {max})")]
    ExpressionTooLong { len: usize, max: usize },
}
