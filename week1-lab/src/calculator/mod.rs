//! Flat arithmetic expression calculator
//!
//! Expressions are numbers joined by `+ - * /`. There is no precedence and no
//! grouping: operators are applied strictly in the order they appear, so
//! `2 + 3 * 4` is `(2 + 3) * 4 = 20`.
//!
//! # Example
//!
//! ```
//! use week1_lab::Calculator;
//!
//! let calc = Calculator::new();
//! assert_eq!(calc.calculate("3.5 * 4").unwrap(), 14.0);
//! assert_eq!(calc.calculate("2 + 3 * 4").unwrap(), 20.0);
//! ```

pub mod token;
pub mod tokenizer;

pub use token::{Operator, SpannedToken, Token};
pub use tokenizer::tokenize;

use crate::config::CalculatorConfig;
use crate::types::{LabError, Result};
use serde::Serialize;
use std::fmt;

/// An expression split into its operand and operator sequences
///
/// Always well-formed: `operators.len() == operands.len() - 1` and there is at
/// least one operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedExpression {
    operands: Vec<f64>,
    operators: Vec<Operator>,
}

impl ParsedExpression {
    /// Build from a token stream, checking that numbers and operators alternate
    pub fn from_tokens(input: &str, tokens: &[SpannedToken]) -> Result<Self> {
        let mut operands = Vec::new();
        let mut operators = Vec::new();
        let mut misplaced = None;

        for (idx, spanned) in tokens.iter().enumerate() {
            let expect_operand = idx % 2 == 0;
            match spanned.token {
                Token::Number(value) => {
                    if !expect_operand && misplaced.is_none() {
                        misplaced = Some(spanned.position);
                    }
                    operands.push(value);
                }
                Token::Operator(op) => {
                    if expect_operand && misplaced.is_none() {
                        misplaced = Some(spanned.position);
                    }
                    operators.push(op);
                }
            }
        }

        if operands.is_empty() {
            return Err(LabError::NumericParse(format!(
                "no number found in '{}'",
                input.trim()
            )));
        }

        if operators.len() + 1 != operands.len() {
            return Err(LabError::OperatorMismatch {
                operands: operands.len(),
                operators: operators.len(),
            });
        }

        // Counts line up but the order does not, e.g. "+ 2 3"
        if let Some(position) = misplaced {
            return Err(LabError::MisplacedToken { position });
        }

        Ok(Self { operands, operators })
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Fold the operators over the operands, strictly left to right
    pub fn evaluate(&self) -> f64 {
        let (first, rest) = match self.operands.split_first() {
            Some(split) => split,
            None => return 0.0,
        };

        self.operators
            .iter()
            .zip(rest)
            .fold(*first, |acc, (op, rhs)| op.apply(acc, *rhs))
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<String> = self.operands.iter().map(|v| v.to_string()).collect();
        let operators: Vec<String> = self.operators.iter().map(|op| op.to_string()).collect();
        write!(
            f,
            "operands: [{}], operators: [{}]",
            operands.join(", "),
            operators.join(", ")
        )
    }
}

/// Calculator entry point
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    /// Create a calculator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with a custom configuration
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Tokenize and validate an expression without evaluating it
    pub fn parse(&self, expression: &str) -> Result<ParsedExpression> {
        if expression.trim().is_empty() {
            return Err(LabError::EmptyExpression);
        }

        let len = expression.chars().count();
        if !self.config.accepts_length(len) {
            return Err(LabError::ExpressionTooLong {
                len,
                max: self.config.max_expression_len.unwrap_or_default(),
            });
        }

        let tokens = tokenize(expression)?;
        ParsedExpression::from_tokens(expression, &tokens)
    }

    /// Evaluate an expression
    ///
    /// # Errors
    /// * `EmptyExpression` - input is blank
    /// * `NumericParse` / `UnexpectedCharacter` - input contains something
    ///   that is not a number or operator
    /// * `OperatorMismatch` / `MisplacedToken` - numbers and operators do not
    ///   alternate
    pub fn calculate(&self, expression: &str) -> Result<f64> {
        let parsed = self.parse(expression)?;
        log::debug!("Parsed {:?}: {}", expression, parsed);

        let result = parsed.evaluate();
        log::debug!("Result of {:?} = {}", expression, result);
        Ok(result)
    }
}
