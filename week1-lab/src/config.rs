//! Calculator configuration types
//!
//! The library only needs a couple of knobs. Prompt handling, looping and
//! output formatting belong to the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for the calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Whether callers should echo the parsed operands and operators
    #[serde(default = "default_true")]
    pub echo_tokens: bool,

    /// Optional: reject expressions longer than this many characters
    #[serde(default)]
    pub max_expression_len: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            echo_tokens: true,
            max_expression_len: None,
        }
    }
}

impl CalculatorConfig {
    /// Create a new calculator configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable token echo
    pub fn with_token_echo(mut self, enabled: bool) -> Self {
        self.echo_tokens = enabled;
        self
    }

    /// Builder method: limit the accepted expression length
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_expression_len = Some(max);
        self
    }

    /// Check if an expression of `len` characters is accepted
    pub fn accepts_length(&self, len: usize) -> bool {
        match self.max_expression_len {
            Some(max) => len <= max,
            None => true,
        }
    }
}
