//! Week 1 Lab Library
//!
//! Two small, unrelated exercises packaged as one library:
//! - A flat arithmetic calculator: single-pass tokenizer plus a strict
//!   left-to-right evaluator (no operator precedence)
//! - An observer registry that holds only weak references to its observers
//!   and prunes the dead ones while notifying
//!
//! The library does NOT:
//! - Read input or print results
//! - Loop over prompts
//! - Configure logging
//!
//! All of that lives in the application layer (week1-cli).
//!
//! # Example Usage
//!
//! ```
//! use week1_lab::{Calculator, LoggingObserver, Subject};
//!
//! let calc = Calculator::new();
//! assert_eq!(calc.calculate("-5 + 3").unwrap(), -2.0);
//!
//! let subject = Subject::new();
//! let observer = LoggingObserver::new("display");
//! subject.add_observer(&observer);
//! assert_eq!(subject.notify().delivered, 1);
//! ```

// Public modules
pub mod calculator;
pub mod config;
pub mod demo;
pub mod observer;
pub mod types;

// Re-export main types for convenience
pub use calculator::{Calculator, Operator, ParsedExpression, Token};
pub use config::CalculatorConfig;
pub use observer::{LoggingObserver, NotifyReport, Observer, SharedFromThis, Subject};
pub use types::{LabError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: both exercises are reachable from the crate root
        assert_eq!(Calculator::new().calculate("4 * 3.25"), Ok(13.0));
        assert!(Subject::new().is_empty());
    }
}
