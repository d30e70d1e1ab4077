//! Interactive calculator prompt
//!
//! Reads expressions line by line and writes the parsed tokens plus the result
//! or error for each one. Generic over the reader and writer so the loop can
//! be driven from tests with in-memory buffers.

use serde::Serialize;
use std::io::{self, BufRead, Write};
use week1_lab::{Calculator, ParsedExpression};

/// JSON record written per evaluation
#[derive(Debug, Serialize)]
struct Evaluation<'a> {
    expression: &'a str,
    #[serde(flatten)]
    parsed: Option<ParsedExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub struct CalcSession {
    calculator: Calculator,
    json: bool,
}

impl CalcSession {
    pub fn new(calculator: Calculator, json: bool) -> Self {
        Self { calculator, json }
    }

    /// Evaluate one expression and write the outcome
    ///
    /// Calculator errors are written to `out`, not returned; only I/O errors
    /// propagate.
    pub fn evaluate_line<W: Write>(&self, expression: &str, out: &mut W) -> io::Result<()> {
        let parsed = self.calculator.parse(expression);

        if self.json {
            let record = match parsed {
                Ok(parsed) => Evaluation {
                    expression,
                    result: Some(parsed.evaluate()),
                    parsed: Some(parsed),
                    error: None,
                },
                Err(e) => Evaluation {
                    expression,
                    parsed: None,
                    result: None,
                    error: Some(e.to_string()),
                },
            };
            serde_json::to_writer(&mut *out, &record)?;
            return writeln!(out);
        }

        match parsed {
            Ok(parsed) => {
                if self.calculator.config().echo_tokens {
                    let operands: Vec<String> =
                        parsed.operands().iter().map(|v| v.to_string()).collect();
                    let operators: Vec<String> =
                        parsed.operators().iter().map(|op| op.to_string()).collect();
                    writeln!(out, "Operands: {}", operands.join(" "))?;
                    writeln!(out, "Operators: {}", operators.join(" "))?;
                }
                writeln!(out, "Result: {}", parsed.evaluate())
            }
            Err(e) => {
                log::debug!("Rejected {:?}: {}", expression, e);
                writeln!(out, "Error: {}", e)
            }
        }
    }

    /// Run the prompt loop
    ///
    /// With `repeat` unset a single line is read. Otherwise lines are read until
    /// one equals `q`/`Q` or the input ends. Returns the number of expressions
    /// evaluated.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W, repeat: bool) -> io::Result<usize> {
        if !self.json {
            writeln!(out, "Command-line calculator")?;
        }

        let mut evaluated = 0;
        let mut line = String::new();
        loop {
            if !self.json {
                if repeat {
                    write!(out, "Enter an expression (e.g. 3.5 * 4), q to quit: ")?;
                } else {
                    write!(out, "Enter an expression (e.g. 3.5 * 4): ")?;
                }
                out.flush()?;
            }

            line.clear();
            let read = input.read_line(&mut line)?;
            let expression = line.trim();

            if read == 0 && (repeat || evaluated > 0) {
                break;
            }
            if repeat && expression.eq_ignore_ascii_case("q") {
                break;
            }

            self.evaluate_line(expression, out)?;
            evaluated += 1;

            if !repeat {
                break;
            }
        }

        log::debug!("Prompt finished after {} expression(s)", evaluated);
        Ok(evaluated)
    }
}
