//! Single-pass expression scanner
//!
//! Walks the input once, left to right, and emits numbers and operators as it
//! finds them. A `+` or `-` is read as the sign of a number when it sits where
//! an operand is expected (start of input or right after an operator) and a
//! digit follows immediately; everywhere else it is a binary operator.

use super::token::{Operator, SpannedToken, Token};
use crate::types::{LabError, Result};
use std::iter::Peekable;
use std::str::CharIndices;

/// Split an expression into a token stream
///
/// Whitespace between tokens is optional and ignored. The scanner does not
/// check that numbers and operators alternate; that is the parser's job.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut expect_operand = true;

    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let position = char_position(input, offset);

        if ch.is_ascii_digit() {
            let value = scan_number(input, &mut chars, offset)?;
            tokens.push(SpannedToken { token: Token::Number(value), position });
            expect_operand = false;
            continue;
        }

        if let Some(op) = Operator::from_char(ch) {
            chars.next();

            let signed = expect_operand
                && matches!(op, Operator::Add | Operator::Subtract)
                && chars.peek().is_some_and(|&(_, next)| next.is_ascii_digit());

            if signed {
                let value = scan_number(input, &mut chars, offset)?;
                tokens.push(SpannedToken { token: Token::Number(value), position });
                expect_operand = false;
            } else {
                tokens.push(SpannedToken { token: Token::Operator(op), position });
                expect_operand = true;
            }
            continue;
        }

        return Err(LabError::UnexpectedCharacter { ch, position });
    }

    log::trace!("Tokenized {:?} into {} token(s)", input, tokens.len());
    Ok(tokens)
}

/// Character index of byte `offset`, the unit error positions are reported in
fn char_position(input: &str, offset: usize) -> usize {
    input[..offset].chars().count()
}

/// Consume `digits(.digits)?` and parse `input[start..end]` as a number
///
/// `start` may point at a sign character the caller already consumed.
fn scan_number(input: &str, chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Result<f64> {
    let mut end = consume_digits(chars, start);

    if let Some(&(dot, '.')) = chars.peek() {
        chars.next();
        let after = consume_digits(chars, dot + 1);
        if after == dot + 1 {
            return Err(LabError::NumericParse(format!(
                "'{}' has no digits after the decimal point",
                &input[start..after]
            )));
        }
        end = after;
    }

    let literal = &input[start..end];
    literal
        .parse::<f64>()
        .map_err(|e| LabError::NumericParse(format!("'{}': {}", literal, e)))
}

/// Consume ASCII digits and return the byte offset just past the last one
fn consume_digits(chars: &mut Peekable<CharIndices<'_>>, mut end: usize) -> usize {
    while let Some(&(idx, ch)) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        end = idx + ch.len_utf8();
        chars.next();
    }
    end
}
