//! Turns a typed command line into a group token and a state patch.
//!
//! The first word names the group; the remaining words are scanned left to
//! right against the [`KeywordTable`](crate::keywords::KeywordTable). Words
//! that are neither keywords nor a keyword's value are ignored, so
//! `kitchen lights on please` is the same command as `kitchen on`.

use std::num::IntErrorKind;

use tracing::trace;

use crate::error::ValidationError;
use crate::keywords::{KeywordTable, Meaning};
use crate::patch::{Field, StatePatch};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub group: String,
    pub patch: StatePatch,
}

/// Split a line on whitespace and parse it.
pub fn parse_line(line: &str) -> Result<Command, ValidationError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    parse(&tokens)
}

/// Parse `tokens`, the first of which is the group token.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Command, ValidationError> {
    let (group, rest) = tokens.split_first().ok_or(ValidationError::NoGroup)?;
    Ok(Command {
        group: group.as_ref().to_string(),
        patch: parse_patch(rest)?,
    })
}

/// Build a patch from keyword tokens (without the group token).
pub fn parse_patch<S: AsRef<str>>(tokens: &[S]) -> Result<StatePatch, ValidationError> {
    let mut patch = StatePatch::default();
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx].as_ref();
        idx += 1;
        let Some(keyword) = KeywordTable::lookup(token) else {
            trace!(token, "ignoring unrecognised word");
            continue;
        };
        match keyword.meaning {
            Meaning::Power(on) => patch.on = Some(on),
            Meaning::Level(field) => {
                let raw = tokens
                    .get(idx)
                    .map(|t| t.as_ref())
                    .ok_or(ValidationError::MissingValue(field))?;
                patch.set(field, parse_integer(field, raw)?);
                idx += 1;
            }
        }
    }
    Ok(patch)
}

/// Interpret an `on`/`off` value given outside a command line.
pub fn parse_power(value: &str) -> Result<bool, ValidationError> {
    KeywordTable::power(value).ok_or_else(|| ValidationError::InvalidPower(value.to_string()))
}

/// Integers past the 64-bit range saturate like any other out-of-range value.
fn parse_integer(field: Field, raw: &str) -> Result<i64, ValidationError> {
    match raw.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValidationError::NotANumber {
                field,
                value: raw.to_string(),
            }),
        },
    }
}
