// nmimgr/src/nmi/infrastructure/parser.rs

//! # Range-List Parser
//!
//! Turns strings such as `0,1,2,5-12,0x0d,255` into an [`EventSet`].
//!
//! Grammar: comma-separated tokens, each either a single value or an
//! inclusive range `a-b` with `a <= b`. Values are decimal, or hexadecimal
//! with a `0x` prefix. Whitespace around tokens is ignored and an empty
//! string is an empty list. Parsing is all-or-nothing: any error discards
//! the whole list.

use crate::nmi::collections::EventSet;
use crate::nmi::ds::{EventCode, ParseError};

/// Parses a range list into a new event set.
pub fn parse_event_list(input: &str) -> Result<EventSet, ParseError> {
    let mut set = EventSet::new();
    if input.trim().is_empty() {
        return Ok(set);
    }

    let mut offset = 0;
    for token in input.split(',') {
        let at = offset + (token.len() - token.trim_start().len());
        offset += token.len() + 1;

        let (start, end) = parse_token(token.trim(), at)?;
        for code in start..=end {
            set.insert(code)?;
        }
    }

    Ok(set)
}

/// Parses one trimmed token starting at byte `at` of the input.
fn parse_token(token: &str, at: usize) -> Result<(EventCode, EventCode), ParseError> {
    if token.is_empty() {
        return Err(ParseError::InvalidToken { offset: at });
    }

    let (start, end) = match token.split_once('-') {
        Some((lo, hi)) => {
            let hi_at = at + lo.len() + 1 + (hi.len() - hi.trim_start().len());
            (parse_value(lo.trim(), at)?, parse_value(hi.trim(), hi_at)?)
        }
        None => {
            let value = parse_value(token, at)?;
            (value, value)
        }
    };

    let start_code = to_code(start)?;
    let end_code = to_code(end)?;
    if start_code > end_code {
        return Err(ParseError::ReversedRange { start, end });
    }
    Ok((start_code, end_code))
}

/// Parses an unsigned decimal or `0x` hexadecimal number. Values too large
/// for `u32` saturate so they are reported as out of range rather than as
/// malformed.
fn parse_value(text: &str, at: usize) -> Result<u32, ParseError> {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if digits.is_empty() {
        return Err(ParseError::InvalidToken { offset: at });
    }

    digits.chars().try_fold(0u32, |value, ch| {
        ch.to_digit(radix)
            .map(|digit| value.saturating_mul(radix).saturating_add(digit))
            .ok_or(ParseError::InvalidToken { offset: at })
    })
}

fn to_code(value: u32) -> Result<EventCode, ParseError> {
    EventCode::try_from(value).map_err(|_| ParseError::OutOfRange { value })
}
