// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Untyped jCal values and the coercions applied to them.
//!
//! Property and parameter values are kept as [`serde_json::Value`] by the
//! structural decoder. The helpers here turn one of them into the semantic
//! type a field expects, reporting a [`EventError`] naming the property when
//! the value does not fit.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde_json::{Number, Value};

use crate::error::{EventError, TimestampError};

/// The JSON type of a value, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// JSON string
    Text,
    /// JSON number, integer or floating
    Number,
    /// JSON `true` or `false`
    Boolean,
    /// JSON `null`
    Null,
    /// JSON array (structured values)
    Array,
    /// JSON object
    Object,
}

impl ValueKind {
    /// The kind of the given value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::Text,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// A timestamp together with the textual form it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// The instant. Bare dates resolve to midnight UTC.
    pub timestamp: Timestamp,

    /// Whether the text was a bare `YYYY-MM-DD` date.
    pub date_only: bool,
}

/// Convert a text value to a string.
///
/// # Errors
///
/// Returns [`EventError::TypeMismatch`] if the value is not text.
pub fn value_to_text(property: &str, value: &Value) -> Result<String, EventError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(type_mismatch(property, ValueKind::Text, other)),
    }
}

/// Convert a number to an integer, truncating fractional values toward zero.
///
/// # Errors
///
/// Returns [`EventError::TypeMismatch`] if the value is not a number.
pub fn value_to_int(property: &str, value: &Value) -> Result<i64, EventError> {
    match value {
        Value::Number(n) => Ok(number_to_i64(n)),
        other => Err(type_mismatch(property, ValueKind::Number, other)),
    }
}

/// Convert a text value to a timestamp.
///
/// Exactly two forms are accepted: an RFC 3339 date-time with an optional
/// fraction and a `Z` or `±HH:MM` offset (`2022-01-01T00:00:00Z`), and a
/// bare date (`2024-05-04`) taken as midnight UTC.
///
/// # Errors
///
/// Returns [`EventError::TypeMismatch`] if the value is not text, and
/// [`EventError::InvalidTimestamp`] if it matches neither form.
pub fn value_to_timestamp(property: &str, value: &Value) -> Result<ParsedTimestamp, EventError> {
    let Value::String(text) = value else {
        return Err(type_mismatch(property, ValueKind::Text, value));
    };

    parse_timestamp(text).map_err(|source| EventError::InvalidTimestamp {
        property: property.to_string(),
        value: text.clone(),
        source,
    })
}

fn parse_timestamp(text: &str) -> Result<ParsedTimestamp, TimestampError> {
    let bytes = text.as_bytes();
    if is_date_time(bytes) {
        Ok(ParsedTimestamp {
            timestamp: text.parse()?,
            date_only: false,
        })
    } else if fits(bytes, DATE_PATTERN) {
        let date = Date::strptime("%Y-%m-%d", text)?;
        Ok(ParsedTimestamp {
            timestamp: date.to_zoned(TimeZone::UTC)?.timestamp(),
            date_only: true,
        })
    } else {
        Err(TimestampError::Format)
    }
}

/// `D` matches one ASCII digit, any other byte matches itself.
const DATE_PATTERN: &[u8] = b"DDDD-DD-DD";
const DATE_TIME_PATTERN: &[u8] = b"DDDD-DD-DDTDD:DD:DD";
const OFFSET_PATTERN: &[u8] = b"DD:DD";

fn is_date_time(bytes: &[u8]) -> bool {
    let Some((head, rest)) = bytes.split_at_checked(DATE_TIME_PATTERN.len()) else {
        return false;
    };
    if !fits(head, DATE_TIME_PATTERN) {
        return false;
    }

    let rest = match rest.split_first() {
        Some((b'.', fraction)) => {
            let digits = fraction.iter().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 {
                return false;
            }
            fraction.get(digits..).unwrap_or_default()
        }
        _ => rest,
    };

    match rest.split_first() {
        Some((b'Z', [])) => true,
        Some((b'+' | b'-', offset)) => fits(offset, OFFSET_PATTERN),
        _ => false,
    }
}

fn fits(bytes: &[u8], pattern: &[u8]) -> bool {
    bytes.len() == pattern.len()
        && bytes
            .iter()
            .zip(pattern)
            .all(|(&b, &p)| if p == b'D' { b.is_ascii_digit() } else { b == p })
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_i64(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        // float to int casts saturate and truncate toward zero
        n.as_f64().map_or(0, |f| f.trunc() as i64)
    }
}

fn type_mismatch(property: &str, expected: ValueKind, found: &Value) -> EventError {
    EventError::TypeMismatch {
        property: property.to_string(),
        expected,
        found: ValueKind::of(found),
    }
}
