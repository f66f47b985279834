// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decode jCal (RFC 7265) documents and extract their events.
//!
//! Decoding runs in two layers. The structural layer turns the positional
//! JSON arrays of jCal into a [`Component`] tree of [`Property`] values
//! without interpreting them. The event layer then maps the properties of
//! every `vevent` onto a typed [`Event`].
//!
//! ```
//! # use jcal::parse;
//! let src = r#"
//! ["vcalendar", [], [
//!   ["vevent", [
//!     ["dtstart", {}, "date", "2024-05-04"],
//!     ["dtend", {}, "date", "2024-05-05"],
//!     ["summary", {}, "text", "Holiday"]
//!   ], []]
//! ]]"#;
//! let calendar = parse(src).unwrap();
//! assert_eq!(calendar.events.len(), 1);
//! assert!(calendar.events[0].is_all_day);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]

mod component;
mod error;
mod event;
mod keyword;
mod property;
pub mod value;

pub use crate::component::{Component, DEFAULT_MAX_DEPTH, Decoder, EventIter};
pub use crate::error::{DecodeError, ErrorLayer, EventError, Pointer, TimestampError};
pub use crate::event::{Event, EventField, FieldKind};
pub use crate::property::Property;
pub use crate::value::ValueKind;

/// Decode a jCal document from text with the default [`Decoder`].
///
/// # Errors
///
/// Returns a [`DecodeError`] if the text is not JSON, is not shaped like
/// jCal, or contains an invalid `vevent`.
pub fn parse(src: &str) -> Result<Component, DecodeError> {
    Decoder::new().decode_str(src)
}

/// Decode a jCal document from raw bytes with the default [`Decoder`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_slice(bytes: &[u8]) -> Result<Component, DecodeError> {
    Decoder::new().decode_slice(bytes)
}
