// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for decoding jCal documents.
//!
//! Errors come in two tiers. [`DecodeError`] covers the structural tier: the
//! input is not shaped like jCal. [`EventError`] covers the semantic tier: the
//! shape is fine but a `vevent` breaks a domain rule. A semantic failure found
//! while walking a tree is carried by [`DecodeError::Event`] together with the
//! location of the offending component, so the two tiers are never merged.

use std::fmt::{self, Display, Formatter};

use crate::value::ValueKind;

/// Which layer of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorLayer {
    /// The input does not follow the jCal array grammar.
    Structural,

    /// The input is valid jCal but an event violates a domain rule.
    Semantic,
}

/// Location of a JSON array inside the document, as a JSON Pointer (RFC 6901).
///
/// Displayed in URI fragment form: `#` is the root, `#/2/0/1/3` is the fourth
/// property of the first subcomponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer(String);

impl Pointer {
    /// The root of the document.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Pointer to the `index`-th element of the array at `self`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// The pointer as an RFC 6901 string (empty for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error returned when decoding a jCal document fails.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A component array does not have the `[name, properties, components]` shape
    #[error("Malformed component at {path}: {reason}")]
    MalformedComponent {
        /// Location of the component array
        path: Pointer,
        /// What is wrong with it
        reason: String,
    },

    /// A property array does not have the `[name, parameters, type, value...]` shape
    #[error("Malformed property at {path}: {reason}")]
    MalformedProperty {
        /// Location of the property array
        path: Pointer,
        /// What is wrong with it
        reason: String,
    },

    /// Components are nested deeper than the decoder allows
    #[error("Component at {path} is nested deeper than the limit of {limit}")]
    DepthLimitExceeded {
        /// Location of the first component past the limit
        path: Pointer,
        /// The configured maximum depth
        limit: usize,
    },

    /// A `vevent` component could not be mapped onto an [`Event`](crate::Event)
    #[error("Invalid event at {path}: {source}")]
    Event {
        /// Location of the `vevent` component
        path: Pointer,
        /// The semantic error raised by the event mapper
        #[source]
        source: EventError,
    },
}

impl DecodeError {
    /// The tier this error belongs to.
    #[must_use]
    pub fn layer(&self) -> ErrorLayer {
        match self {
            Self::Event { .. } => ErrorLayer::Semantic,
            _ => ErrorLayer::Structural,
        }
    }

    /// The semantic error, if this is an event failure.
    #[must_use]
    pub fn event_error(&self) -> Option<&EventError> {
        match self {
            Self::Event { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn component(path: &Pointer, reason: impl Into<String>) -> Self {
        Self::MalformedComponent {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn property(path: &Pointer, reason: impl Into<String>) -> Self {
        Self::MalformedProperty {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// Error returned when a property list cannot be mapped onto an event.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The property list is empty
    #[error("Event has no properties")]
    EmptyInput,

    /// A mapped property does not carry exactly one value
    #[error("Property '{property}' must have exactly 1 value, found {count}")]
    MultiValueNotAllowed {
        /// The property name
        property: String,
        /// How many values it carries
        count: usize,
    },

    /// A timestamp property holds text that is neither a date-time nor a date
    #[error("Invalid timestamp '{value}' for property '{property}': {source}")]
    InvalidTimestamp {
        /// The property name
        property: String,
        /// The rejected text
        value: String,
        /// Why the text was rejected
        #[source]
        source: TimestampError,
    },

    /// A property value has the wrong JSON type for its field
    #[error("Expected {expected} value for property '{property}', found {found}")]
    TypeMismatch {
        /// The property name
        property: String,
        /// The JSON type the field accepts
        expected: ValueKind,
        /// The JSON type that was found
        found: ValueKind,
    },

    /// `dtstart` is not set
    #[error("Missing required property 'dtstart'")]
    MissingDtStart,

    /// `dtend` is not set
    #[error("Missing required property 'dtend'")]
    MissingDtEnd,

    /// `summary` is not set or empty
    #[error("Missing required property 'summary'")]
    MissingSummary,
}

/// Why a timestamp text was rejected.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    /// The text is neither `YYYY-MM-DDTHH:MM:SS` with a `Z` or `±HH:MM`
    /// offset, nor a `YYYY-MM-DD` date
    #[error("expected YYYY-MM-DDTHH:MM:SS followed by Z or ±HH:MM, or YYYY-MM-DD")]
    Format,

    /// The text has the right shape but names no valid date or time
    #[error(transparent)]
    Range(#[from] jiff::Error),
}
