// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event extraction from `vevent` properties.

use jiff::{SignedDuration, Timestamp};
use serde_json::Value;

use crate::error::EventError;
use crate::keyword::{
    KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_LAST_MODIFIED, KW_LOCATION,
    KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_UID,
};
use crate::property::Property;
use crate::value::{ParsedTimestamp, value_to_int, value_to_text, value_to_timestamp};

/// An event extracted from a `vevent` component.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Date/time the event was created
    pub created: Option<Timestamp>,

    /// Date/time the event object was stamped
    pub dt_stamp: Option<Timestamp>,

    /// Last modification date/time
    pub last_modified: Option<Timestamp>,

    /// Revision sequence number, 0 if absent
    pub sequence: i64,

    /// Unique identifier
    pub uid: Option<String>,

    /// Start of the event
    pub dt_start: Timestamp,

    /// End of the event
    pub dt_end: Timestamp,

    /// Status, e.g. `CONFIRMED`
    pub status: Option<String>,

    /// Summary/title, never empty
    pub summary: String,

    /// Location
    pub location: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Whether `dtstart` or `dtend` was given as a bare date
    pub is_all_day: bool,
}

impl Event {
    /// Map a flat property list onto an event.
    ///
    /// Properties are applied in order. Unknown names are ignored, and a
    /// repeated name overwrites the earlier value.
    ///
    /// # Errors
    ///
    /// - [`EventError::EmptyInput`] if `properties` is empty
    /// - [`EventError::MultiValueNotAllowed`] if a mapped property does not
    ///   carry exactly one value
    /// - [`EventError::TypeMismatch`] or [`EventError::InvalidTimestamp`] if a
    ///   value cannot be coerced to its field
    /// - [`EventError::MissingDtStart`], [`EventError::MissingDtEnd`] or
    ///   [`EventError::MissingSummary`], checked in that order
    pub fn from_properties(properties: &[Property]) -> Result<Self, EventError> {
        if properties.is_empty() {
            return Err(EventError::EmptyInput);
        }

        let mut builder = EventBuilder::default();
        for prop in properties {
            let Some(field) = EventField::from_wire_name(&prop.name) else {
                tracing::trace!(property = %prop.name, "ignoring unmapped property");
                continue;
            };

            let [value] = prop.values.as_slice() else {
                return Err(EventError::MultiValueNotAllowed {
                    property: prop.name.clone(),
                    count: prop.values.len(),
                });
            };

            builder.assign(field, value)?;
        }

        builder.build()
    }

    /// Time between start and end. Negative if `dtend` precedes `dtstart`.
    #[must_use]
    pub fn duration(&self) -> SignedDuration {
        self.dt_end.duration_since(self.dt_start)
    }
}

impl TryFrom<&[Property]> for Event {
    type Error = EventError;

    fn try_from(properties: &[Property]) -> Result<Self, Self::Error> {
        Self::from_properties(properties)
    }
}

/// A property that maps onto an [`Event`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum EventField {
    /// `created`
    Created,
    /// `dtstamp`
    DtStamp,
    /// `last-modified`
    LastModified,
    /// `sequence`
    Sequence,
    /// `uid`
    Uid,
    /// `dtstart`
    DtStart,
    /// `dtend`
    DtEnd,
    /// `status`
    Status,
    /// `summary`
    Summary,
    /// `location`
    Location,
    /// `description`
    Description,
}

impl EventField {
    /// Find the field for a property name. Matching is case-sensitive.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        let field = match name {
            KW_CREATED => Self::Created,
            KW_DTSTAMP => Self::DtStamp,
            KW_LAST_MODIFIED => Self::LastModified,
            KW_SEQUENCE => Self::Sequence,
            KW_UID => Self::Uid,
            KW_DTSTART => Self::DtStart,
            KW_DTEND => Self::DtEnd,
            KW_STATUS => Self::Status,
            KW_SUMMARY => Self::Summary,
            KW_LOCATION => Self::Location,
            KW_DESCRIPTION => Self::Description,
            _ => return None,
        };
        Some(field)
    }

    /// The jCal property name of this field.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Created => KW_CREATED,
            Self::DtStamp => KW_DTSTAMP,
            Self::LastModified => KW_LAST_MODIFIED,
            Self::Sequence => KW_SEQUENCE,
            Self::Uid => KW_UID,
            Self::DtStart => KW_DTSTART,
            Self::DtEnd => KW_DTEND,
            Self::Status => KW_STATUS,
            Self::Summary => KW_SUMMARY,
            Self::Location => KW_LOCATION,
            Self::Description => KW_DESCRIPTION,
        }
    }

    /// The semantic type the field's value is coerced to.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Created | Self::DtStamp | Self::LastModified | Self::DtStart | Self::DtEnd => {
                FieldKind::Timestamp
            }
            Self::Sequence => FieldKind::Integer,
            Self::Uid | Self::Status | Self::Summary | Self::Location | Self::Description => {
                FieldKind::Text
            }
        }
    }
}

/// Semantic type of an [`EventField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    /// Text parsed as a date-time or a bare date
    Timestamp,
    /// A JSON number, truncated toward zero
    Integer,
    /// A JSON string
    Text,
}

/// `0001-01-01T00:00:00Z`, the zero instant, counts as an unset start or end.
const UNSET_TIMESTAMP: Timestamp = Timestamp::constant(-62_135_596_800, 0);

#[derive(Debug, Default)]
struct EventBuilder {
    created: Option<Timestamp>,
    dt_stamp: Option<Timestamp>,
    last_modified: Option<Timestamp>,
    sequence: i64,
    uid: Option<String>,
    dt_start: Option<Timestamp>,
    dt_end: Option<Timestamp>,
    status: Option<String>,
    summary: Option<String>,
    location: Option<String>,
    description: Option<String>,
    is_all_day: bool,
}

impl EventBuilder {
    fn assign(&mut self, field: EventField, value: &Value) -> Result<(), EventError> {
        let name = field.wire_name();
        match field {
            EventField::Created => self.created = Some(value_to_timestamp(name, value)?.timestamp),
            EventField::DtStamp => {
                self.dt_stamp = Some(value_to_timestamp(name, value)?.timestamp);
            }
            EventField::LastModified => {
                self.last_modified = Some(value_to_timestamp(name, value)?.timestamp);
            }
            EventField::Sequence => self.sequence = value_to_int(name, value)?,
            EventField::Uid => self.uid = Some(value_to_text(name, value)?),
            EventField::DtStart => self.dt_start = Some(self.event_time(name, value)?),
            EventField::DtEnd => self.dt_end = Some(self.event_time(name, value)?),
            EventField::Status => self.status = Some(value_to_text(name, value)?),
            EventField::Summary => self.summary = Some(value_to_text(name, value)?),
            EventField::Location => self.location = Some(value_to_text(name, value)?),
            EventField::Description => self.description = Some(value_to_text(name, value)?),
        }
        Ok(())
    }

    /// Parse `dtstart` or `dtend`. A bare date marks the event all-day, and
    /// the mark survives later overwrites.
    fn event_time(&mut self, name: &str, value: &Value) -> Result<Timestamp, EventError> {
        let ParsedTimestamp {
            timestamp,
            date_only,
        } = value_to_timestamp(name, value)?;
        self.is_all_day |= date_only;
        Ok(timestamp)
    }

    fn build(self) -> Result<Event, EventError> {
        let is_set = |t: &Timestamp| *t != UNSET_TIMESTAMP;
        let dt_start = self
            .dt_start
            .filter(is_set)
            .ok_or(EventError::MissingDtStart)?;
        let dt_end = self.dt_end.filter(is_set).ok_or(EventError::MissingDtEnd)?;
        let summary = self
            .summary
            .filter(|s| !s.is_empty())
            .ok_or(EventError::MissingSummary)?;

        Ok(Event {
            created: self.created,
            dt_stamp: self.dt_stamp,
            last_modified: self.last_modified,
            sequence: self.sequence,
            uid: self.uid,
            dt_start,
            dt_end,
            status: self.status,
            summary,
            location: self.location,
            description: self.description,
            is_all_day: self.is_all_day,
        })
    }
}
