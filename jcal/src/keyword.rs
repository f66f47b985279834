// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords used by the jCal encoding (RFC 7265).
//!
//! jCal lowercases every component, property and value-type name, so these
//! are compared case-sensitively.

pub const KW_VEVENT: &str = "vevent";

// Properties mapped onto `Event`
pub const KW_CREATED: &str = "created";
pub const KW_DTSTAMP: &str = "dtstamp";
pub const KW_LAST_MODIFIED: &str = "last-modified";
pub const KW_SEQUENCE: &str = "sequence";
pub const KW_UID: &str = "uid";
pub const KW_DTSTART: &str = "dtstart";
pub const KW_DTEND: &str = "dtend";
pub const KW_STATUS: &str = "status";
pub const KW_SUMMARY: &str = "summary";
pub const KW_LOCATION: &str = "location";
pub const KW_DESCRIPTION: &str = "description";

// Value type of bare dates
pub const KW_DATE: &str = "date";
