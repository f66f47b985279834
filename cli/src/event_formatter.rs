// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use jcal::Event;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

const STATUS_CANCELLED: &str = "CANCELLED";

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            columns: vec![
                EventColumn::TimeRange(tz),
                EventColumn::Summary,
                EventColumn::Location,
                EventColumn::Uid,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.columns.extend([
                EventColumn::Status,
                EventColumn::Sequence,
                EventColumn::Description,
            ]);
        }
        self
    }

    pub fn format<'a>(&'a self, events: &'a [&'a Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [&'a Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.events))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    TimeRange(TimeZone),
    Summary,
    Location,
    Uid,
    Status,
    Sequence,
    Description,
}

impl<'e> TableColumn<&'e Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::TimeRange(_) => "Time Range",
            EventColumn::Summary => "Summary",
            EventColumn::Location => "Location",
            EventColumn::Uid => "UID",
            EventColumn::Status => "Status",
            EventColumn::Sequence => "Seq",
            EventColumn::Description => "Description",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a &'e Event) -> Cow<'a, str> {
        match self {
            EventColumn::TimeRange(tz) => format_time_range(event, tz).into(),
            EventColumn::Summary => event.summary.as_str().into(),
            EventColumn::Location => event.location.as_deref().unwrap_or_default().into(),
            EventColumn::Uid => event.uid.as_deref().unwrap_or_default().into(),
            EventColumn::Status => event.status.as_deref().unwrap_or_default().into(),
            EventColumn::Sequence => event.sequence.to_string().into(),
            EventColumn::Description => first_line(event.description.as_deref()).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Sequence => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, event: &&'e Event) -> Option<Color> {
        match event.status.as_deref() {
            Some(status) if status.eq_ignore_ascii_case(STATUS_CANCELLED) => {
                Some(Color::BrightBlack)
            }
            _ => None,
        }
    }
}

/// Format the span of an event.
///
/// All-day events show calendar dates, taken in UTC where bare dates are
/// anchored, with the exclusive end date made inclusive. Timed events are
/// shown in the given time zone.
fn format_time_range(event: &Event, tz: &TimeZone) -> String {
    if event.is_all_day {
        let start = event.dt_start.to_zoned(TimeZone::UTC).date();
        let end = event.dt_end.to_zoned(TimeZone::UTC).date();
        let last = end.yesterday().unwrap_or(end);
        return if last <= start {
            start.to_string()
        } else {
            format!("{start}~{last}")
        };
    }

    let start = event.dt_start.to_zoned(tz.clone());
    let end = event.dt_end.to_zoned(tz.clone());
    if start.date() == end.date() {
        format!(
            "{} {}~{}",
            start.date(),
            start.strftime("%H:%M"),
            end.strftime("%H:%M")
        )
    } else {
        format!(
            "{}~{}",
            format_timestamp(event.dt_start, tz),
            format_timestamp(event.dt_end, tz)
        )
    }
}

fn format_timestamp(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M").to_string()
}

fn first_line(text: Option<&str>) -> &str {
    text.and_then(|t| t.lines().next()).unwrap_or_default()
}
