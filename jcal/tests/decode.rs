// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for decoding jCal documents
//!
//! These tests run realistic documents through the public entry points and
//! check both the structural tree and the extracted events.

use jcal::{
    Component, DecodeError, Decoder, ErrorLayer, EventError, TimestampError, ValueKind, parse,
    parse_slice,
};
use jiff::Timestamp;
use serde_json::json;

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

/// Wrap `vevent` properties in a calendar document
fn calendar_with_event(properties: &str) -> String {
    format!(
        r#"["vcalendar",
            [["version", {{}}, "text", "2.0"], ["prodid", {{}}, "text", "-//Example//EN"]],
            [["vevent", [{properties}], []]]
        ]"#
    )
}

#[test]
fn decodes_rfc7265_example() {
    let src = r#"
["vcalendar",
  [
    ["calscale", {}, "text", "GREGORIAN"],
    ["prodid", {}, "text", "-//Example Inc.//Example Calendar//EN"],
    ["version", {}, "text", "2.0"]
  ],
  [
    ["vevent",
      [
        ["dtstamp", {}, "date-time", "2008-02-05T19:12:24Z"],
        ["dtstart", {}, "date", "2008-10-06"],
        ["dtend", {}, "date", "2008-10-07"],
        ["summary", {}, "text", "Planning meeting"],
        ["uid", {}, "text", "4088E990AD89CB3DBB484909"]
      ],
      []
    ]
  ]
]"#;

    let calendar = parse(src).unwrap();
    assert_eq!(calendar.name, "vcalendar");
    assert_eq!(calendar.properties.len(), 3);
    assert_eq!(calendar.properties[0].name, "calscale");
    assert_eq!(calendar.properties[0].values, vec![json!("GREGORIAN")]);
    assert_eq!(calendar.sub_components.len(), 1);
    assert_eq!(calendar.events.len(), 1);

    let event = &calendar.events[0];
    assert_eq!(event.summary, "Planning meeting");
    assert_eq!(event.uid.as_deref(), Some("4088E990AD89CB3DBB484909"));
    assert_eq!(event.dt_stamp, Some(ts("2008-02-05T19:12:24Z")));
    assert_eq!(event.dt_start, ts("2008-10-06T00:00:00Z"));
    assert_eq!(event.dt_end, ts("2008-10-07T00:00:00Z"));
    assert!(event.is_all_day);
}

#[test]
fn decodes_scenario_event() {
    let src = calendar_with_event(
        r#"["created", {}, "date-time", "2021-01-01T00:00:00Z"],
           ["dtstart", {}, "date-time", "2022-01-01T00:00:00Z"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );

    let calendar = parse(&src).unwrap();
    assert_eq!(calendar.events.len(), 1);

    let event = &calendar.events[0];
    assert_eq!(event.created, Some(ts("2021-01-01T00:00:00Z")));
    assert_eq!(event.dt_start, ts("2022-01-01T00:00:00Z"));
    assert_eq!(event.dt_end, ts("2022-01-01T11:11:11Z"));
    assert_eq!(event.summary, "Test Event");
    assert!(!event.is_all_day);
}

#[test]
fn keeps_parameters_and_unknown_properties() {
    let src = calendar_with_event(
        r#"["dtstart", {"tzid": "Europe/Berlin"}, "date-time", "2022-01-01T10:00:00+01:00"],
           ["dtend", {"tzid": "Europe/Berlin"}, "date-time", "2022-01-01T11:00:00+01:00"],
           ["summary", {"language": "de"}, "text", "Besprechung"],
           ["categories", {}, "text", "work", "meeting"],
           ["geo", {}, "float", [37.386013, -122.082932]]"#,
    );

    let calendar = parse(&src).unwrap();
    let vevent = &calendar.sub_components[0];
    assert_eq!(vevent.properties.len(), 5);

    let dtstart = vevent.property("dtstart").unwrap();
    assert_eq!(dtstart.parameter("tzid"), Some(&json!("Europe/Berlin")));
    assert_eq!(dtstart.type_name, "date-time");

    let categories = vevent.property("categories").unwrap();
    assert_eq!(categories.values, vec![json!("work"), json!("meeting")]);

    let geo = vevent.property("geo").unwrap();
    assert_eq!(geo.single_value(), Some(&json!([37.386013, -122.082932])));

    let event = &calendar.events[0];
    assert_eq!(event.dt_start, ts("2022-01-01T09:00:00Z"));
    assert_eq!(event.summary, "Besprechung");
}

#[test]
fn missing_dtstart_fails() {
    let src = calendar_with_event(
        r#"["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let err = parse(&src).unwrap_err();
    assert_eq!(err.layer(), ErrorLayer::Semantic);
    assert!(matches!(err.event_error(), Some(EventError::MissingDtStart)));
}

#[test]
fn missing_dtend_fails() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date-time", "2022-01-01T00:00:00Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let err = parse(&src).unwrap_err();
    assert!(matches!(err.event_error(), Some(EventError::MissingDtEnd)));
}

#[test]
fn missing_summary_fails() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date-time", "2022-01-01T00:00:00Z"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"]"#,
    );
    let err = parse(&src).unwrap_err();
    assert!(matches!(err.event_error(), Some(EventError::MissingSummary)));
}

#[test]
fn multi_valued_dtstart_fails() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date-time", "2022-01-01T00:00:00Z", "2022-01-02T00:00:00Z"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let err = parse(&src).unwrap_err();
    assert!(matches!(
        err.event_error(),
        Some(EventError::MultiValueNotAllowed { property, count: 2 }) if property == "dtstart"
    ));
}

#[test]
fn invalid_dtstart_names_property() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date-time", "invalid date"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let err = parse(&src).unwrap_err();
    match &err {
        DecodeError::Event {
            path,
            source: EventError::InvalidTimestamp { property, value, .. },
        } => {
            assert_eq!(path.to_string(), "#/2/0");
            assert_eq!(property, "dtstart");
            assert_eq!(value, "invalid date");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("'dtstart'"));
}

#[test]
fn loose_timestamp_forms_are_rejected() {
    for text in ["2022-01-01 00:00:00Z", "2022-01-01T00:00:00Z[UTC]", "2024-5-4"] {
        let src = calendar_with_event(&format!(
            r#"["dtstart", {{}}, "date-time", "{text}"],
               ["dtend", {{}}, "date-time", "2022-01-01T11:11:11Z"],
               ["summary", {{}}, "text", "Test Event"]"#
        ));
        let err = parse(&src).unwrap_err();
        assert!(
            matches!(
                err.event_error(),
                Some(EventError::InvalidTimestamp {
                    source: TimestampError::Format,
                    ..
                })
            ),
            "{text}: {err}"
        );
    }
}

#[test]
fn all_day_sticks_after_dtstart_is_overwritten() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date", "2024-05-04"],
           ["dtstart", {}, "date-time", "2024-05-04T09:00:00Z"],
           ["dtend", {}, "date-time", "2024-05-04T10:00:00Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let event = &parse(&src).unwrap().events[0];
    assert_eq!(event.dt_start, ts("2024-05-04T09:00:00Z"));
    assert!(event.is_all_day);
}

#[test]
fn non_text_summary_is_type_mismatch() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date-time", "2022-01-01T00:00:00Z"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", 42]"#,
    );
    let err = parse(&src).unwrap_err();
    assert!(matches!(
        err.event_error(),
        Some(EventError::TypeMismatch {
            property,
            expected: ValueKind::Text,
            found: ValueKind::Number,
        }) if property == "summary"
    ));
}

#[test]
fn fractional_sequence_truncates() {
    let src = calendar_with_event(
        r#"["sequence", {}, "integer", 1.9],
           ["dtstart", {}, "date-time", "2022-01-01T00:00:00Z"],
           ["dtend", {}, "date-time", "2022-01-01T11:11:11Z"],
           ["summary", {}, "text", "Test Event"]"#,
    );
    let calendar = parse(&src).unwrap();
    assert_eq!(calendar.events[0].sequence, 1);
}

#[test]
fn empty_vevent_is_distinct_from_missing_fields() {
    let empty = parse(&calendar_with_event("")).unwrap_err();
    assert!(matches!(empty.event_error(), Some(EventError::EmptyInput)));

    let unknown = parse(&calendar_with_event(r#"["x-foo", {}, "text", "bar"]"#)).unwrap_err();
    assert!(matches!(
        unknown.event_error(),
        Some(EventError::MissingDtStart)
    ));
}

#[test]
fn structural_errors_are_not_semantic() {
    let cases = [
        r#"["vcalendar", [], []"#,
        r#"["vcalendar", []]"#,
        r#"["vcalendar", [["summary", {}, "text"]], []]"#,
        r#"{"vcalendar": []}"#,
    ];
    for src in cases {
        let err = parse(src).unwrap_err();
        assert_eq!(err.layer(), ErrorLayer::Structural, "{src}: {err}");
        assert!(err.event_error().is_none());
    }
}

#[test]
fn parse_slice_matches_parse() {
    let src = calendar_with_event(
        r#"["dtstart", {}, "date", "2024-05-04"],
           ["dtend", {}, "date", "2024-05-05"],
           ["summary", {}, "text", "Holiday"]"#,
    );
    let from_str = parse(&src).unwrap();
    let from_bytes = parse_slice(src.as_bytes()).unwrap();
    assert_eq!(from_str, from_bytes);
    assert!(from_bytes.events[0].is_all_day);
}

#[test]
fn decoder_depth_limit_applies_to_text() {
    let src = r#"["a", [], [["b", [], [["c", [], []]]]]]"#;
    assert!(Decoder::new().with_max_depth(2).decode_str(src).is_ok());

    let err = Decoder::new().with_max_depth(1).decode_str(src).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::DepthLimitExceeded { limit: 1, .. }
    ));
}

#[test]
fn decodes_concurrently() {
    let docs: Vec<String> = (0..8)
        .map(|i| {
            calendar_with_event(&format!(
                r#"["dtstart", {{}}, "date-time", "2022-01-01T00:00:00Z"],
                   ["dtend", {{}}, "date-time", "2022-01-01T11:11:11Z"],
                   ["summary", {{}}, "text", "Event {i}"]"#
            ))
        })
        .collect();

    let decoder = Decoder::new();
    let summaries: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = docs
            .iter()
            .map(|doc| s.spawn(move || decoder.decode_str(doc).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().events[0].summary.clone())
            .collect()
    });

    for (i, summary) in summaries.iter().enumerate() {
        assert_eq!(summary, &format!("Event {i}"));
    }
}

#[test]
fn component_from_str() {
    let calendar: Component = r#"["vcalendar", [], [["vtodo", [], []]]]"#.parse().unwrap();
    assert_eq!(calendar.sub_components[0].name, "vtodo");
    assert!(calendar.events.is_empty());
    assert_eq!(calendar.iter_events().count(), 0);
}
