// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! jCal properties.
//!
//! A property is a positional array of at least four elements:
//!
//! ```txt
//! [name, parameters, type, value, value, ...]
//! ```

use serde_json::{Map, Value};

use crate::error::{DecodeError, Pointer};
use crate::keyword::KW_DATE;

/// A named, typed, possibly multi-valued property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name, e.g. `dtstart`
    pub name: String,

    /// Property parameters, values left untyped
    pub parameters: Map<String, Value>,

    /// Declared value type, e.g. `date-time` or `date`
    pub type_name: String,

    /// Values in source order, at least one for decoded properties
    pub values: Vec<Value>,
}

impl Property {
    /// Create a property without parameters.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: Map::new(),
            type_name: type_name.into(),
            values: values.into_iter().collect(),
        }
    }

    /// The only value of this property, if it has exactly one.
    #[must_use]
    pub fn single_value(&self) -> Option<&Value> {
        match self.values.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Whether the property is declared with the date-only value type.
    #[must_use]
    pub fn is_date_only(&self) -> bool {
        self.type_name == KW_DATE
    }

    pub(crate) fn decode(value: &Value, path: &Pointer) -> Result<Self, DecodeError> {
        let Value::Array(elements) = value else {
            return Err(DecodeError::property(path, "expected an array"));
        };

        let (name, parameters, type_name, values) = match elements.as_slice() {
            [name, parameters, type_name, values @ ..] if !values.is_empty() => {
                (name, parameters, type_name, values)
            }
            _ => {
                return Err(DecodeError::property(
                    path,
                    format!("expected at least 4 elements, found {}", elements.len()),
                ));
            }
        };

        let Value::String(name) = name else {
            return Err(DecodeError::property(path, "name must be a string"));
        };
        let Value::Object(parameters) = parameters else {
            return Err(DecodeError::property(
                path,
                format!("parameters of '{name}' must be an object"),
            ));
        };
        let Value::String(type_name) = type_name else {
            return Err(DecodeError::property(
                path,
                format!("type of '{name}' must be a string"),
            ));
        };

        Ok(Self {
            name: name.clone(),
            parameters: parameters.clone(),
            type_name: type_name.clone(),
            values: values.to_vec(),
        })
    }
}

impl TryFrom<&Value> for Property {
    type Error = DecodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::decode(value, &Pointer::root())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_single_value() {
        let prop =
            Property::try_from(&json!(["dtstart", {"tzid": "Europe/Berlin"}, "date", "2024-05-04"]))
                .unwrap();
        assert_eq!(prop.name, "dtstart");
        assert_eq!(prop.type_name, "date");
        assert!(prop.is_date_only());
        assert_eq!(prop.values, vec![json!("2024-05-04")]);
        assert_eq!(prop.single_value(), Some(&json!("2024-05-04")));
        assert_eq!(prop.parameter("tzid"), Some(&json!("Europe/Berlin")));
        assert_eq!(prop.parameter("language"), None);
    }

    #[test]
    fn keeps_values_untyped_and_ordered() {
        let prop = Property::try_from(&json!([
            "x-mixed",
            {},
            "unknown",
            "a",
            1,
            1.5,
            true,
            null,
            [1, 2],
            {"k": "v"}
        ]))
        .unwrap();
        assert_eq!(prop.values.len(), 7);
        assert_eq!(prop.values[0], json!("a"));
        assert_eq!(prop.values[4], json!(null));
        assert_eq!(prop.values[6], json!({"k": "v"}));
        assert!(prop.single_value().is_none());
    }

    #[test]
    fn rejects_fewer_than_four_elements() {
        for input in [json!([]), json!(["summary"]), json!(["summary", {}, "text"])] {
            let err = Property::try_from(&input).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedProperty { .. }),
                "unexpected error for {input}: {err}"
            );
        }
    }

    #[test]
    fn rejects_non_array() {
        let err = Property::try_from(&json!({"name": "summary"})).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedProperty { .. }));
    }

    #[test]
    fn rejects_wrong_element_types() {
        let cases = [
            json!([1, {}, "text", "x"]),
            json!(["summary", [], "text", "x"]),
            json!(["summary", null, "text", "x"]),
            json!(["summary", {}, 3, "x"]),
        ];
        for input in cases {
            let err = Property::try_from(&input).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedProperty { .. }),
                "unexpected error for {input}: {err}"
            );
        }
    }

    #[test]
    fn error_carries_location() {
        let path = Pointer::root().child(1).child(4);
        let err = Property::decode(&json!(["summary", {}, "text"]), &path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed property at #/1/4: expected at least 4 elements, found 3"
        );
    }
}
