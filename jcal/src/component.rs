// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! jCal components and the structural decoder.
//!
//! A component is a positional array of exactly three elements:
//!
//! ```txt
//! [name, [property, ...], [component, ...]]
//! ```
//!
//! Decoding is bottom-up: every subcomponent is fully decoded before the
//! `vevent` children of a component are mapped onto its [`Event`] list.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{DecodeError, Pointer};
use crate::event::Event;
use crate::keyword::KW_VEVENT;
use crate::property::Property;

/// Default limit on component nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// A named container of properties and nested components.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component name, e.g. `vcalendar`
    pub name: String,

    /// Properties in source order, duplicates allowed
    pub properties: Vec<Property>,

    /// Nested components in source order
    pub sub_components: Vec<Component>,

    /// Events extracted from the `vevent` subcomponents, in source order
    pub events: Vec<Event>,
}

impl Component {
    /// Whether this is a `vevent` component.
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.name == KW_VEVENT
    }

    /// The last property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().rev().find(|p| p.name == name)
    }

    /// All properties with the given name, in source order.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties.iter().filter(move |p| p.name == name)
    }

    /// All direct subcomponents with the given name, in source order.
    pub fn components_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> {
        self.sub_components.iter().filter(move |c| c.name == name)
    }

    /// Events of this component and all of its descendants, depth first.
    #[must_use]
    pub fn iter_events(&self) -> EventIter<'_> {
        EventIter {
            stack: self.sub_components.iter().rev().collect(),
            current: self.events.iter(),
        }
    }
}

impl FromStr for Component {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decoder::new().decode_str(s)
    }
}

impl TryFrom<&Value> for Component {
    type Error = DecodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Decoder::new().decode_value(value)
    }
}

/// Depth-first iterator over the events of a component tree.
#[derive(Debug)]
pub struct EventIter<'a> {
    stack: Vec<&'a Component>,
    current: std::slice::Iter<'a, Event>,
}

impl<'a> Iterator for EventIter<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.current.next() {
                return Some(event);
            }

            let component = self.stack.pop()?;
            self.current = component.events.iter();
            self.stack.extend(component.sub_components.iter().rev());
        }
    }
}

/// Options for decoding jCal documents.
///
/// A decoder holds no state between calls; one value can decode any number
/// of independent inputs, from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder with the default depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the deepest component nesting accepted. The root is depth 0.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decode a jCal document from text.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the text is not JSON, is not shaped like
    /// jCal, or contains an invalid `vevent`.
    pub fn decode_str(&self, src: &str) -> Result<Component, DecodeError> {
        let value: Value = serde_json::from_str(src)?;
        self.decode_value(&value)
    }

    /// Decode a jCal document from raw bytes.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_str`].
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Component, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode_value(&value)
    }

    /// Decode a jCal document that has already been parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the value is not shaped like jCal or
    /// contains an invalid `vevent`.
    pub fn decode_value(&self, value: &Value) -> Result<Component, DecodeError> {
        let component = self.decode_component(value, &Pointer::root(), 0)?;
        tracing::debug!(
            component = %component.name,
            properties = component.properties.len(),
            sub_components = component.sub_components.len(),
            events = component.events.len(),
            "decoded jCal document"
        );
        Ok(component)
    }

    fn decode_component(
        &self,
        value: &Value,
        path: &Pointer,
        depth: usize,
    ) -> Result<Component, DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                path: path.clone(),
                limit: self.max_depth,
            });
        }

        let Value::Array(elements) = value else {
            return Err(DecodeError::component(path, "expected an array"));
        };
        let [name, properties, sub_components] = elements.as_slice() else {
            return Err(DecodeError::component(
                path,
                format!("expected 3 elements, found {}", elements.len()),
            ));
        };

        let Value::String(name) = name else {
            return Err(DecodeError::component(path, "name must be a string"));
        };
        let Value::Array(properties) = properties else {
            return Err(DecodeError::component(
                path,
                format!("properties of '{name}' must be an array"),
            ));
        };
        let Value::Array(sub_components) = sub_components else {
            return Err(DecodeError::component(
                path,
                format!("subcomponents of '{name}' must be an array"),
            ));
        };

        let props_path = path.child(1);
        let properties = properties
            .iter()
            .enumerate()
            .map(|(i, prop)| Property::decode(prop, &props_path.child(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let subs_path = path.child(2);
        let sub_components = sub_components
            .iter()
            .enumerate()
            .map(|(i, comp)| self.decode_component(comp, &subs_path.child(i), depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let mut events = Vec::new();
        for (i, comp) in sub_components.iter().enumerate() {
            if !comp.is_event() {
                continue;
            }

            let event =
                Event::from_properties(&comp.properties).map_err(|source| DecodeError::Event {
                    path: subs_path.child(i),
                    source,
                })?;
            tracing::debug!(parent = %name, summary = %event.summary, "extracted event");
            events.push(event);
        }

        Ok(Component {
            name: name.clone(),
            properties,
            sub_components,
            events,
        })
    }
}
