//! Image metadata and per-element overrides.
//!
//! Metadata comes in three layers. Built-in [`Options`] give every recognized
//! property a value, the document supplies global metadata, and entries keyed
//! by an element index override the globals for that one element. Later
//! layers win on key conflicts.
//!
//! Keys the resolver does not recognize (titles, authors, notes) are carried
//! along untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::warn;

/// Names of the recognized options.
pub mod keys {
    pub const FILL: &str = "fill";
    pub const STROKE: &str = "stroke";
    pub const STROKE_WIDTH: &str = "stroke_width";
    pub const OPEN: &str = "open";
    pub const ALIASED: &str = "aliased";
}

/// Built-in defaults for the recognized options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub open: bool,
    pub aliased: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fill: "black".to_string(),
            stroke: "black".to_string(),
            stroke_width: 1.0,
            open: false,
            aliased: false,
        }
    }
}

impl Options {
    /// The options as a metadata layer.
    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert(keys::FILL, Value::from(self.fill.as_str()));
        meta.insert(keys::STROKE, Value::from(self.stroke.as_str()));
        meta.insert(keys::STROKE_WIDTH, Value::from(self.stroke_width));
        meta.insert(keys::OPEN, Value::from(self.open));
        meta.insert(keys::ALIASED, Value::from(self.aliased));
        meta
    }
}

/// A set of named properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Looks up a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a property, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a property.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every property of `other` over this set.
    pub fn merge(&mut self, other: &Metadata) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns this set with `other` merged on top.
    pub fn merged(&self, other: &Metadata) -> Metadata {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    pub fn fill(&self) -> Option<&str> {
        self.get(keys::FILL).and_then(Value::as_str)
    }

    pub fn stroke(&self) -> Option<&str> {
        self.get(keys::STROKE).and_then(Value::as_str)
    }

    pub fn stroke_width(&self) -> Option<f64> {
        self.get(keys::STROKE_WIDTH).and_then(Value::as_f64)
    }

    /// The open-path flag; absent or non-boolean reads as closed.
    pub fn is_open(&self) -> bool {
        self.get(keys::OPEN).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The aliased flag; absent or non-boolean reads as anti-aliased.
    pub fn is_aliased(&self) -> bool {
        self.get(keys::ALIASED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl FromIterator<(String, Value)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-element property overrides, keyed by element index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(BTreeMap<usize, Metadata>);

impl Overrides {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The override set for one element, if any.
    pub fn get(&self, index: usize) -> Option<&Metadata> {
        self.0.get(&index)
    }

    /// Adds properties for an element, on top of any already there.
    pub fn insert(&mut self, index: usize, properties: Metadata) {
        self.0.entry(index).or_default().merge(&properties);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over overrides in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Metadata)> {
        self.0.iter().map(|(i, m)| (*i, m))
    }

    /// Merges `other` on top, property by property.
    pub fn merge(&mut self, other: &Overrides) {
        for (index, properties) in other.iter() {
            self.insert(index, properties.clone());
        }
    }
}

/// Metadata as supplied by a document or caller, split into its layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentMetadata {
    pub global: Metadata,
    pub overrides: Overrides,
}

impl DocumentMetadata {
    /// Splits a raw mapping into global metadata and per-index overrides.
    ///
    /// Keys that are non-negative integers (or strings of ASCII digits) select
    /// an element and must map to a property mapping. Any other scalar key is
    /// global metadata, stringified if needed.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let mut out = Self::default();

        for (key, value) in mapping {
            match classify_key(key) {
                Some(Key::Index(index)) => match value {
                    Value::Mapping(properties) => {
                        out.overrides.insert(index, properties_of(properties));
                    }
                    _ => warn!(index, "ignoring element override that is not a mapping"),
                },
                Some(Key::Name(name)) => {
                    out.global.insert(name, value.clone());
                }
                None => warn!(?key, "ignoring metadata entry with a non-scalar key"),
            }
        }

        out
    }

    /// Merges `other` on top of this metadata, layer by layer.
    pub fn merge(&mut self, other: &DocumentMetadata) {
        self.global.merge(&other.global);
        self.overrides.merge(&other.overrides);
    }
}

impl From<&Mapping> for DocumentMetadata {
    fn from(mapping: &Mapping) -> Self {
        Self::from_mapping(mapping)
    }
}

/// Combines defaults with document-level metadata.
pub fn resolve(defaults: &Options, global: &Metadata) -> Metadata {
    defaults.to_metadata().merged(global)
}

/// The effective properties for one element.
pub fn effective(resolved: &Metadata, overrides: &Overrides, index: usize) -> Metadata {
    match overrides.get(index) {
        Some(properties) => resolved.merged(properties),
        None => resolved.clone(),
    }
}

enum Key {
    Index(usize),
    Name(String),
}

fn classify_key(key: &Value) -> Option<Key> {
    match key {
        Value::Number(n) => match n.as_u64() {
            Some(index) => Some(Key::Index(index as usize)),
            None => Some(Key::Name(n.to_string())),
        },
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            match s.parse::<usize>() {
                Ok(index) => Some(Key::Index(index)),
                Err(_) => Some(Key::Name(s.clone())),
            }
        }
        _ => scalar_name(key).map(Key::Name),
    }
}

fn scalar_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Properties inside an override; nested keys are always names.
fn properties_of(mapping: &Mapping) -> Metadata {
    mapping
        .iter()
        .filter_map(|(key, value)| match scalar_name(key) {
            Some(name) => Some((name, value.clone())),
            None => {
                warn!(?key, "ignoring override property with a non-scalar key");
                None
            }
        })
        .collect()
}
