//! Ordered-fallback field access on JSON objects
//!
//! Producers have not always agreed on key casing, so every lookup takes a
//! priority list of aliases: the first alias holding a value of the right
//! type wins, and a value of the wrong type counts as absent.

use alloc::string::String;
use serde_json::{Map, Value};

/// Read-only view of a JSON object with alias-aware typed getters
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// View `value` as an object, if it is one
    pub fn of(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// First numeric value among `keys`
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(Value::as_f64)
    }

    /// Numeric value or `fallback`
    pub fn number_or(&self, keys: &[&str], fallback: f64) -> f64 {
        self.number(keys).unwrap_or(fallback)
    }

    /// Numeric value rounded to the nearest integer, or `fallback`
    pub fn int_or(&self, keys: &[&str], fallback: i32) -> i32 {
        match self.number(keys) {
            Some(n) => libm::round(n) as i32,
            None => fallback,
        }
    }

    /// First string value among `keys`
    pub fn text(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(Value::as_str)
    }

    /// String value or `fallback`
    pub fn text_or(&self, keys: &[&str], fallback: &'a str) -> &'a str {
        self.text(keys).unwrap_or(fallback)
    }

    /// First non-empty string value among `keys`
    pub fn non_empty_text(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .filter_map(Value::as_str)
            .find(|s| !s.is_empty())
    }

    /// First boolean among `keys`; numbers count as true when non-zero
    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(|value| match value {
                Value::Bool(b) => Some(*b),
                Value::Number(n) => n.as_f64().map(|n| n != 0.0),
                _ => None,
            })
    }

    /// Boolean value or `fallback`
    pub fn flag_or(&self, keys: &[&str], fallback: bool) -> bool {
        self.flag(keys).unwrap_or(fallback)
    }

    /// First array among `keys`
    pub fn array(&self, keys: &[&str]) -> Option<&'a [Value]> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(|value| value.as_array().map(|a| a.as_slice()))
    }

    /// First object among `keys`
    pub fn object(&self, keys: &[&str]) -> Option<Fields<'a>> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(Fields::of)
    }

    /// Whether any of `keys` is present, whatever its type
    pub fn contains(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.map.contains_key(*key))
    }
}
