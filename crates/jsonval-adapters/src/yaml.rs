//! # serde_yaml Backend
//!
//! YAML is a superset of JSON's data model. The adapter exposes the
//! JSON-compatible subset:
//!
//! - tagged values (`!Tag value`) are seen as their inner value;
//! - mapping keys that are strings, numbers, or booleans are stringified;
//! - mapping keys that are null, sequences, or mappings are skipped.

use jsonval_core::{Adapter, NodeKind};
use serde_yaml::{Mapping, Value};

/// Adapter over a borrowed `serde_yaml::Value`.
#[derive(Debug, Clone, Copy)]
pub struct YamlAdapter<'a> {
    value: &'a Value,
}

impl<'a> YamlAdapter<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: untag(value) }
    }

    /// The underlying value with any tags stripped.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    fn mapping(&self) -> Option<&'a Mapping> {
        self.value.as_mapping()
    }
}

impl<'a> From<&'a Value> for YamlAdapter<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// The JSON member name for a YAML mapping key, if it has one.
fn key_string(key: &Value) -> Option<String> {
    match untag(key) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<'a> Adapter for YamlAdapter<'a> {
    fn kind(&self) -> NodeKind {
        match self.value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Sequence(_) => NodeKind::Array,
            Value::Mapping(_) => NodeKind::Object,
            // Unreachable after `untag`, but a tag around nothing is null.
            Value::Tagged(_) => NodeKind::Null,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    fn array_len(&self) -> Option<usize> {
        self.value.as_sequence().map(Vec::len)
    }

    fn array_get(&self, index: usize) -> Option<Self> {
        self.value.as_sequence()?.get(index).map(Self::new)
    }

    fn object_get(&self, key: &str) -> Option<Self> {
        let mapping = self.mapping()?;
        if let Some(value) = mapping.get(key) {
            return Some(Self::new(value));
        }
        mapping
            .iter()
            .find(|(k, _)| !k.is_string() && key_string(k).as_deref() == Some(key))
            .map(|(_, v)| Self::new(v))
    }

    fn object_members(&self) -> Option<Vec<(String, Self)>> {
        let mapping = self.mapping()?;
        Some(
            mapping
                .iter()
                .filter_map(|(k, v)| key_string(k).map(|k| (k, Self::new(v))))
                .collect(),
        )
    }
}
