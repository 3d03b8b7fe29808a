//! # Frozen Values
//!
//! Owned, backend-independent snapshots of document nodes. The schema
//! graph outlives the documents it was parsed from, so literal keyword
//! values (`enum`, `const`) are frozen at parse time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adapter::{Adapter, NodeKind};

/// An owned copy of a JSON-like value.
///
/// Serializes to plain JSON. Object members are ordered by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrozenValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Array(Vec<FrozenValue>),
    Object(BTreeMap<String, FrozenValue>),
}

impl FrozenValue {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Integer(_) | Self::Unsigned(_) | Self::Float(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
        }
    }
}

/// Take an owned snapshot of `node` and everything below it.
///
/// Integers are kept exact when the backend can represent them as `i64` or
/// `u64`; other numbers become `Float`.
pub fn freeze<A: Adapter>(node: A) -> FrozenValue {
    match node.kind() {
        NodeKind::Null => FrozenValue::Null,
        NodeKind::Bool => node.as_bool().map_or(FrozenValue::Null, FrozenValue::Bool),
        NodeKind::Number => {
            if let Some(i) = node.as_i64() {
                FrozenValue::Integer(i)
            } else if let Some(u) = node.as_u64() {
                FrozenValue::Unsigned(u)
            } else {
                node.as_f64().map_or(FrozenValue::Null, FrozenValue::Float)
            }
        }
        NodeKind::String => FrozenValue::String(node.as_str().unwrap_or_default().to_string()),
        NodeKind::Array => {
            let len = node.array_len().unwrap_or(0);
            FrozenValue::Array((0..len).filter_map(|i| node.array_get(i)).map(freeze).collect())
        }
        NodeKind::Object => FrozenValue::Object(
            node.object_members()
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, freeze(v)))
                .collect(),
        ),
    }
}
