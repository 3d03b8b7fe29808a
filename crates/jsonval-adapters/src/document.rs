//! # Mixed-Backend Documents
//!
//! [`DocumentRef`] lets one schema parse span documents loaded by different
//! backends. Equality between a JSON node and a YAML node goes through the
//! default [`Adapter::equal_to`], which only uses the shared capabilities.

use jsonval_core::{Adapter, NodeKind};

use crate::json::JsonAdapter;
use crate::yaml::YamlAdapter;

/// A node from either a `serde_json` or a `serde_yaml` tree.
#[derive(Debug, Clone, Copy)]
pub enum DocumentRef<'a> {
    Json(JsonAdapter<'a>),
    Yaml(YamlAdapter<'a>),
}

impl<'a> From<&'a serde_json::Value> for DocumentRef<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        Self::Json(JsonAdapter::new(value))
    }
}

impl<'a> From<&'a serde_yaml::Value> for DocumentRef<'a> {
    fn from(value: &'a serde_yaml::Value) -> Self {
        Self::Yaml(YamlAdapter::new(value))
    }
}

macro_rules! delegate {
    ($self:ident, $node:ident => $body:expr) => {
        match $self {
            DocumentRef::Json($node) => $body,
            DocumentRef::Yaml($node) => $body,
        }
    };
}

impl<'a> Adapter for DocumentRef<'a> {
    fn kind(&self) -> NodeKind {
        delegate!(self, n => n.kind())
    }

    fn as_bool(&self) -> Option<bool> {
        delegate!(self, n => n.as_bool())
    }

    fn as_f64(&self) -> Option<f64> {
        delegate!(self, n => n.as_f64())
    }

    fn as_i64(&self) -> Option<i64> {
        delegate!(self, n => n.as_i64())
    }

    fn as_u64(&self) -> Option<u64> {
        delegate!(self, n => n.as_u64())
    }

    fn as_str(&self) -> Option<&str> {
        delegate!(self, n => n.as_str())
    }

    fn array_len(&self) -> Option<usize> {
        delegate!(self, n => n.array_len())
    }

    fn array_get(&self, index: usize) -> Option<Self> {
        match self {
            Self::Json(n) => n.array_get(index).map(Self::Json),
            Self::Yaml(n) => n.array_get(index).map(Self::Yaml),
        }
    }

    fn object_get(&self, key: &str) -> Option<Self> {
        match self {
            Self::Json(n) => n.object_get(key).map(Self::Json),
            Self::Yaml(n) => n.object_get(key).map(Self::Yaml),
        }
    }

    fn object_members(&self) -> Option<Vec<(String, Self)>> {
        match self {
            Self::Json(n) => Some(
                n.object_members()?
                    .into_iter()
                    .map(|(k, v)| (k, Self::Json(v)))
                    .collect(),
            ),
            Self::Yaml(n) => Some(
                n.object_members()?
                    .into_iter()
                    .map(|(k, v)| (k, Self::Yaml(v)))
                    .collect(),
            ),
        }
    }
}
