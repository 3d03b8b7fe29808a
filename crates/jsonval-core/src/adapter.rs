//! # Document Adapter
//!
//! The capability interface over an opaque document node. Concrete
//! backends (serde_json, serde_yaml, ...) implement [`Adapter`] once, outside
//! the core; the pointer resolver and the schema parser only ever see this
//! trait.
//!
//! ## Ownership
//!
//! An adapter is a cheap `Copy` handle that *observes* an externally owned
//! tree. Node identity is stable for as long as the borrow lives, and the
//! underlying tree is never mutated through an adapter.

use serde::{Deserialize, Serialize};

/// The kind of a document node, as seen through an [`Adapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    /// Whether a JSON Pointer can descend into a node of this kind.
    pub fn is_traversable(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}

/// The type names used by the JSON Schema `type` keyword.
///
/// Differs from [`NodeKind`] in that `integer` is a distinct name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Parse a `type` keyword entry. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// The keyword spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one node in a JSON-like document.
///
/// Implementations must be cheap to copy: the pointer resolver and the
/// schema parser pass adapters by value while walking a tree.
///
/// # Contract
///
/// - Scalar accessors return `None` when the node is of another kind. They
///   never coerce (a string `"1"` has no `as_f64`).
/// - `array_get` reports out-of-bounds access as `None`.
/// - `object_get` reports a missing member as `None`.
/// - `object_members` preserves the backend's member order.
pub trait Adapter: Copy {
    /// The kind of this node.
    fn kind(&self) -> NodeKind;

    fn as_bool(&self) -> Option<bool>;

    /// Numeric value as a float. Defined for every number node.
    fn as_f64(&self) -> Option<f64>;

    /// Numeric value as a signed integer, when representable exactly.
    fn as_i64(&self) -> Option<i64>;

    /// Numeric value as an unsigned integer, when representable exactly.
    fn as_u64(&self) -> Option<u64>;

    fn as_str(&self) -> Option<&str>;

    /// Number of elements, or `None` if this node is not an array.
    fn array_len(&self) -> Option<usize>;

    /// Element at `index`, or `None` if this is not an array or the index
    /// is out of bounds.
    fn array_get(&self, index: usize) -> Option<Self>;

    /// Member named `key`, or `None` if this is not an object or the member
    /// is absent.
    fn object_get(&self, key: &str) -> Option<Self>;

    /// All members of an object in backend order, or `None` if this node is
    /// not an object.
    fn object_members(&self) -> Option<Vec<(String, Self)>>;

    /// Number of members, or `None` if this node is not an object.
    fn object_len(&self) -> Option<usize> {
        self.object_members().map(|m| m.len())
    }

    fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }

    fn is_array(&self) -> bool {
        self.kind() == NodeKind::Array
    }

    fn is_object(&self) -> bool {
        self.kind() == NodeKind::Object
    }

    /// Whether this node is a number with no fractional part.
    fn is_integer(&self) -> bool {
        if self.as_i64().is_some() || self.as_u64().is_some() {
            return true;
        }
        self.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
    }

    /// Compare two nodes for equality.
    ///
    /// With `strict_types`, nodes of different kinds are never equal. Without
    /// it, a string may equal a boolean (`"true"`/`"false"`), a number it
    /// parses to, or `null` (when empty). Numbers always compare numerically,
    /// so `1` equals `1.0`. Object member order is irrelevant.
    fn equal_to(&self, other: &Self, strict_types: bool) -> bool {
        match (self.kind(), other.kind()) {
            (NodeKind::Null, NodeKind::Null) => true,
            (NodeKind::Bool, NodeKind::Bool) => self.as_bool() == other.as_bool(),
            (NodeKind::Number, NodeKind::Number) => numbers_equal(self, other),
            (NodeKind::String, NodeKind::String) => self.as_str() == other.as_str(),
            (NodeKind::Array, NodeKind::Array) => {
                let (Some(len), Some(other_len)) = (self.array_len(), other.array_len()) else {
                    return false;
                };
                len == other_len
                    && (0..len).all(|i| match (self.array_get(i), other.array_get(i)) {
                        (Some(a), Some(b)) => a.equal_to(&b, strict_types),
                        _ => false,
                    })
            }
            (NodeKind::Object, NodeKind::Object) => {
                let (Some(members), Some(other_len)) = (self.object_members(), other.object_len())
                else {
                    return false;
                };
                members.len() == other_len
                    && members.iter().all(|(key, value)| {
                        other
                            .object_get(key)
                            .is_some_and(|o| value.equal_to(&o, strict_types))
                    })
            }
            _ if strict_types => false,
            (NodeKind::String, _) => loosely_equal(self, other),
            (_, NodeKind::String) => loosely_equal(other, self),
            _ => false,
        }
    }
}

fn numbers_equal<A: Adapter>(a: &A, b: &A) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Non-strict comparison of a string node against a scalar of another kind.
fn loosely_equal<A: Adapter>(string: &A, other: &A) -> bool {
    let Some(s) = string.as_str() else {
        return false;
    };
    match other.kind() {
        NodeKind::Null => s.is_empty(),
        NodeKind::Bool => match s {
            "true" => other.as_bool() == Some(true),
            "false" => other.as_bool() == Some(false),
            _ => false,
        },
        NodeKind::Number => match (s.trim().parse::<f64>(), other.as_f64()) {
            (Ok(parsed), Some(n)) => parsed == n,
            _ => false,
        },
        _ => false,
    }
}
