//! # serde_json Backend

use jsonval_core::{Adapter, NodeKind};
use serde_json::Value;

/// Adapter over a borrowed `serde_json::Value`.
#[derive(Debug, Clone, Copy)]
pub struct JsonAdapter<'a> {
    value: &'a Value,
}

impl<'a> JsonAdapter<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The underlying value, with the lifetime of the original borrow.
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl<'a> From<&'a Value> for JsonAdapter<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

impl<'a> Adapter for JsonAdapter<'a> {
    fn kind(&self) -> NodeKind {
        match self.value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
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
        self.value.as_array().map(Vec::len)
    }

    fn array_get(&self, index: usize) -> Option<Self> {
        self.value.as_array()?.get(index).map(Self::new)
    }

    fn object_get(&self, key: &str) -> Option<Self> {
        self.value.as_object()?.get(key).map(Self::new)
    }

    fn object_members(&self) -> Option<Vec<(String, Self)>> {
        let map = self.value.as_object()?;
        Some(map.iter().map(|(k, v)| (k.clone(), Self::new(v))).collect())
    }

    fn object_len(&self) -> Option<usize> {
        self.value.as_object().map(serde_json::Map::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_accessors_do_not_coerce() {
        let doc = json!({"n": 3, "s": "3", "b": true});
        let root = JsonAdapter::new(&doc);
        let n = root.object_get("n").unwrap();
        let s = root.object_get("s").unwrap();
        assert_eq!(n.as_i64(), Some(3));
        assert_eq!(s.as_i64(), None);
        assert_eq!(s.as_str(), Some("3"));
        assert_eq!(root.object_get("b").unwrap().as_bool(), Some(true));
        assert_eq!(root.as_str(), None);
    }

    #[test]
    fn test_array_bounds_reporting() {
        let doc = json!([1, 2]);
        let root = JsonAdapter::new(&doc);
        assert_eq!(root.array_len(), Some(2));
        assert!(root.array_get(1).is_some());
        assert!(root.array_get(2).is_none());
        assert!(root.object_get("0").is_none());
    }

    #[test]
    fn test_value_keeps_original_borrow() {
        let doc = json!({"a": [1]});
        let inner = JsonAdapter::new(&doc).object_get("a").unwrap().value();
        assert!(std::ptr::eq(inner, &doc["a"]));
    }
}
