//! The generic configuration tree the codec reads and writes.
//!
//! The tree mirrors what a config-text parser produces: objects, arrays and
//! scalars. Object entries are ordered and may repeat a key; lookups return
//! the first match.

use serde_json::{Map, Number, Value};
use std::fmt;

/// A leaf value in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// An integer above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Render the scalar as text. Config scalars are strings at heart, so every
    /// scalar has a textual form; labels and string fields are read this way.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Unsigned(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }

    /// Short name of the scalar's kind, used in `TypeMismatch` errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Integer(_) | Scalar::Unsigned(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }
}

/// A configuration tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    /// Key-value pairs in insertion order.
    Object(Vec<(String, TreeValue)>),
    Array(Vec<TreeValue>),
    Scalar(Scalar),
}

impl TreeValue {
    /// An empty object.
    pub fn object() -> Self {
        TreeValue::Object(Vec::new())
    }

    pub fn null() -> Self {
        TreeValue::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        TreeValue::Scalar(Scalar::String(s.into()))
    }

    /// Look up the first entry under `key`. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set `key` to `value`, replacing the first existing entry in place or
    /// appending a new one. No-op on non-objects.
    pub fn insert(&mut self, key: impl Into<String>, value: TreeValue) {
        if let TreeValue::Object(entries) = self {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Builder form of [`TreeValue::insert`].
    pub fn with(mut self, key: impl Into<String>, value: TreeValue) -> Self {
        self.insert(key, value);
        self
    }

    /// The object's entries, or `None` if this is not an object.
    pub fn entries(&self) -> Option<&[(String, TreeValue)]> {
        match self {
            TreeValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TreeValue]> {
        match self {
            TreeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            TreeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Scalar(Scalar::Null))
    }

    /// Short name of the node's kind, used in `TypeMismatch` errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TreeValue::Object(_) => "object",
            TreeValue::Array(_) => "array",
            TreeValue::Scalar(s) => s.kind_name(),
        }
    }
}

impl From<Scalar> for TreeValue {
    fn from(s: Scalar) -> Self {
        TreeValue::Scalar(s)
    }
}

/// Convert from the JSON model. Relies on `serde_json`'s `preserve_order`
/// feature so object entries keep their source order.
impl From<Value> for TreeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TreeValue::Scalar(Scalar::Null),
            Value::Bool(b) => TreeValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => TreeValue::Scalar(number_to_scalar(&n)),
            Value::String(s) => TreeValue::Scalar(Scalar::String(s)),
            Value::Array(items) => TreeValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                TreeValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Convert into the JSON model. JSON objects cannot hold duplicate keys, so a
/// repeated key collapses to its last value while keeping the first position.
impl From<TreeValue> for Value {
    fn from(value: TreeValue) -> Self {
        match value {
            TreeValue::Scalar(s) => scalar_to_json(s),
            TreeValue::Array(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            TreeValue::Object(entries) => {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k, v.into());
                }
                Value::Object(map)
            }
        }
    }
}

fn number_to_scalar(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        return Scalar::Integer(i);
    }
    if let Some(u) = n.as_u64() {
        return Scalar::Unsigned(u);
    }
    match n.as_f64() {
        Some(f) => Scalar::Float(f),
        None => Scalar::String(n.to_string()),
    }
}

fn scalar_to_json(s: Scalar) -> Value {
    match s {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(b),
        Scalar::Integer(i) => Value::Number(i.into()),
        Scalar::Unsigned(u) => Value::Number(u.into()),
        // NaN and infinities have no JSON form
        Scalar::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Scalar::String(s) => Value::String(s),
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json: Value = self.clone().into();
        write!(f, "{json}")
    }
}
