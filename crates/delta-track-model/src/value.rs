//! Property values.
//!
//! `Value` is the closed set of shapes a structured property (or an entry of
//! an open-type bag) can hold.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::instance::StructuredValue;

/// Ordered string-keyed bag backing open-type (dynamic) properties.
pub type DynamicBag = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Collection(Vec<Value>),
    Structured(StructuredValue),
    Open(DynamicBag),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredValue> {
        match self {
            Value::Structured(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_structured_mut(&mut self) -> Option<&mut StructuredValue> {
        match self {
            Value::Structured(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_open(&self) -> Option<&DynamicBag> {
        match self {
            Value::Open(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut DynamicBag> {
        match self {
            Value::Open(bag) => Some(bag),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Collection(_) => "collection",
            Value::Structured(_) => "structured",
            Value::Open(_) => "open",
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<StructuredValue> for Value {
    fn from(v: StructuredValue) -> Self {
        Value::Structured(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Collection(items)
    }
}

impl From<DynamicBag> for Value {
    fn from(bag: DynamicBag) -> Self {
        Value::Open(bag)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// JSON objects become open bags; numbers that fit `i64` stay integers.
impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            JsonValue::String(s) => Value::Str(s),
            JsonValue::Array(items) => {
                Value::Collection(items.into_iter().map(Value::from).collect())
            }
            JsonValue::Object(map) => {
                Value::Open(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
