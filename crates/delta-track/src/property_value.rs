//! Values written to and read from a delta.

use delta_track_model::{StructuredValue, Value};

use crate::delta::Delta;
use crate::delta_set::DeltaSet;

/// What a caller may write into a property: a plain value, or a nested
/// change record for a structural property.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Value(Value),
    Delta(Box<Delta>),
    DeltaSet(DeltaSet),
}

/// Borrowed view of a tracked property.
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    Value(&'a Value),
    Delta(&'a Delta),
    DeltaSet(&'a DeltaSet),
}

impl<'a> PropertyRef<'a> {
    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            PropertyRef::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_delta(&self) -> Option<&'a Delta> {
        match *self {
            PropertyRef::Delta(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_delta_set(&self) -> Option<&'a DeltaSet> {
        match *self {
            PropertyRef::DeltaSet(s) => Some(s),
            _ => None,
        }
    }
}

/// A structural property whose change is itself a delta.
#[derive(Debug, Clone)]
pub enum NestedResource {
    Delta(Box<Delta>),
    DeltaSet(DeltaSet),
}

impl NestedResource {
    pub fn as_property_ref(&self) -> PropertyRef<'_> {
        match self {
            NestedResource::Delta(d) => PropertyRef::Delta(d),
            NestedResource::DeltaSet(s) => PropertyRef::DeltaSet(s),
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(v: Value) -> Self {
        PropertyValue::Value(v)
    }
}

impl From<Delta> for PropertyValue {
    fn from(d: Delta) -> Self {
        PropertyValue::Delta(Box::new(d))
    }
}

impl From<DeltaSet> for PropertyValue {
    fn from(s: DeltaSet) -> Self {
        PropertyValue::DeltaSet(s)
    }
}

macro_rules! property_value_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for PropertyValue {
                fn from(v: $t) -> Self {
                    PropertyValue::Value(Value::from(v))
                }
            }
        )*
    };
}

property_value_from!(bool, i32, i64, f64, &str, String, StructuredValue, Vec<Value>);
