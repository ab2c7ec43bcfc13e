//! Declared property metadata.

use crate::value::{DynamicBag, Value};

/// Static type of a declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    /// Untyped slot; accepts any non-null value.
    Any,
    Bool,
    Int,
    Float,
    Str,
    /// A structured (complex or entity) value of the named type or a type
    /// derived from it.
    Structured(String),
    Collection(Box<PropertyType>),
    /// Open-type bag of dynamic properties.
    Dictionary,
}

impl PropertyType {
    pub fn structured(name: impl Into<String>) -> Self {
        Self::Structured(name.into())
    }

    pub fn collection_of(element: PropertyType) -> Self {
        Self::Collection(Box::new(element))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Self::Dictionary)
    }

    /// Name of the structured type this property (or its element) holds.
    pub fn structured_name(&self) -> Option<&str> {
        match self {
            Self::Structured(name) => Some(name),
            Self::Collection(element) => element.structured_name(),
            _ => None,
        }
    }

    /// Whether `null` is a natural value for this type when nullability is
    /// not declared explicitly.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::Any | Self::Str | Self::Structured(_) | Self::Collection(_) | Self::Dictionary
        )
    }

    /// Zero value of a non-nullable property of this type.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Any | Self::Structured(_) => Value::Null,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
            Self::Collection(_) => Value::Collection(Vec::new()),
            Self::Dictionary => Value::Open(DynamicBag::new()),
        }
    }

    /// Returns the value converted to this type, or hands the value back
    /// when it is not compatible. `Null` is never handled here.
    pub fn coerce(&self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (Self::Any, v) => Ok(v),
            (Self::Bool, v @ Value::Bool(_)) => Ok(v),
            (Self::Int, v @ Value::Int(_)) => Ok(v),
            (Self::Float, v @ Value::Float(_)) => Ok(v),
            (Self::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (Self::Str, v @ Value::Str(_)) => Ok(v),
            (Self::Collection(_), v @ Value::Collection(_)) => Ok(v),
            (Self::Dictionary, v @ Value::Open(_)) => Ok(v),
            (Self::Structured(name), Value::Structured(s)) => {
                if s.structured_type().derives_from(name) {
                    Ok(Value::Structured(s))
                } else {
                    Err(Value::Structured(s))
                }
            }
            (_, v) => Err(v),
        }
    }

    /// Runtime type of a value stored in an open-type bag.
    pub fn of_value(value: &Value) -> Option<PropertyType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Bool),
            Value::Int(_) => Some(Self::Int),
            Value::Float(_) => Some(Self::Float),
            Value::Str(_) => Some(Self::Str),
            Value::Collection(items) => {
                let element = items.iter().find_map(Self::of_value).unwrap_or(Self::Any);
                Some(Self::collection_of(element))
            }
            Value::Structured(s) => Some(Self::structured(s.type_name())),
            Value::Open(_) => Some(Self::Dictionary),
        }
    }
}

/// One declared property of a structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    name: String,
    property_type: PropertyType,
    nullable: bool,
    readable: bool,
    writable: bool,
    default: Option<Value>,
}

impl PropertyDef {
    /// Nullability defaults to whether the type is reference-like.
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        let nullable = property_type.is_reference();
        Self {
            name: name.into(),
            property_type,
            nullable,
            readable: true,
            writable: true,
            default: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Drops the setter.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Drops the getter.
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Value a freshly constructed instance holds for this property.
    pub fn default_value(&self) -> Value {
        if let Some(v) = &self.default {
            return v.clone();
        }
        if self.nullable {
            Value::Null
        } else {
            self.property_type.zero_value()
        }
    }

    /// Checks `value` against the declared type and nullability.
    ///
    /// Collection and `Any` properties accept any sequence without inspecting
    /// its element type; other properties never hold a collection.
    pub fn coerce(&self, value: Value) -> Result<Value, Value> {
        match value {
            Value::Null if self.nullable => Ok(Value::Null),
            Value::Null => Err(Value::Null),
            v => self.property_type.coerce(v),
        }
    }
}
