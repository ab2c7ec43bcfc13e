//! Instances of structured types.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::{StructuredType, TypeRef};
use crate::value::{DynamicBag, Value};

/// A live object of some [`StructuredType`].
///
/// Holds one slot per property of the type's whole chain, initialized to the
/// declared defaults.
#[derive(Debug, Clone)]
pub struct StructuredValue {
    ty: TypeRef,
    fields: IndexMap<String, Value>,
}

impl StructuredValue {
    /// Default-constructs an instance.
    pub fn new(ty: &TypeRef) -> Self {
        let fields = ty
            .properties()
            .into_iter()
            .map(|p| (p.name().to_string(), p.default_value()))
            .collect();
        Self {
            ty: Arc::clone(ty),
            fields,
        }
    }

    /// Builder-style field assignment; unknown names are ignored.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }

    pub fn structured_type(&self) -> &TypeRef {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Writes a declared slot. Returns `false` when the type has no such
    /// property.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The open-type bag, if the type is open and the bag exists.
    pub fn dynamic_properties(&self) -> Option<&DynamicBag> {
        let prop = self.ty.dynamic_property()?;
        self.fields.get(prop.name()).and_then(Value::as_open)
    }

    /// The open-type bag, created on demand when `create` is set.
    pub fn dynamic_properties_mut(&mut self, create: bool) -> Option<&mut DynamicBag> {
        let name = self.ty.dynamic_property()?.name().to_string();
        let slot = self.fields.get_mut(&name)?;
        if create && !matches!(slot, Value::Open(_)) {
            *slot = Value::Open(DynamicBag::new());
        }
        slot.as_open_mut()
    }

    /// True when this is an instance of `ty` itself (not a derived type).
    pub fn is_exactly(&self, ty: &StructuredType) -> bool {
        self.ty.is_same(ty)
    }
}

impl PartialEq for StructuredValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.fields == other.fields
    }
}
