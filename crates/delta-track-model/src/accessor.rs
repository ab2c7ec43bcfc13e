//! Cached per-property get/set strategies.
//!
//! Every [`StructuredType`] lazily builds one [`AccessorMap`] the first time
//! it is asked for it. The map is shared read-only afterwards, so any number
//! of deltas over the same type reuse it without locking.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::ModelError;
use crate::instance::StructuredValue;
use crate::types::{PropertyDef, PropertyType, StructuredType, TypeRef};
use crate::value::Value;

/// Property name → accessor, inherited properties first.
pub type AccessorMap = IndexMap<String, PropertyAccessor>;

static NULL: Value = Value::Null;

/// Get/set strategy bound to one property of a structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccessor {
    def: PropertyDef,
    declaring_type: String,
}

impl PropertyAccessor {
    /// Fails when the property has no getter, or has no setter and is not a
    /// collection (collections are refilled in place instead).
    pub fn new(declaring_type: &str, def: &PropertyDef) -> Result<Self, ModelError> {
        if !def.is_readable() {
            return Err(ModelError::MissingGetter {
                type_name: declaring_type.to_string(),
                property: def.name().to_string(),
            });
        }
        if !def.is_writable() && !def.property_type().is_collection() {
            return Err(ModelError::MissingSetter {
                type_name: declaring_type.to_string(),
                property: def.name().to_string(),
            });
        }
        Ok(Self {
            def: def.clone(),
            declaring_type: declaring_type.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn property(&self) -> &PropertyDef {
        &self.def
    }

    pub fn property_type(&self) -> &PropertyType {
        self.def.property_type()
    }

    pub fn get_value<'a>(&self, instance: &'a StructuredValue) -> &'a Value {
        instance.get(self.def.name()).unwrap_or(&NULL)
    }

    pub fn get_value_mut<'a>(&self, instance: &'a mut StructuredValue) -> Option<&'a mut Value> {
        instance.get_mut(self.def.name())
    }

    pub fn set_value(&self, instance: &mut StructuredValue, value: Value) {
        let Some(slot) = instance.get_mut(self.def.name()) else {
            return;
        };
        if self.def.is_writable() {
            *slot = value;
            return;
        }
        // Setter-less collection: keep the existing collection, swap contents.
        if let Value::Collection(items) = slot {
            items.clear();
            if let Value::Collection(new_items) = value {
                items.extend(new_items);
            }
        } else if slot.is_null() {
            *slot = value;
        }
    }

    /// `set_value(to, get_value(from))`.
    pub fn copy(&self, from: &StructuredValue, to: &mut StructuredValue) {
        trace!(property = self.name(), "copy property");
        self.set_value(to, self.get_value(from).clone());
    }
}

/// Accessors for every usable property of `ty`, built on first use.
pub fn accessors(ty: &TypeRef) -> Arc<AccessorMap> {
    ty.accessors.get_or_init(|| Arc::new(build_accessors(ty))).clone()
}

fn build_accessors(ty: &StructuredType) -> AccessorMap {
    trace!(type_name = ty.name(), "building property accessors");
    let mut chain: Vec<&StructuredType> = ty.ancestors().collect();
    chain.reverse();
    chain
        .into_iter()
        .flat_map(|t| t.declared_properties().iter().map(move |p| (t.name(), p)))
        .filter_map(|(declaring, p)| {
            PropertyAccessor::new(declaring, p)
                .ok()
                .map(|a| (p.name().to_string(), a))
        })
        .collect()
}
