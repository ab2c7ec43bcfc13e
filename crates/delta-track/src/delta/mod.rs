//! Change tracking for one structured instance.
//!
//! A delta owns a default-constructed instance of the tracked type and
//! records which properties a caller explicitly set on it:
//!
//! - declared scalar properties (`changed_properties`),
//! - structural properties whose value is itself a delta or delta set
//!   (`nested_resources`),
//! - dynamic properties of open types (`changed_dynamic_properties`), stored
//!   in the instance's open-type bag.
//!
//! A property name is tracked in at most one of the first two sets. The
//! recorded changes are later merged into a separate original with
//! [`Delta::patch`] or [`Delta::put`] (see `merge.rs`).

mod merge;

use std::collections::HashSet;
use std::sync::Arc;

use delta_track_model::{accessors, AccessorMap, PropertyType, StructuredValue, TypeRef, Value};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::DeltaError;
use crate::kind::DeltaItemKind;
use crate::options::DeltaOptions;
use crate::property_value::{NestedResource, PropertyRef, PropertyValue};

#[derive(Debug, Clone)]
pub struct Delta {
    expected_type: TypeRef,
    structured_type: TypeRef,
    instance: StructuredValue,
    all_properties: Arc<AccessorMap>,
    updatable_properties: IndexSet<String>,
    changed_properties: IndexSet<String>,
    nested_resources: IndexMap<String, NestedResource>,
    dynamic_dictionary_property: Option<String>,
    changed_dynamic_properties: IndexSet<String>,
    /// Dynamic properties whose value was written as a delta.
    dynamic_nested: IndexMap<String, Delta>,
    options: DeltaOptions,
}

impl Delta {
    /// Tracks changes to an instance of exactly `ty`.
    pub fn new(ty: &TypeRef) -> Self {
        Self::build(Arc::clone(ty), Arc::clone(ty))
    }

    /// Tracks changes to an instance of `structured`, declared as
    /// `expected`. Fails when `structured` does not derive from `expected`.
    pub fn for_type(expected: &TypeRef, structured: &TypeRef) -> Result<Self, DeltaError> {
        if !expected.is_assignable_from(structured) {
            return Err(DeltaError::NotAssignable {
                expected: expected.name().to_string(),
                actual: structured.name().to_string(),
            });
        }
        Ok(Self::build(Arc::clone(expected), Arc::clone(structured)))
    }

    fn build(expected_type: TypeRef, structured_type: TypeRef) -> Self {
        let all_properties = accessors(&structured_type);
        let dynamic_dictionary_property = structured_type
            .dynamic_property()
            .map(|p| p.name().to_string());
        let updatable_properties = all_properties
            .keys()
            .filter(|name| Some(name.as_str()) != dynamic_dictionary_property.as_deref())
            .cloned()
            .collect();
        Self {
            instance: StructuredValue::new(&structured_type),
            expected_type,
            structured_type,
            all_properties,
            updatable_properties,
            changed_properties: IndexSet::new(),
            nested_resources: IndexMap::new(),
            dynamic_dictionary_property,
            changed_dynamic_properties: IndexSet::new(),
            dynamic_nested: IndexMap::new(),
            options: DeltaOptions::default(),
        }
    }

    /// Restricts which properties may be set. The dynamic-dictionary
    /// property is never updatable.
    pub fn with_updatable_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dynamic = self.dynamic_dictionary_property.clone();
        self.updatable_properties = names
            .into_iter()
            .map(Into::into)
            .filter(|name| Some(name.as_str()) != dynamic.as_deref())
            .collect();
        self
    }

    pub fn with_options(mut self, options: DeltaOptions) -> Self {
        self.options = options;
        self
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn kind(&self) -> DeltaItemKind {
        DeltaItemKind::Resource
    }

    /// The declared type the delta was created for.
    pub fn expected_type(&self) -> &TypeRef {
        &self.expected_type
    }

    /// The runtime type actually tracked; `expected_type` or derived from it.
    pub fn structured_type(&self) -> &TypeRef {
        &self.structured_type
    }

    pub fn is_complex_type(&self) -> bool {
        self.structured_type.is_complex()
    }

    pub fn options(&self) -> &DeltaOptions {
        &self.options
    }

    /// The instance being built up. Nested deltas' instances are already
    /// copied onto it.
    pub fn instance(&self) -> &StructuredValue {
        &self.instance
    }

    pub fn updatable_properties(&self) -> impl Iterator<Item = &str> {
        self.updatable_properties.iter().map(String::as_str)
    }

    pub fn dynamic_dictionary_property(&self) -> Option<&str> {
        self.dynamic_dictionary_property.as_deref()
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Sets a property and marks it changed.
    ///
    /// Returns `false`, leaving the delta untouched, when the name is
    /// unknown or not updatable, or when the value does not fit the declared
    /// type. On open types, the dictionary name and any undeclared name are
    /// written to the dynamic bag instead.
    pub fn try_set_property_value(&mut self, name: &str, value: impl Into<PropertyValue>) -> bool {
        let value = value.into();
        if let Some(dynamic) = self.dynamic_dictionary_property.as_deref() {
            if name == dynamic || !self.all_properties.contains_key(name) {
                return self.try_set_dynamic_property(name, value);
            }
        }
        match value {
            PropertyValue::Value(v) => self.try_set_declared_property(name, v),
            PropertyValue::Delta(d) => self.try_set_nested_resource(name, NestedResource::Delta(d)),
            PropertyValue::DeltaSet(s) => {
                self.try_set_nested_resource(name, NestedResource::DeltaSet(s))
            }
        }
    }

    fn try_set_declared_property(&mut self, name: &str, value: Value) -> bool {
        if !self.updatable_properties.contains(name) {
            debug!(property = name, "rejected: property is not updatable");
            return false;
        }
        let Some(accessor) = self.all_properties.get(name) else {
            debug!(property = name, "rejected: unknown property");
            return false;
        };
        if self.nested_resources.contains_key(name) {
            debug!(property = name, "rejected: property already holds a nested delta");
            return false;
        }
        let value = match accessor.property().coerce(value) {
            Ok(v) => v,
            Err(rejected) => {
                debug!(
                    property = name,
                    value = rejected.kind_name(),
                    expected = ?accessor.property_type(),
                    "rejected: incompatible value"
                );
                return false;
            }
        };
        accessor.set_value(&mut self.instance, value);
        self.changed_properties.insert(name.to_string());
        true
    }

    fn try_set_nested_resource(&mut self, name: &str, nested: NestedResource) -> bool {
        if !self.updatable_properties.contains(name) {
            debug!(property = name, "rejected: property is not updatable");
            return false;
        }
        let Some(accessor) = self.all_properties.get(name) else {
            debug!(property = name, "rejected: unknown property");
            return false;
        };
        if self.nested_resources.contains_key(name) {
            debug!(property = name, "rejected: nested delta already set");
            return false;
        }
        let declared = accessor.property_type();
        match &nested {
            NestedResource::Delta(d) => {
                let compatible = match declared {
                    PropertyType::Any => true,
                    PropertyType::Structured(type_name) => d.structured_type().derives_from(type_name),
                    _ => false,
                };
                if !compatible {
                    debug!(
                        property = name,
                        nested = d.structured_type().name(),
                        "rejected: nested delta does not fit property type"
                    );
                    return false;
                }
                accessor.set_value(&mut self.instance, Value::Structured(d.instance().clone()));
            }
            NestedResource::DeltaSet(_) => {
                if !matches!(declared, PropertyType::Any | PropertyType::Collection(_)) {
                    debug!(property = name, "rejected: delta set on a non-collection property");
                    return false;
                }
            }
        }
        self.changed_properties.shift_remove(name);
        self.nested_resources.insert(name.to_string(), nested);
        true
    }

    fn try_set_dynamic_property(&mut self, name: &str, value: PropertyValue) -> bool {
        if matches!(value, PropertyValue::DeltaSet(_)) {
            debug!(property = name, "rejected: delta set as dynamic property");
            return false;
        }
        let Some(bag) = self.instance.dynamic_properties_mut(true) else {
            return false;
        };
        match value {
            PropertyValue::Value(v) => {
                bag.insert(name.to_string(), v);
                self.dynamic_nested.shift_remove(name);
            }
            PropertyValue::Delta(d) => {
                bag.insert(name.to_string(), Value::Structured(d.instance().clone()));
                self.dynamic_nested.insert(name.to_string(), *d);
            }
            PropertyValue::DeltaSet(_) => return false,
        }
        self.changed_dynamic_properties.insert(name.to_string());
        true
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Reads a property. Dynamic values shadow declared properties of the
    /// same name; nested resources are returned as the delta (or delta set)
    /// itself.
    pub fn try_get_property_value(&self, name: &str) -> Option<PropertyRef<'_>> {
        if let Some(value) = self.dynamic_value(name) {
            return Some(match self.dynamic_nested.get(name) {
                Some(d) => PropertyRef::Delta(d),
                None => PropertyRef::Value(value),
            });
        }
        if let Some(nested) = self.nested_resources.get(name) {
            return Some(nested.as_property_ref());
        }
        self.all_properties
            .get(name)
            .map(|accessor| PropertyRef::Value(accessor.get_value(&self.instance)))
    }

    /// Type of a property, with the same precedence as
    /// [`try_get_property_value`](Self::try_get_property_value). A dynamic
    /// `null` has no type.
    pub fn try_get_property_type(&self, name: &str) -> Option<PropertyType> {
        if let Some(value) = self.dynamic_value(name) {
            return match self.dynamic_nested.get(name) {
                Some(d) => Some(PropertyType::structured(d.structured_type().name())),
                None => PropertyType::of_value(value),
            };
        }
        self.all_properties
            .get(name)
            .map(|accessor| accessor.property_type().clone())
    }

    fn dynamic_value(&self, name: &str) -> Option<&Value> {
        self.dynamic_dictionary_property.as_ref()?;
        self.instance.dynamic_properties()?.get(name)
    }

    /// Updatable properties that were set, followed by nested resources.
    pub fn changed_property_names(&self) -> Vec<&str> {
        self.changed_properties
            .iter()
            .filter(|name| self.updatable_properties.contains(name.as_str()))
            .chain(self.nested_resources.keys())
            .map(String::as_str)
            .collect()
    }

    /// Updatable, known properties that were not set.
    pub fn unchanged_property_names(&self) -> Vec<&str> {
        let changed: HashSet<&str> = self.changed_property_names().into_iter().collect();
        self.updatable_properties
            .iter()
            .map(String::as_str)
            .filter(|name| self.all_properties.contains_key(*name) && !changed.contains(name))
            .collect()
    }

    pub fn nested_property_names(&self) -> Vec<&str> {
        self.nested_resources.keys().map(String::as_str).collect()
    }

    pub fn nested_resources(&self) -> impl Iterator<Item = (&str, PropertyRef<'_>)> {
        self.nested_resources
            .iter()
            .map(|(name, nested)| (name.as_str(), nested.as_property_ref()))
    }

    pub fn changed_dynamic_property_names(&self) -> Vec<&str> {
        self.changed_dynamic_properties.iter().map(String::as_str).collect()
    }

    /// Discards all tracked changes and starts over from a fresh instance.
    pub fn clear(&mut self) {
        self.instance = StructuredValue::new(&self.structured_type);
        self.changed_properties.clear();
        self.nested_resources.clear();
        self.changed_dynamic_properties.clear();
        self.dynamic_nested.clear();
    }
}
