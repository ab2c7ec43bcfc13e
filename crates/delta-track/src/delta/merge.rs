//! Merging a delta into an original instance.
//!
//! `patch` copies only what was set; `put` additionally resets everything
//! else to the delta's own defaults and drops dynamic properties that were
//! not set. Nested deltas are merged recursively, bounded by
//! [`DeltaOptions::max_depth`](crate::DeltaOptions).
//!
//! Every merge checks the nesting depth up front and then works on a copy of
//! the original, which replaces it only once the whole merge succeeded.

use delta_track_model::{reconcile_derived_type, StructuredValue, Value};
use tracing::debug;

use super::Delta;
use crate::error::DeltaError;
use crate::property_value::NestedResource;

impl Delta {
    /// Applies the set properties to `original`.
    ///
    /// For complex types, an original of a different derived type is first
    /// replaced by an instance of the tracked type that keeps only the state
    /// of the common ancestor.
    pub fn patch(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        self.check_depth()?;
        let mut staged = original.clone();
        if self.is_complex_type() && !staged.is_exactly(&self.structured_type) {
            if !self.expected_type.is_assignable_from(staged.structured_type()) {
                return Err(self.type_mismatch(&staged));
            }
            staged = reconcile_derived_type(
                &staged,
                &self.structured_type,
                Some(self.expected_type.name()),
            )?;
        }
        self.merge_changed(&mut staged)?;
        *original = staged;
        Ok(())
    }

    /// Applies the set properties to `original` and resets every other
    /// updatable property to the delta's default.
    pub fn put(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        self.check_depth()?;
        let mut staged = original.clone();
        self.merge_changed(&mut staged)?;
        self.copy_unchanged_values(&mut staged)?;
        *original = staged;
        Ok(())
    }

    pub fn copy_changed_values(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        self.check_depth()?;
        let mut staged = original.clone();
        self.merge_changed(&mut staged)?;
        *original = staged;
        Ok(())
    }

    /// Overwrites every unchanged updatable property of `original` with the
    /// delta's value and removes dynamic properties that were not set.
    pub fn copy_unchanged_values(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        self.ensure_assignable(original)?;
        for name in self.unchanged_property_names() {
            if let Some(accessor) = self.all_properties.get(name) {
                accessor.copy(&self.instance, original);
            }
        }
        self.copy_unchanged_dynamic_values(original);
        Ok(())
    }

    fn ensure_assignable(&self, original: &StructuredValue) -> Result<(), DeltaError> {
        if self.structured_type.is_assignable_from(original.structured_type()) {
            Ok(())
        } else {
            Err(self.type_mismatch(original))
        }
    }

    fn type_mismatch(&self, original: &StructuredValue) -> DeltaError {
        DeltaError::TypeMismatch {
            expected: self.structured_type.name().to_string(),
            actual: original.type_name().to_string(),
        }
    }

    fn check_depth(&self) -> Result<(), DeltaError> {
        self.check_depth_at(0, self.options.max_depth)
    }

    /// Walks the nested deltas, stopping as soon as one sits deeper than
    /// `max_depth`.
    fn check_depth_at(&self, depth: usize, max_depth: usize) -> Result<(), DeltaError> {
        if depth > max_depth {
            return Err(DeltaError::MaxDepthExceeded { max_depth });
        }
        let nested = self.nested_resources.values().filter_map(|n| match n {
            NestedResource::Delta(d) => Some(&**d),
            NestedResource::DeltaSet(_) => None,
        });
        for child in nested.chain(self.dynamic_nested.values()) {
            child.check_depth_at(depth + 1, max_depth)?;
        }
        Ok(())
    }

    fn merge_changed(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        self.ensure_assignable(original)?;

        for name in &self.changed_properties {
            if !self.updatable_properties.contains(name) {
                continue;
            }
            if let Some(accessor) = self.all_properties.get(name) {
                accessor.copy(&self.instance, original);
            }
        }

        self.copy_changed_dynamic_values(original)?;

        for (name, nested) in &self.nested_resources {
            let nested = match nested {
                NestedResource::Delta(d) => d,
                NestedResource::DeltaSet(_) => {
                    debug!(property = name.as_str(), "nested delta set is not merged");
                    continue;
                }
            };
            let Some(accessor) = self.all_properties.get(name) else {
                continue;
            };

            if let Some(Value::Structured(current)) = accessor.get_value_mut(original) {
                if nested.is_complex_type() && !current.is_exactly(&nested.structured_type) {
                    // the property's declared type bounds the ancestor walk
                    let declared = accessor.property_type().structured_name();
                    if let Some(declared) = declared {
                        if !current.structured_type().derives_from(declared) {
                            return Err(nested.type_mismatch(current));
                        }
                    }
                    *current = reconcile_derived_type(current, &nested.structured_type, declared)?;
                }
                nested.merge_changed(current)?;
                continue;
            }

            // No original value to merge into: take the nested instance as is.
            let materialized = nested.materialize()?;
            accessor.set_value(original, Value::Structured(materialized));
        }
        Ok(())
    }

    /// The delta's own instance with its nested changes applied.
    fn materialize(&self) -> Result<StructuredValue, DeltaError> {
        let mut instance = self.instance.clone();
        self.merge_changed(&mut instance)?;
        Ok(instance)
    }

    fn copy_changed_dynamic_values(&self, original: &mut StructuredValue) -> Result<(), DeltaError> {
        if self.dynamic_dictionary_property.is_none() {
            return Ok(());
        }
        let Some(from) = self.instance.dynamic_properties() else {
            return Ok(());
        };
        let Some(to) = original.dynamic_properties_mut(true) else {
            return Ok(());
        };

        for name in &self.changed_dynamic_properties {
            let Some(value) = from.get(name) else {
                continue;
            };
            // null removes the key rather than storing null
            if value.is_null() {
                to.shift_remove(name);
                continue;
            }
            let value = match self.dynamic_nested.get(name) {
                Some(nested) => Value::Structured(nested.materialize()?),
                None => value.clone(),
            };
            to.insert(name.clone(), value);
        }
        Ok(())
    }

    fn copy_unchanged_dynamic_values(&self, original: &mut StructuredValue) {
        if self.dynamic_dictionary_property.is_none() {
            return;
        }
        let Some(to) = original.dynamic_properties_mut(false) else {
            return;
        };
        to.retain(|name, _| self.changed_dynamic_properties.contains(name));
    }
}
