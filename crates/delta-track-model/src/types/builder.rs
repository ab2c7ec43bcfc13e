//! Builder for [`StructuredType`].

use std::collections::HashSet;
use std::sync::Arc;

use super::{PropertyDef, PropertyType, StructuralKind, StructuredType, TypeRef};
use crate::error::ModelError;

#[derive(Debug, Clone)]
pub struct StructuredTypeBuilder {
    name: String,
    kind: StructuralKind,
    base: Option<TypeRef>,
    properties: Vec<PropertyDef>,
}

impl StructuredTypeBuilder {
    pub fn new(name: impl Into<String>, kind: StructuralKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            properties: Vec::new(),
        }
    }

    pub fn base(mut self, base: &TypeRef) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    /// Declares a property with default nullability and full access.
    pub fn property(self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.property_def(PropertyDef::new(name, property_type))
    }

    pub fn property_def(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    /// Makes the type open by declaring the bag that holds its dynamic
    /// properties.
    pub fn open(self, name: impl Into<String>) -> Self {
        self.property(name, PropertyType::Dictionary)
    }

    pub fn build(self) -> Result<TypeRef, ModelError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut dictionaries = 0usize;

        if let Some(base) = &self.base {
            if base.kind() != self.kind {
                return Err(ModelError::KindMismatch {
                    type_name: self.name,
                    base: base.name().to_string(),
                });
            }
            for p in base.properties() {
                seen.insert(p.name().to_string());
                if p.property_type().is_dictionary() {
                    dictionaries += 1;
                }
            }
        }

        for p in &self.properties {
            if !seen.insert(p.name().to_string()) {
                return Err(ModelError::DuplicateProperty {
                    type_name: self.name,
                    property: p.name().to_string(),
                });
            }
            if p.property_type().is_dictionary() {
                dictionaries += 1;
            }
        }

        if dictionaries > 1 {
            return Err(ModelError::MultipleDynamicDictionaries { type_name: self.name });
        }

        Ok(Arc::new(StructuredType::from_parts(
            self.name,
            self.kind,
            self.base,
            self.properties,
        )))
    }
}
