//! Structured type metadata.
//!
//! A `StructuredType` is the explicit replacement for runtime reflection:
//! it names the type, records whether it is a complex (value-like) or entity
//! (identity-like) type, links to its base type and lists the properties it
//! declares. Types are immutable once built and shared as [`TypeRef`].
//!
//! Type identity is the built value itself: two separately built types are
//! distinct even when they share a name. Property types refer to structured
//! types by name, so names should be unique within one model.

pub mod builder;
pub mod property;

pub use builder::StructuredTypeBuilder;
pub use property::{PropertyDef, PropertyType};

use std::sync::{Arc, OnceLock};

use crate::accessor::AccessorMap;

/// Shared handle to a built type.
pub type TypeRef = Arc<StructuredType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    Complex,
    Entity,
}

impl StructuralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complex => "complex",
            Self::Entity => "entity",
        }
    }
}

#[derive(Debug)]
pub struct StructuredType {
    name: String,
    kind: StructuralKind,
    base: Option<TypeRef>,
    declared: Vec<PropertyDef>,
    pub(crate) accessors: OnceLock<Arc<AccessorMap>>,
}

impl StructuredType {
    pub fn complex(name: impl Into<String>) -> StructuredTypeBuilder {
        StructuredTypeBuilder::new(name, StructuralKind::Complex)
    }

    pub fn entity(name: impl Into<String>) -> StructuredTypeBuilder {
        StructuredTypeBuilder::new(name, StructuralKind::Entity)
    }

    pub(crate) fn from_parts(
        name: String,
        kind: StructuralKind,
        base: Option<TypeRef>,
        declared: Vec<PropertyDef>,
    ) -> Self {
        Self {
            name,
            kind,
            base,
            declared,
            accessors: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StructuralKind {
        self.kind
    }

    pub fn is_complex(&self) -> bool {
        self.kind == StructuralKind::Complex
    }

    pub fn base(&self) -> Option<&TypeRef> {
        self.base.as_ref()
    }

    /// Properties declared directly on this type, without inherited ones.
    pub fn declared_properties(&self) -> &[PropertyDef] {
        &self.declared
    }

    /// This type followed by its base chain, most derived first.
    pub fn ancestors(&self) -> impl Iterator<Item = &StructuredType> {
        std::iter::successors(Some(self), |t| t.base.as_deref())
    }

    /// All properties, inherited ones first, in declaration order.
    pub fn properties(&self) -> Vec<&PropertyDef> {
        let mut chain: Vec<&StructuredType> = self.ancestors().collect();
        chain.reverse();
        chain.into_iter().flat_map(|t| t.declared.iter()).collect()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.ancestors()
            .flat_map(|t| t.declared.iter())
            .find(|p| p.name() == name)
    }

    /// The open-type bag property, if this type (or a base) declares one.
    pub fn dynamic_property(&self) -> Option<&PropertyDef> {
        self.ancestors()
            .flat_map(|t| t.declared.iter())
            .find(|p| p.property_type().is_dictionary())
    }

    pub fn is_open(&self) -> bool {
        self.dynamic_property().is_some()
    }

    /// True when `name` is this type or one of its ancestors.
    pub fn derives_from(&self, name: &str) -> bool {
        self.ancestors().any(|t| t.name == name)
    }

    /// Identity comparison; equal names are not enough.
    pub fn is_same(&self, other: &StructuredType) -> bool {
        std::ptr::eq(self, other)
    }

    /// True when a value of `other` may stand where `self` is expected,
    /// i.e. `self` is `other` or one of its ancestors.
    pub fn is_assignable_from(&self, other: &StructuredType) -> bool {
        other.ancestors().any(|t| t.is_same(self))
    }
}

impl std::fmt::Display for StructuredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
