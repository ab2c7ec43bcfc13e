//! Added and removed relationship links.
//!
//! Passive records consumed by a delta-feed serializer: which navigation
//! (`relationship`) on `source` now does (or no longer does) point at
//! `target`.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use delta_track_model::TypeRef;
use url::Url;

use crate::error::DeltaError;
use crate::kind::DeltaItemKind;

/// Fields shared by [`DeltaLink`] and [`DeltaDeletedLink`].
#[derive(Debug, Clone)]
pub struct DeltaLinkBase {
    expected_type: TypeRef,
    structured_type: TypeRef,
    pub source: Option<Url>,
    pub target: Option<Url>,
    pub relationship: Option<String>,
}

impl DeltaLinkBase {
    /// Fails when `structured` does not derive from `expected`.
    pub fn new(expected: &TypeRef, structured: &TypeRef) -> Result<Self, DeltaError> {
        if !expected.is_assignable_from(structured) {
            return Err(DeltaError::NotAssignable {
                expected: expected.name().to_string(),
                actual: structured.name().to_string(),
            });
        }
        Ok(Self {
            expected_type: Arc::clone(expected),
            structured_type: Arc::clone(structured),
            source: None,
            target: None,
            relationship: None,
        })
    }

    pub fn expected_type(&self) -> &TypeRef {
        &self.expected_type
    }

    pub fn structured_type(&self) -> &TypeRef {
        &self.structured_type
    }
}

macro_rules! link_record {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(DeltaLinkBase);

        impl $name {
            pub fn new(ty: &TypeRef) -> Self {
                Self(DeltaLinkBase {
                    expected_type: Arc::clone(ty),
                    structured_type: Arc::clone(ty),
                    source: None,
                    target: None,
                    relationship: None,
                })
            }

            pub fn for_type(expected: &TypeRef, structured: &TypeRef) -> Result<Self, DeltaError> {
                DeltaLinkBase::new(expected, structured).map(Self)
            }

            pub fn with_source(mut self, source: Url) -> Self {
                self.0.source = Some(source);
                self
            }

            pub fn with_target(mut self, target: Url) -> Self {
                self.0.target = Some(target);
                self
            }

            pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
                self.0.relationship = Some(relationship.into());
                self
            }

            pub fn kind(&self) -> DeltaItemKind {
                $kind
            }
        }

        impl Deref for $name {
            type Target = DeltaLinkBase;

            fn deref(&self) -> &DeltaLinkBase {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut DeltaLinkBase {
                &mut self.0
            }
        }
    };
}

link_record!(
    /// A relationship that was added.
    DeltaLink,
    DeltaItemKind::DeltaLink
);

link_record!(
    /// A relationship that was removed.
    DeltaDeletedLink,
    DeltaItemKind::DeltaDeletedLink
);

#[cfg(test)]
mod tests {
    use super::*;
    use delta_track_model::StructuredType;

    #[test]
    fn link_carries_endpoints() {
        let ty = StructuredType::entity("Customer").build().unwrap();
        let link = DeltaLink::new(&ty)
            .with_source(Url::parse("https://example.com/Customers(1)").unwrap())
            .with_target(Url::parse("https://example.com/Orders(9)").unwrap())
            .with_relationship("Orders");
        assert_eq!(link.kind(), DeltaItemKind::DeltaLink);
        assert_eq!(link.relationship.as_deref(), Some("Orders"));
        assert_eq!(link.source.as_ref().map(Url::as_str), Some("https://example.com/Customers(1)"));
        assert_eq!(link.structured_type().name(), "Customer");
    }

    #[test]
    fn link_type_must_be_assignable() {
        let customer = StructuredType::entity("Customer").build().unwrap();
        let vip = StructuredType::entity("VipCustomer").base(&customer).build().unwrap();
        assert!(DeltaDeletedLink::for_type(&customer, &vip).is_ok());
        let err = DeltaDeletedLink::for_type(&vip, &customer).unwrap_err();
        assert!(matches!(err, DeltaError::NotAssignable { .. }));
    }
}
