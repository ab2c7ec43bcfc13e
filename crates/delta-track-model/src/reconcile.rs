//! Derived-type reconciliation.
//!
//! When a structured value is replaced by one of a sibling derived type, only
//! the state declared on the closest shared ancestor survives: a fresh
//! instance of the new type is created and the ancestor's properties are
//! copied over from the old value. Properties that only the old type had
//! are dropped, properties that only the new type has keep their defaults.

use std::sync::Arc;

use tracing::debug;

use crate::accessor::accessors;
use crate::error::ModelError;
use crate::instance::StructuredValue;
use crate::types::{StructuredType, TypeRef};

/// Finds the first ancestor of `original_type` that is also `new_type` or
/// one of its ancestors up to `declared`.
///
/// `new_type`'s chain is collected until (and including) the type named
/// `declared`, or to its root when `declared` is `None` or not on the chain.
pub fn common_ancestor(
    new_type: &TypeRef,
    original_type: &TypeRef,
    declared: Option<&str>,
) -> Result<TypeRef, ModelError> {
    let mut candidates: Vec<&StructuredType> = Vec::new();
    for t in new_type.ancestors() {
        candidates.push(t);
        if Some(t.name()) == declared {
            break;
        }
    }

    let mut cursor: Option<&TypeRef> = Some(original_type);
    while let Some(t) = cursor {
        if candidates.iter().any(|c| c.is_same(t)) {
            return Ok(Arc::clone(t));
        }
        cursor = t.base();
    }

    Err(ModelError::NoCommonAncestor {
        new_type: new_type.name().to_string(),
        original_type: original_type.name().to_string(),
    })
}

/// Re-creates `original` as an instance of `new_type`, keeping only the
/// properties of the common ancestor. `declared` names the statically
/// declared type that bounds the ancestor walk. Returns a clone when the
/// types are already the same.
pub fn reconcile_derived_type(
    original: &StructuredValue,
    new_type: &TypeRef,
    declared: Option<&str>,
) -> Result<StructuredValue, ModelError> {
    if original.is_exactly(new_type) {
        return Ok(original.clone());
    }

    let ancestor = common_ancestor(new_type, original.structured_type(), declared)?;
    debug!(
        from = original.type_name(),
        to = new_type.name(),
        ancestor = ancestor.name(),
        "reconciling derived type"
    );

    let mut replacement = StructuredValue::new(new_type);
    for accessor in accessors(&ancestor).values() {
        accessor.copy(original, &mut replacement);
    }
    Ok(replacement)
}
