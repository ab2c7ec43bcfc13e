//! Errors raised by the delta engine.
//!
//! Per-property problems (unknown name, not updatable, incompatible value)
//! are not errors: `Delta::try_set_property_value` reports them by returning
//! `false`.

use delta_track_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeltaError {
    /// The tracked type is not the declared type or derived from it.
    #[error("NOT_ASSIGNABLE: {actual} is not assignable to {expected}")]
    NotAssignable { expected: String, actual: String },
    /// The target of a merge is not an instance of the tracked type.
    #[error("TYPE_MISMATCH: cannot merge {expected} into {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("MAX_DEPTH_EXCEEDED: nesting deeper than {max_depth}")]
    MaxDepthExceeded { max_depth: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
}
