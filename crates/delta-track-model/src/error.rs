//! Errors raised while building or inspecting the structural type model.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A property without a readable getter cannot be accessed.
    #[error("MISSING_GETTER: {type_name}.{property}")]
    MissingGetter { type_name: String, property: String },
    /// Only collection-typed properties may lack a setter.
    #[error("MISSING_SETTER: {type_name}.{property}")]
    MissingSetter { type_name: String, property: String },
    #[error("DUPLICATE_PROPERTY: {type_name}.{property}")]
    DuplicateProperty { type_name: String, property: String },
    #[error("KIND_MISMATCH: {type_name} cannot derive from {base}")]
    KindMismatch { type_name: String, base: String },
    #[error("MULTIPLE_DYNAMIC_DICTIONARIES: {type_name}")]
    MultipleDynamicDictionaries { type_name: String },
    #[error("NO_COMMON_ANCESTOR: {new_type} and {original_type}")]
    NoCommonAncestor { new_type: String, original_type: String },
}
