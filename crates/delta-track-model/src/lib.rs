//! delta-track-model: structural type model for delta-track.
//!
//! Stands in for runtime reflection: structured types are described by
//! explicit metadata ([`StructuredType`]) with a base-type chain, instances
//! are [`StructuredValue`]s, and properties are read and written through
//! cached [`PropertyAccessor`]s.
//!
//! # Example
//!
//! ```
//! use delta_track_model::{accessors, PropertyType, StructuredType, StructuredValue, Value};
//!
//! let order = StructuredType::entity("Order")
//!     .property("Id", PropertyType::Int)
//!     .property("Amount", PropertyType::Float)
//!     .build()
//!     .unwrap();
//!
//! let from = StructuredValue::new(&order).with("Amount", 310.0);
//! let mut to = StructuredValue::new(&order).with("Id", 1);
//! accessors(&order)["Amount"].copy(&from, &mut to);
//! assert_eq!(to.get("Amount"), Some(&Value::Float(310.0)));
//! assert_eq!(to.get("Id"), Some(&Value::Int(1)));
//! ```

pub mod accessor;
pub mod error;
pub mod instance;
pub mod reconcile;
pub mod types;
pub mod value;

pub use accessor::{accessors, AccessorMap, PropertyAccessor};
pub use error::ModelError;
pub use instance::StructuredValue;
pub use reconcile::{common_ancestor, reconcile_derived_type};
pub use types::{
    PropertyDef, PropertyType, StructuralKind, StructuredType, StructuredTypeBuilder, TypeRef,
};
pub use value::{DynamicBag, Value};
