//! delta-track: partial-update change tracking and patch application.
//!
//! A [`Delta`] records which properties of a structured object a caller
//! explicitly touched, including nested structural properties (themselves
//! deltas) and dynamic properties of open types. The recorded changes are
//! merged into a separate original with PATCH semantics ([`Delta::patch`],
//! only touched properties) or PUT semantics ([`Delta::put`], untouched
//! properties are reset to defaults and untouched dynamic properties are
//! removed).
//!
//! A [`DeltaSet`] groups resources, tombstones ([`DeltaDeletedResource`])
//! and relationship changes ([`DeltaLink`], [`DeltaDeletedLink`]) into one
//! change-feed payload, each item tagged by a [`DeltaItemKind`].
//!
//! # Example
//!
//! ```
//! use delta_track::Delta;
//! use delta_track_model::{PropertyType, StructuredType, StructuredValue, Value};
//!
//! let address = StructuredType::complex("Address")
//!     .property("City", PropertyType::Str)
//!     .build()
//!     .unwrap();
//! let order = StructuredType::entity("Order")
//!     .property("Id", PropertyType::Int)
//!     .property("Amount", PropertyType::Float)
//!     .property("ShippingAddress", PropertyType::structured("Address"))
//!     .build()
//!     .unwrap();
//!
//! let mut delta = Delta::new(&order);
//! assert!(delta.try_set_property_value("Amount", 310));
//! assert_eq!(delta.changed_property_names(), vec!["Amount"]);
//!
//! let addr = StructuredValue::new(&address).with("City", "Redmond");
//! let mut original = StructuredValue::new(&order)
//!     .with("Id", 1)
//!     .with("Amount", 100.0)
//!     .with("ShippingAddress", addr.clone());
//! delta.patch(&mut original).unwrap();
//!
//! assert_eq!(original.get("Amount"), Some(&Value::Float(310.0)));
//! assert_eq!(original.get("Id"), Some(&Value::Int(1)));
//! assert_eq!(original.get("ShippingAddress"), Some(&Value::Structured(addr)));
//! ```

pub mod deleted_resource;
pub mod delta;
pub mod delta_set;
pub mod error;
pub mod kind;
pub mod link;
pub mod options;
pub mod property_value;

pub use deleted_resource::DeltaDeletedResource;
pub use delta::Delta;
pub use delta_set::{DeltaSet, DeltaSetItem};
pub use error::DeltaError;
pub use kind::{DeltaDeletedResourceReason, DeltaItemKind};
pub use link::{DeltaDeletedLink, DeltaLink, DeltaLinkBase};
pub use options::{DeltaOptions, DEFAULT_MAX_DEPTH};
pub use property_value::{NestedResource, PropertyRef, PropertyValue};
