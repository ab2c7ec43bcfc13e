//! Tombstones for deleted resources.

use std::ops::{Deref, DerefMut};

use delta_track_model::TypeRef;
use url::Url;

use crate::delta::Delta;
use crate::error::DeltaError;
use crate::kind::{DeltaDeletedResourceReason, DeltaItemKind};

/// A resource reported as deleted.
///
/// Dereferences to a [`Delta`] so it can still carry last-known property
/// values. Consumers remove the identified resource instead of merging it.
#[derive(Debug, Clone)]
pub struct DeltaDeletedResource {
    delta: Delta,
    pub id: Option<Url>,
    pub reason: Option<DeltaDeletedResourceReason>,
}

impl DeltaDeletedResource {
    pub fn new(ty: &TypeRef) -> Self {
        Self::from_delta(Delta::new(ty))
    }

    pub fn for_type(expected: &TypeRef, structured: &TypeRef) -> Result<Self, DeltaError> {
        Delta::for_type(expected, structured).map(Self::from_delta)
    }

    fn from_delta(delta: Delta) -> Self {
        Self {
            delta,
            id: None,
            reason: None,
        }
    }

    pub fn with_id(mut self, id: Url) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_reason(mut self, reason: DeltaDeletedResourceReason) -> Self {
        self.reason = Some(reason);
        self
    }

    pub fn kind(&self) -> DeltaItemKind {
        DeltaItemKind::DeletedResource
    }

    pub fn into_delta(self) -> Delta {
        self.delta
    }
}

impl Deref for DeltaDeletedResource {
    type Target = Delta;

    fn deref(&self) -> &Delta {
        &self.delta
    }
}

impl DerefMut for DeltaDeletedResource {
    fn deref_mut(&mut self) -> &mut Delta {
        &mut self.delta
    }
}
