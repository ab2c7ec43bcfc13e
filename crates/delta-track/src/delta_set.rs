//! `DeltaSet`, one change-feed payload.
//!
//! An ordered, heterogeneous list of resources, tombstones and link records.
//! Items are kept exactly in insertion order and never deduplicated; any
//! ordering semantics (deletes before creates, ...) belong to the consumer
//! that walks the set by [`DeltaItemKind`].

use std::sync::Arc;

use delta_track_model::{TypeRef, Value};

use crate::deleted_resource::DeltaDeletedResource;
use crate::delta::Delta;
use crate::kind::DeltaItemKind;
use crate::link::{DeltaDeletedLink, DeltaLink};

#[derive(Debug, Clone)]
pub enum DeltaSetItem {
    Resource(Delta),
    DeletedResource(DeltaDeletedResource),
    DeltaLink(DeltaLink),
    DeltaDeletedLink(DeltaDeletedLink),
    /// An item of an unrecognized kind, carried through untouched.
    Unknown(Value),
}

impl DeltaSetItem {
    pub fn kind(&self) -> DeltaItemKind {
        match self {
            Self::Resource(d) => d.kind(),
            Self::DeletedResource(d) => d.kind(),
            Self::DeltaLink(l) => l.kind(),
            Self::DeltaDeletedLink(l) => l.kind(),
            Self::Unknown(_) => DeltaItemKind::Unknown,
        }
    }

    /// The change record of a resource or tombstone.
    pub fn as_delta(&self) -> Option<&Delta> {
        match self {
            Self::Resource(d) => Some(d),
            Self::DeletedResource(d) => Some(&**d),
            _ => None,
        }
    }

    pub fn as_delta_mut(&mut self) -> Option<&mut Delta> {
        match self {
            Self::Resource(d) => Some(d),
            Self::DeletedResource(d) => Some(&mut **d),
            _ => None,
        }
    }

    /// Structured type of the item, if it has one.
    pub fn structured_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Resource(d) => Some(d.structured_type()),
            Self::DeletedResource(d) => Some(d.structured_type()),
            Self::DeltaLink(l) => Some(l.structured_type()),
            Self::DeltaDeletedLink(l) => Some(l.structured_type()),
            Self::Unknown(_) => None,
        }
    }
}

impl From<Delta> for DeltaSetItem {
    fn from(d: Delta) -> Self {
        Self::Resource(d)
    }
}

impl From<DeltaDeletedResource> for DeltaSetItem {
    fn from(d: DeltaDeletedResource) -> Self {
        Self::DeletedResource(d)
    }
}

impl From<DeltaLink> for DeltaSetItem {
    fn from(l: DeltaLink) -> Self {
        Self::DeltaLink(l)
    }
}

impl From<DeltaDeletedLink> for DeltaSetItem {
    fn from(l: DeltaDeletedLink) -> Self {
        Self::DeltaDeletedLink(l)
    }
}

/// Ordered collection of [`DeltaSetItem`]s, optionally tagged with the
/// declared element type.
#[derive(Debug, Clone, Default)]
pub struct DeltaSet {
    expected_type: Option<TypeRef>,
    items: Vec<DeltaSetItem>,
}

impl DeltaSet {
    /// An untyped set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set whose items describe resources of `ty`.
    pub fn of(ty: &TypeRef) -> Self {
        Self {
            expected_type: Some(Arc::clone(ty)),
            items: Vec::new(),
        }
    }

    pub fn expected_type(&self) -> Option<&TypeRef> {
        self.expected_type.as_ref()
    }

    pub fn push(&mut self, item: impl Into<DeltaSetItem>) {
        self.items.push(item.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DeltaSetItem> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DeltaSetItem> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeltaSetItem> {
        self.items.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = DeltaItemKind> + '_ {
        self.items.iter().map(DeltaSetItem::kind)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a DeltaSet {
    type Item = &'a DeltaSetItem;
    type IntoIter = std::slice::Iter<'a, DeltaSetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for DeltaSet {
    type Item = DeltaSetItem;
    type IntoIter = std::vec::IntoIter<DeltaSetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<I: Into<DeltaSetItem>> FromIterator<I> for DeltaSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            expected_type: None,
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<I: Into<DeltaSetItem>> Extend<I> for DeltaSet {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}
