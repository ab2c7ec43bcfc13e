//! Closed tag sets shared with delta-feed consumers.

use serde::{Deserialize, Serialize};

/// Discriminant of an item in a [`DeltaSet`](crate::DeltaSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaItemKind {
    /// Unrecognized item; kept as-is by generic traversals.
    Unknown,
    Resource,
    DeletedResource,
    DeltaDeletedLink,
    DeltaLink,
}

impl DeltaItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Resource => "resource",
            Self::DeletedResource => "deletedResource",
            Self::DeltaDeletedLink => "deltaDeletedLink",
            Self::DeltaLink => "deltaLink",
        }
    }
}

impl std::fmt::Display for DeltaItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a resource shows up as deleted in a change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaDeletedResourceReason {
    /// The resource no longer exists.
    Deleted,
    /// The resource still exists but no longer belongs to the set.
    Changed,
}

impl DeltaDeletedResourceReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::Changed => "changed",
        }
    }
}
