//! Merge options.

use serde::{Deserialize, Serialize};

/// Nesting depth allowed when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while merging a delta into an original.
///
/// Deserializes from any host configuration format; missing fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaOptions {
    /// Deepest chain of nested deltas a merge may descend into. The root
    /// delta is depth 0.
    pub max_depth: usize,
}

impl Default for DeltaOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
