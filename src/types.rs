//! Core identifier types for the tree store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: Opaque identifier for a tree node
///
/// Assigned once at node creation and stable for the node's lifetime.
/// Ids are never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
