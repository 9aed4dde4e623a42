//! Error types for the tree store facades.
//!
//! The core snapshot operations are total and never fail; errors only arise
//! at the facade boundary, where a caller asked for an outcome the current
//! snapshot cannot provide.

use crate::types::NodeId;
use thiserror::Error;

/// Errors surfaced by the checked facade operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The target id does not exist in the current snapshot.
    #[error("node {0} not found in the current snapshot")]
    NotFound(NodeId),

    /// The target is a file node and cannot hold children.
    #[error("node {0} is a file and cannot hold children")]
    NotAFolder(NodeId),
}
