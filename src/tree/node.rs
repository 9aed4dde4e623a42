//! Tree node representation.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single node in an ordered n-ary tree.
///
/// Children are held through `Arc` so that snapshots derived from one
/// another can share every subtree an operation did not touch. A node is
/// never mutated after construction; "changing" a node means allocating a
/// replacement along the root-to-target path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<P> {
    pub id: NodeId,
    pub payload: P,
    pub children: Vec<Arc<Node<P>>>,
}

impl<P> Node<P> {
    /// Create a leaf node.
    pub fn new(id: NodeId, payload: P) -> Self {
        Node {
            id,
            payload,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, inclusive of `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_size())
            .sum::<usize>()
    }

    /// Depth-first lookup by id within this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Node<P>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
