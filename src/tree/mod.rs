//! Persistent ordered tree snapshots.
//!
//! A `Tree` is an immutable value: every operation takes a snapshot and
//! returns the next one. Only the nodes on the root-to-target path are
//! reallocated; every sibling subtree off that path is carried over as the
//! same `Arc`, so consumers can detect change by reference comparison alone.
//!
//! Operations targeting an id that is not present are silent no-ops that
//! hand back a snapshot sharing every root with the input. Duplicate ids
//! and cycles are caller preconditions (see [`crate::ids`]) and are not
//! checked here.

pub mod node;

pub use node::Node;

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Placement of a newly inserted node.
///
/// Root ordering is governed by the caller: a comment UI prepends new
/// top-level comments while an explorer appends entries. Insertion under a
/// parent always appends to that parent's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    RootPrepend,
    RootAppend,
    Under(NodeId),
}

/// An immutable snapshot of an ordered forest of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree<P> {
    roots: Vec<Arc<Node<P>>>,
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tree<P> {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Tree { roots: Vec::new() }
    }

    /// Create a snapshot from pre-built roots (e.g., a deserialized tree).
    pub fn from_roots(roots: Vec<Arc<Node<P>>>) -> Self {
        Tree { roots }
    }

    /// The ordered root sequence.
    pub fn roots(&self) -> &[Arc<Node<P>>] {
        &self.roots
    }

    /// Depth-first lookup by id.
    pub fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Total node count across all roots.
    pub fn len(&self) -> usize {
        self.roots.iter().map(|root| root.subtree_size()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whether two snapshots share every root allocation.
    ///
    /// True exactly when no operation between the two touched anything;
    /// the no-op paths of `insert`, `update`, and `remove` preserve this.
    pub fn ptr_eq(&self, other: &Tree<P>) -> bool {
        self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(other.roots.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl<P: Clone> Tree<P> {
    /// Insert `node` at the given position, returning the next snapshot.
    ///
    /// `InsertAt::Under` with an id absent from this snapshot is a no-op.
    /// `node.id` must be fresh; the store does not generate or verify ids.
    pub fn insert(&self, at: InsertAt, node: Node<P>) -> Tree<P> {
        let node = Arc::new(node);
        match at {
            InsertAt::RootPrepend => {
                let mut roots = Vec::with_capacity(self.roots.len() + 1);
                roots.push(node);
                roots.extend(self.roots.iter().cloned());
                Tree { roots }
            }
            InsertAt::RootAppend => {
                let mut roots = self.roots.clone();
                roots.push(node);
                Tree { roots }
            }
            InsertAt::Under(parent) => match insert_in(&self.roots, parent, &node) {
                Some(roots) => Tree { roots },
                None => self.clone(),
            },
        }
    }

    /// Replace the payload of `target` with `f(&payload)`.
    ///
    /// Copies only the root-to-target path; no-op if `target` is absent.
    pub fn update<F>(&self, target: NodeId, f: F) -> Tree<P>
    where
        F: Fn(&P) -> P,
    {
        match update_in(&self.roots, target, &f) {
            Some(roots) => Tree { roots },
            None => self.clone(),
        }
    }

    /// Remove `target` and its entire subtree.
    ///
    /// Removing an id that is not present anywhere is a no-op, so removal
    /// is idempotent.
    pub fn remove(&self, target: NodeId) -> Tree<P> {
        match remove_in(&self.roots, target) {
            Some(roots) => Tree { roots },
            None => self.clone(),
        }
    }
}

/// Allocate a replacement for `node` carrying a new child list.
fn rebuild<P: Clone>(node: &Node<P>, children: Vec<Arc<Node<P>>>) -> Arc<Node<P>> {
    Arc::new(Node {
        id: node.id,
        payload: node.payload.clone(),
        children,
    })
}

/// Copy `siblings` with the entry at `index` swapped for `node`.
///
/// Every other entry is an `Arc` clone, so untouched subtrees stay shared.
fn replace_at<P>(siblings: &[Arc<Node<P>>], index: usize, node: Arc<Node<P>>) -> Vec<Arc<Node<P>>> {
    let mut next = siblings.to_vec();
    next[index] = node;
    next
}

/// Returns the rewritten sibling list if `parent` lives in this subtree,
/// or `None` when nothing below here matched. `None` is what lets the
/// caller keep its own allocation instead of rebuilding on a miss.
fn insert_in<P: Clone>(
    siblings: &[Arc<Node<P>>],
    parent: NodeId,
    node: &Arc<Node<P>>,
) -> Option<Vec<Arc<Node<P>>>> {
    for (index, sibling) in siblings.iter().enumerate() {
        if sibling.id == parent {
            let mut children = sibling.children.clone();
            children.push(Arc::clone(node));
            return Some(replace_at(siblings, index, rebuild(sibling, children)));
        }
        if let Some(children) = insert_in(&sibling.children, parent, node) {
            return Some(replace_at(siblings, index, rebuild(sibling, children)));
        }
    }
    None
}

fn update_in<P: Clone, F>(
    siblings: &[Arc<Node<P>>],
    target: NodeId,
    f: &F,
) -> Option<Vec<Arc<Node<P>>>>
where
    F: Fn(&P) -> P,
{
    for (index, sibling) in siblings.iter().enumerate() {
        if sibling.id == target {
            let next = Arc::new(Node {
                id: sibling.id,
                payload: f(&sibling.payload),
                children: sibling.children.clone(),
            });
            return Some(replace_at(siblings, index, next));
        }
        if let Some(children) = update_in(&sibling.children, target, f) {
            return Some(replace_at(siblings, index, rebuild(sibling, children)));
        }
    }
    None
}

fn remove_in<P: Clone>(siblings: &[Arc<Node<P>>], target: NodeId) -> Option<Vec<Arc<Node<P>>>> {
    if let Some(position) = siblings.iter().position(|sibling| sibling.id == target) {
        let mut next = siblings.to_vec();
        next.remove(position);
        return Some(next);
    }
    for (index, sibling) in siblings.iter().enumerate() {
        if let Some(children) = remove_in(&sibling.children, target) {
            return Some(replace_at(siblings, index, rebuild(sibling, children)));
        }
    }
    None
}
