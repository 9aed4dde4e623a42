//! File-explorer trees over persistent tree snapshots.
//!
//! Unlike the comment surface, explorer edits are checked: the caller is
//! naming a concrete folder or entry, so a missing target or an attempt to
//! create inside a file comes back as an error instead of a silent no-op.
//! The kind check lives here, not in the tree store, which knows nothing
//! about folders.

use crate::error::TreeError;
use crate::ids::IdGenerator;
use crate::session::TreeSession;
use crate::tree::{InsertAt, Node, Tree};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Entry kind. Only folders may hold children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    File,
}

/// Per-entry data carried in each tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsPayload {
    pub name: String,
    pub kind: NodeKind,
}

impl FsPayload {
    pub fn folder(name: impl Into<String>) -> Self {
        FsPayload {
            name: name.into(),
            kind: NodeKind::Folder,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        FsPayload {
            name: name.into(),
            kind: NodeKind::File,
        }
    }
}

/// A file-explorer tree: current snapshot plus the id collaborator.
pub struct Explorer {
    session: TreeSession<FsPayload>,
    ids: IdGenerator,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    pub fn new() -> Self {
        Explorer {
            session: TreeSession::new(Tree::new()),
            ids: IdGenerator::new(),
        }
    }

    /// Resume over an existing snapshot.
    ///
    /// `ids` must be seeded past every id in `snapshot`.
    pub fn with_snapshot(snapshot: Tree<FsPayload>, ids: IdGenerator) -> Self {
        Explorer {
            session: TreeSession::new(snapshot),
            ids,
        }
    }

    /// The current snapshot, safe to hold across later edits.
    pub fn snapshot(&self) -> Tree<FsPayload> {
        self.session.snapshot()
    }

    /// Create an entry under `parent`, or at the top level when `parent`
    /// is `None`. Top-level entries append in creation order; display
    /// ordering is a view concern (see [`crate::views`]).
    pub fn create(
        &self,
        parent: Option<NodeId>,
        payload: FsPayload,
    ) -> Result<NodeId, TreeError> {
        let id = self.ids.next_id();
        debug!(%id, kind = ?payload.kind, name = %payload.name, "creating entry");
        self.session.try_apply(|tree| {
            let at = match parent {
                None => InsertAt::RootAppend,
                Some(parent_id) => {
                    let parent_node = tree
                        .get(parent_id)
                        .ok_or(TreeError::NotFound(parent_id))?;
                    if parent_node.payload.kind != NodeKind::Folder {
                        warn!(%parent_id, "rejected create under a file");
                        return Err(TreeError::NotAFolder(parent_id));
                    }
                    InsertAt::Under(parent_id)
                }
            };
            Ok(tree.insert(at, Node::new(id, payload)))
        })?;
        Ok(id)
    }

    /// Rename an entry in place; kind and children are untouched.
    pub fn rename(&self, id: NodeId, name: impl Into<String>) -> Result<(), TreeError> {
        let name = name.into();
        self.session.try_apply(|tree| {
            if !tree.contains(id) {
                return Err(TreeError::NotFound(id));
            }
            Ok(tree.update(id, |payload| FsPayload {
                name: name.clone(),
                kind: payload.kind,
            }))
        })?;
        Ok(())
    }

    /// Delete an entry and everything below it.
    pub fn delete(&self, id: NodeId) -> Result<(), TreeError> {
        self.session.try_apply(|tree| {
            if !tree.contains(id) {
                return Err(TreeError::NotFound(id));
            }
            Ok(tree.remove(id))
        })?;
        Ok(())
    }
}
