//! Nested comment threads over persistent tree snapshots.
//!
//! Comment UX conventions live here, not in the tree: new top-level comments
//! are prepended so the freshest appears first, replies are appended in
//! arrival order, and operations on ids that no longer exist are silent
//! no-ops (a reply races a delete, the reply just vanishes).

use crate::ids::IdGenerator;
use crate::session::TreeSession;
use crate::tree::{InsertAt, Node, Tree};
use crate::types::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-comment data carried in each tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub content: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub edited: bool,
}

impl CommentPayload {
    pub fn new(content: String) -> Self {
        CommentPayload {
            content,
            votes: 0,
            created_at: Utc::now(),
            edited: false,
        }
    }
}

/// A comment thread: current snapshot plus the id collaborator.
///
/// All writes funnel through the session, so concurrent callers see a
/// sequential history of snapshots.
pub struct CommentThread {
    session: TreeSession<CommentPayload>,
    ids: IdGenerator,
}

impl Default for CommentThread {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentThread {
    pub fn new() -> Self {
        CommentThread {
            session: TreeSession::new(Tree::new()),
            ids: IdGenerator::new(),
        }
    }

    /// Resume over an existing snapshot.
    ///
    /// `ids` must be seeded past every id in `snapshot` so deleted ids are
    /// never reissued.
    pub fn with_snapshot(snapshot: Tree<CommentPayload>, ids: IdGenerator) -> Self {
        CommentThread {
            session: TreeSession::new(snapshot),
            ids,
        }
    }

    /// The current snapshot, safe to hold across later edits.
    pub fn snapshot(&self) -> Tree<CommentPayload> {
        self.session.snapshot()
    }

    /// Add a top-level comment, newest first.
    pub fn post(&self, content: impl Into<String>) -> NodeId {
        let id = self.ids.next_id();
        let payload = CommentPayload::new(content.into());
        debug!(%id, "posting top-level comment");
        self.session
            .apply(|tree| tree.insert(InsertAt::RootPrepend, Node::new(id, payload)));
        id
    }

    /// Append a reply under `parent`.
    ///
    /// If `parent` no longer exists the thread is left unchanged and the
    /// returned id is simply never used; ids are not reissued.
    pub fn reply(&self, parent: NodeId, content: impl Into<String>) -> NodeId {
        let id = self.ids.next_id();
        let payload = CommentPayload::new(content.into());
        debug!(%id, %parent, "replying");
        self.session
            .apply(|tree| tree.insert(InsertAt::Under(parent), Node::new(id, payload)));
        id
    }

    /// Replace a comment's content and mark it edited.
    ///
    /// Votes, creation time, and the reply list are untouched. No-op if the
    /// comment is gone.
    pub fn edit(&self, id: NodeId, content: impl Into<String>) {
        let content = content.into();
        self.session.apply(|tree| {
            tree.update(id, |payload| CommentPayload {
                content: content.clone(),
                edited: true,
                ..payload.clone()
            })
        });
    }

    /// Adjust a comment's vote count by `delta` (negative to downvote).
    pub fn vote(&self, id: NodeId, delta: i64) {
        self.session.apply(|tree| {
            tree.update(id, |payload| CommentPayload {
                votes: payload.votes + delta,
                ..payload.clone()
            })
        });
    }

    /// Delete a comment and its whole reply subtree. Idempotent.
    pub fn delete(&self, id: NodeId) {
        debug!(%id, "deleting comment");
        self.session.apply(|tree| tree.remove(id));
    }
}
