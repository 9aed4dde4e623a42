//! Display ordering for tree snapshots.
//!
//! Storage order is insertion order; anything else is presentation. The
//! explorer UI shows folders before files, each group sorted by name, so
//! that comparator lives here rather than in the tree, and the snapshot is
//! never reordered in place.

use crate::explorer::{FsPayload, NodeKind};
use crate::tree::{Node, Tree};
use crate::types::NodeId;
use std::cmp::Ordering;
use std::sync::Arc;

/// Folders first, then lexicographic by name.
fn display_cmp(a: &Node<FsPayload>, b: &Node<FsPayload>) -> Ordering {
    match (a.payload.kind, b.payload.kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => a.payload.name.cmp(&b.payload.name),
    }
}

/// A node's children in explorer display order.
pub fn display_children(node: &Node<FsPayload>) -> Vec<Arc<Node<FsPayload>>> {
    let mut children = node.children.clone();
    children.sort_by(|a, b| display_cmp(a, b));
    children
}

/// The top-level entries in explorer display order.
pub fn display_roots(tree: &Tree<FsPayload>) -> Vec<Arc<Node<FsPayload>>> {
    let mut roots = tree.roots().to_vec();
    roots.sort_by(|a, b| display_cmp(a, b));
    roots
}

/// Every id in the snapshot, depth-first in storage order.
pub fn flatten<P>(tree: &Tree<P>) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(tree.len());
    for root in tree.roots() {
        push_ids(root, &mut out);
    }
    out
}

fn push_ids<P>(node: &Node<P>, out: &mut Vec<NodeId>) {
    out.push(node.id);
    for child in &node.children {
        push_ids(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::Explorer;

    #[test]
    fn display_order_is_folders_first_then_name() {
        let explorer = Explorer::new();
        explorer.create(None, FsPayload::file("zz.txt")).unwrap();
        explorer.create(None, FsPayload::folder("src")).unwrap();
        explorer.create(None, FsPayload::file("aa.txt")).unwrap();
        explorer.create(None, FsPayload::folder("docs")).unwrap();

        let snapshot = explorer.snapshot();
        let roots = display_roots(&snapshot);
        let names: Vec<&str> = roots
            .iter()
            .map(|n| n.payload.name.as_str())
            .collect();
        assert_eq!(names, vec!["docs", "src", "aa.txt", "zz.txt"]);

        // The snapshot itself keeps creation order.
        let stored: Vec<&str> = snapshot
            .roots()
            .iter()
            .map(|n| n.payload.name.as_str())
            .collect();
        assert_eq!(stored, vec!["zz.txt", "src", "aa.txt", "docs"]);
    }

    #[test]
    fn display_children_sorts_one_level_only() {
        let explorer = Explorer::new();
        let src = explorer.create(None, FsPayload::folder("src")).unwrap();
        explorer.create(Some(src), FsPayload::file("main.rs")).unwrap();
        let sub = explorer.create(Some(src), FsPayload::folder("bin")).unwrap();
        explorer.create(Some(sub), FsPayload::file("tool.rs")).unwrap();

        let snapshot = explorer.snapshot();
        let ordered = display_children(snapshot.get(src).unwrap());
        let names: Vec<&str> = ordered.iter().map(|n| n.payload.name.as_str()).collect();
        assert_eq!(names, vec!["bin", "main.rs"]);
    }

    #[test]
    fn flatten_walks_depth_first() {
        let explorer = Explorer::new();
        let src = explorer.create(None, FsPayload::folder("src")).unwrap();
        let main = explorer.create(Some(src), FsPayload::file("main.rs")).unwrap();
        let docs = explorer.create(None, FsPayload::folder("docs")).unwrap();

        let snapshot = explorer.snapshot();
        assert_eq!(flatten(&snapshot), vec![src, main, docs]);
    }
}
