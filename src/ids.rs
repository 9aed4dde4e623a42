//! Node identity generation.
//!
//! The tree store never generates ids itself; callers obtain fresh ids from
//! this collaborator before inserting. Ids are monotonic for the generator's
//! lifetime and never reused, which keeps them unique across every snapshot
//! derived under the same generator.

use crate::types::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source shared by all writers of one tree.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator starting at id 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator whose first issued id is `first`.
    ///
    /// Used when resuming over a deserialized snapshot: pass one past the
    /// highest id present so deleted ids are never reissued.
    pub fn starting_at(first: u64) -> Self {
        IdGenerator {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> NodeId {
        NodeId::from_raw(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_distinct() {
        let ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn starting_at_resumes_past_existing_ids() {
        let ids = IdGenerator::starting_at(42);
        assert_eq!(ids.next_id(), NodeId::from_raw(42));
        assert_eq!(ids.next_id(), NodeId::from_raw(43));
    }
}
