//! Canopy: Persistent Ordered Tree Snapshots
//!
//! An in-memory, ordered, n-ary tree of labeled nodes with path-copying
//! updates: every operation returns a new snapshot that shares untouched
//! subtrees with the previous one, so consumers can detect change by
//! reference comparison alone.

pub mod comment;
pub mod error;
pub mod explorer;
pub mod ids;
pub mod session;
pub mod tree;
pub mod types;
pub mod views;
