//! Snapshot diffing.
//!
//! [`detect`] compares two path-keyed snapshots and reports only the topmost
//! additions and removals, so a new subtree shows up once rather than once
//! per node.

pub mod differ;
pub mod model;
pub mod policy;

pub use differ::{detect, detect_with_policy};
pub use model::{AddedNode, ChangeSet, ModifiedNode, Snapshot};
pub use policy::DiffPolicy;
