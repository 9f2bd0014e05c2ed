//! Shared primitives for the axpath crates.
//!
//! A [`UiNode`] is the read-only view of one accessibility element: its role,
//! its attribute map and (when captured) its children. Nodes handed out by a
//! live tree walker additionally carry an opaque [`NodeHandle`].
//! [`NodeArena`] stores a whole tree with parent links expressed as arena
//! indices.

pub mod arena;
pub mod node;

pub use arena::{ArenaNode, NodeArena, NodeId};
pub use node::{AttributeValue, NodeHandle, UiNode};
