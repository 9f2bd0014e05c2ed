//! Tree walker port.
//!
//! The resolver never touches a platform accessibility API directly. It asks a
//! [`TreeWalker`] for the root candidates of the first path segment and for the
//! children of nodes it has already been handed. Matching and index
//! disambiguation stay on the resolver's side for every segment, roots
//! included.

use std::sync::Arc;

use async_trait::async_trait;
use axpath_core_types::{NodeArena, NodeId, UiNode};
use axpath_element_path::PathSegment;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkerError {
    #[error("node carries no usable handle")]
    UnknownHandle,
    #[error("tree backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TreeWalker: Send + Sync {
    /// Root nodes in enumeration order.
    ///
    /// A backend may narrow the list using `first` (an application lookup by
    /// bundle id, say) but must not apply its index.
    async fn roots(&self, first: &PathSegment) -> Result<Vec<UiNode>, WalkerError>;

    /// Children of `node` in the backend's enumeration order.
    async fn children(&self, node: &UiNode) -> Result<Vec<UiNode>, WalkerError>;
}

/// In-memory walker over a captured [`NodeArena`].
///
/// Nodes handed out carry their arena id as handle and no children; children
/// are fetched lazily, the same way a live backend would.
#[derive(Clone, Debug)]
pub struct SnapshotWalker {
    arena: Arc<NodeArena>,
}

impl SnapshotWalker {
    pub fn new(arena: NodeArena) -> Self {
        Self {
            arena: Arc::new(arena),
        }
    }

    pub fn from_shared(arena: Arc<NodeArena>) -> Self {
        Self { arena }
    }

    pub fn from_roots(roots: impl IntoIterator<Item = UiNode>) -> Self {
        Self::new(NodeArena::from_roots(roots))
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn node(&self, id: NodeId) -> Result<UiNode, WalkerError> {
        self.arena.shallow_node(id).ok_or(WalkerError::UnknownHandle)
    }
}

#[async_trait]
impl TreeWalker for SnapshotWalker {
    async fn roots(&self, _first: &PathSegment) -> Result<Vec<UiNode>, WalkerError> {
        self.arena
            .roots()
            .iter()
            .map(|root| self.node(*root))
            .collect()
    }

    async fn children(&self, node: &UiNode) -> Result<Vec<UiNode>, WalkerError> {
        let handle = node.handle.ok_or(WalkerError::UnknownHandle)?;
        let id = NodeId::from_handle(handle);
        if self.arena.get(id).is_none() {
            return Err(WalkerError::UnknownHandle);
        }
        self.arena
            .children(id)
            .iter()
            .map(|child| self.node(*child))
            .collect()
    }
}
