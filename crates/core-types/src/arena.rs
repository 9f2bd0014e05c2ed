//! Arena-backed tree storage.
//!
//! Nodes are stored in insertion (pre-order) order and refer to their parent
//! and children by [`NodeId`]. There are no owning back-pointers, so a tree
//! can be walked upwards for path generation without reference cycles.

use std::collections::BTreeMap;

use crate::node::{AttributeValue, NodeHandle, UiNode};

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn handle(self) -> NodeHandle {
        NodeHandle(self.0 as u64)
    }

    pub fn from_handle(handle: NodeHandle) -> Self {
        NodeId(handle.0 as usize)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArenaNode {
    pub role: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeArena {
    nodes: Vec<ArenaNode>,
    roots: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: impl IntoIterator<Item = UiNode>) -> Self {
        let mut arena = Self::new();
        for root in roots {
            arena.insert_root(root);
        }
        arena
    }

    /// Flattens `node` and its captured children into the arena.
    pub fn insert_root(&mut self, node: UiNode) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    fn insert(&mut self, node: UiNode, parent: Option<NodeId>) -> NodeId {
        let UiNode {
            role,
            attributes,
            children,
            ..
        } = node;
        let id = NodeId(self.nodes.len());
        self.nodes.push(ArenaNode {
            role,
            attributes,
            parent,
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&ArenaNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes sharing `id`'s parent (or the root list), including `id` itself.
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// All ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ids from the root down to and including `id`.
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id).map(|_| id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.parent(current);
        }
        chain.reverse();
        chain
    }

    /// Node without children, carrying its arena id as handle.
    pub fn shallow_node(&self, id: NodeId) -> Option<UiNode> {
        let node = self.get(id)?;
        Some(UiNode {
            role: node.role.clone(),
            attributes: node.attributes.clone(),
            children: Vec::new(),
            handle: Some(id.handle()),
        })
    }

    /// Node with its full captured subtree.
    pub fn subtree(&self, id: NodeId) -> Option<UiNode> {
        let mut node = self.shallow_node(id)?;
        node.children = self
            .children(id)
            .iter()
            .filter_map(|child| self.subtree(*child))
            .collect();
        Some(node)
    }
}
