//! Path generation for captured trees.

use std::collections::BTreeMap;

use axpath_core_types::{AttributeValue, NodeArena, NodeId, UiNode};
use axpath_element_path::{ElementPath, PathSegment};

use crate::matching::segment_matches;

/// Attributes copied into generated segments when present and non-empty.
pub const IDENTIFYING_ATTRIBUTES: &[&str] = &["AXIdentifier", "AXTitle", "AXDescription", "bundleId"];

/// Segment for `id` alone: role, identifying attributes, and an index only
/// when siblings would match the same segment.
pub fn segment_for(arena: &NodeArena, id: NodeId) -> Option<PathSegment> {
    let node = arena.get(id)?;
    let mut segment = PathSegment::new(node.role.clone());
    for name in IDENTIFYING_ATTRIBUTES {
        if let Some(AttributeValue::String(value)) = node.attributes.get(*name) {
            if !value.is_empty() {
                segment = segment.with_attribute(name, value.clone());
            }
        }
    }

    // Matching siblings are counted with the resolver's own matcher, so a
    // generated index always addresses this node during resolution.
    let colliding: Vec<NodeId> = arena
        .siblings(id)
        .iter()
        .copied()
        .filter(|sibling| {
            arena
                .shallow_node(*sibling)
                .map(|candidate| segment_matches(&candidate, &segment))
                .unwrap_or(false)
        })
        .collect();
    if colliding.len() > 1 {
        let position = colliding.iter().position(|sibling| *sibling == id)?;
        segment = segment.with_index(position as i64);
    }
    Some(segment)
}

/// Full path of `id`, built by following parent links up to its root.
pub fn generate_path(arena: &NodeArena, id: NodeId) -> Option<ElementPath> {
    let segments = arena
        .lineage(id)
        .into_iter()
        .map(|ancestor| segment_for(arena, ancestor))
        .collect::<Option<Vec<_>>>()?;
    ElementPath::new(segments).ok()
}

/// Every node of `arena` keyed by its generated path, each carrying its
/// captured subtree.
pub fn capture_snapshot(arena: &NodeArena) -> BTreeMap<ElementPath, UiNode> {
    let mut snapshot = BTreeMap::new();
    for id in arena.ids() {
        if let (Some(path), Some(node)) = (generate_path(arena, id), arena.subtree(id)) {
            snapshot.insert(path, node);
        }
    }
    snapshot
}
