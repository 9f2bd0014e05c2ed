use std::collections::BTreeMap;

use axpath_core_types::UiNode;
use axpath_element_path::ElementPath;
use serde::{Deserialize, Serialize};

/// Every captured node keyed by its path, each carrying its subtree.
pub type Snapshot = BTreeMap<ElementPath, UiNode>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddedNode {
    pub path: ElementPath,
    /// Subtree as captured in the later snapshot.
    pub node: UiNode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifiedNode {
    pub path: ElementPath,
    pub before: UiNode,
    pub after: UiNode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: Vec<AddedNode>,
    pub removed: Vec<ElementPath>,
    pub modified: Vec<ModifiedNode>,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty())
    }

    /// One-line summary, e.g. `1 added, 0 removed, 2 modified`.
    pub fn summary(&self) -> String {
        if !self.has_changes() {
            return "no changes".to_string();
        }
        format!(
            "{} added, {} removed, {} modified",
            self.added.len(),
            self.removed.len(),
            self.modified.len()
        )
    }
}
