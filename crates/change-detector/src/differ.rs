use std::collections::BTreeSet;

use axpath_element_path::ElementPath;
use tracing::debug;

use crate::model::{AddedNode, ChangeSet, ModifiedNode, Snapshot};
use crate::policy::DiffPolicy;

pub fn detect(before: &Snapshot, after: &Snapshot) -> ChangeSet {
    detect_with_policy(before, after, &DiffPolicy::default())
}

/// Diffs two snapshots, reporting additions and removals topmost-only.
///
/// A path nested under another added (or removed) path is folded into that
/// entry. Paths present on both sides are `modified` when their own role or
/// attributes differ, unless they sit under a reported addition or removal.
/// Every list comes out in path order.
pub fn detect_with_policy(before: &Snapshot, after: &Snapshot, policy: &DiffPolicy) -> ChangeSet {
    let added_keys: BTreeSet<&ElementPath> = after
        .keys()
        .filter(|path| policy.in_scope(path) && !before.contains_key(*path))
        .collect();
    let removed_keys: BTreeSet<&ElementPath> = before
        .keys()
        .filter(|path| policy.in_scope(path) && !after.contains_key(*path))
        .collect();

    let added: Vec<AddedNode> = topmost(&added_keys)
        .into_iter()
        .filter_map(|path| {
            after.get(path).map(|node| AddedNode {
                path: path.clone(),
                node: node.clone(),
            })
        })
        .collect();
    let removed: Vec<ElementPath> = topmost(&removed_keys).into_iter().cloned().collect();

    let modified: Vec<ModifiedNode> = before
        .iter()
        .filter(|(path, _)| policy.in_scope(path))
        .filter_map(|(path, old)| {
            let new = after.get(path)?;
            if policy.same_content(old, new) {
                return None;
            }
            if has_reported_ancestor(path, &added, &removed) {
                return None;
            }
            Some(ModifiedNode {
                path: path.clone(),
                before: old.clone(),
                after: new.clone(),
            })
        })
        .collect();

    let changes = ChangeSet {
        added,
        removed,
        modified,
    };
    debug!(
        "Diffed {} -> {} nodes: {}",
        before.len(),
        after.len(),
        changes.summary()
    );
    changes
}

/// Keeps the candidates with no strict ancestor among the candidates.
fn topmost<'a>(candidates: &BTreeSet<&'a ElementPath>) -> Vec<&'a ElementPath> {
    candidates
        .iter()
        .copied()
        .filter(|path| {
            !(1..path.len()).any(|len| {
                path.prefix(len)
                    .map(|ancestor| candidates.contains(&ancestor))
                    .unwrap_or(false)
            })
        })
        .collect()
}

fn has_reported_ancestor(path: &ElementPath, added: &[AddedNode], removed: &[ElementPath]) -> bool {
    added.iter().any(|entry| path.is_descendant_of(&entry.path))
        || removed.iter().any(|root| path.is_descendant_of(root))
}

#[cfg(test)]
mod tests {
    use axpath_core_types::UiNode;

    use super::*;

    fn path(text: &str) -> ElementPath {
        ElementPath::parse(&format!("macos://ui/{text}")).unwrap()
    }

    fn snapshot(entries: &[(&str, UiNode)]) -> Snapshot {
        entries
            .iter()
            .map(|(text, node)| (path(text), node.clone()))
            .collect()
    }

    #[test]
    fn topmost_drops_nested_candidates_only() {
        let a = path("AXWindow/AXGroup");
        let b = path("AXWindow/AXGroup/AXButton");
        let c = path("AXWindow/AXGroupBox");
        let candidates: BTreeSet<&ElementPath> = [&a, &b, &c].into_iter().collect();
        let kept = topmost(&candidates);
        assert_eq!(kept, vec![&a, &c]);
    }

    #[test]
    fn modified_is_reported_at_any_depth() {
        let before = snapshot(&[
            ("AXWindow", UiNode::new("AXWindow")),
            (
                "AXWindow/AXCheckBox",
                UiNode::new("AXCheckBox").with_attribute("AXValue", 0i64),
            ),
        ]);
        let after = snapshot(&[
            ("AXWindow", UiNode::new("AXWindow")),
            (
                "AXWindow/AXCheckBox",
                UiNode::new("AXCheckBox").with_attribute("AXValue", 1i64),
            ),
        ]);
        let changes = detect(&before, &after);
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
        assert_eq!(changes.modified.len(), 1);
        assert_eq!(changes.modified[0].path, path("AXWindow/AXCheckBox"));
        assert_eq!(changes.summary(), "0 added, 0 removed, 1 modified");
    }

    #[test]
    fn child_only_changes_do_not_mark_parent_modified() {
        let before = snapshot(&[(
            "AXWindow",
            UiNode::new("AXWindow").with_child(UiNode::new("AXButton")),
        )]);
        let after = snapshot(&[("AXWindow", UiNode::new("AXWindow"))]);
        assert!(!detect(&before, &after).has_changes());
    }

    #[test]
    fn policy_ignores_attributes_and_out_of_focus_paths() {
        let before = snapshot(&[
            ("AXWindow", UiNode::new("AXWindow")),
            (
                "AXWindow/AXStaticText",
                UiNode::new("AXStaticText").with_attribute("AXValue", "10:41"),
            ),
            ("AXMenuBar", UiNode::new("AXMenuBar")),
        ]);
        let after = snapshot(&[
            ("AXWindow", UiNode::new("AXWindow")),
            (
                "AXWindow/AXStaticText",
                UiNode::new("AXStaticText").with_attribute("AXValue", "10:42"),
            ),
        ]);

        let policy = DiffPolicy::default().ignoring("AXValue");
        let changes = detect_with_policy(&before, &after, &policy);
        assert!(changes.modified.is_empty());
        assert_eq!(changes.removed, vec![path("AXMenuBar")]);

        let focused = DiffPolicy::default().focused(path("AXWindow"));
        let changes = detect_with_policy(&before, &after, &focused);
        assert!(changes.removed.is_empty());
        assert_eq!(changes.modified.len(), 1);
    }
}
