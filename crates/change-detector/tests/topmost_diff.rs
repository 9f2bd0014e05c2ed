use axpath_change_detector::{detect, detect_with_policy, ChangeSet, DiffPolicy, Snapshot};
use axpath_core_types::{NodeArena, UiNode};
use axpath_element_path::ElementPath;
use axpath_path_resolver::capture_snapshot;
use serde_json::json;

fn window(children: Vec<UiNode>) -> Snapshot {
    let root = UiNode::new("AXApplication")
        .with_attribute("AXTitle", "Mail")
        .with_child(
            UiNode::new("AXWindow")
                .with_attribute("AXTitle", "Inbox")
                .with_children(children),
        );
    capture_snapshot(&NodeArena::from_roots([root]))
}

fn sheet() -> UiNode {
    UiNode::new("AXSheet")
        .with_attribute("AXIdentifier", "compose")
        .with_child(
            UiNode::new("AXGroup")
                .with_attribute("AXIdentifier", "fields")
                .with_child(UiNode::new("AXTextField").with_attribute("AXTitle", "To"))
                .with_child(UiNode::new("AXTextField").with_attribute("AXTitle", "Subject")),
        )
        .with_child(UiNode::new("AXButton").with_attribute("AXTitle", "Send"))
}

#[test]
fn identical_snapshots_have_no_changes() {
    let snapshot = window(vec![sheet()]);
    let changes = detect(&snapshot, &snapshot);
    assert_eq!(changes, ChangeSet::empty());
    assert!(!changes.has_changes());
    assert_eq!(changes.summary(), "no changes");
}

#[test]
fn nan_values_do_not_show_up_as_changes() {
    let snapshot = window(vec![
        UiNode::new("AXSlider").with_attribute("AXValue", f64::NAN),
        UiNode::new("AXStaticText").with_attribute("AXValue", "volume"),
    ]);
    assert_eq!(detect(&snapshot, &snapshot).summary(), "no changes");

    let policy = DiffPolicy::default().ignoring("AXTitle");
    assert!(!detect_with_policy(&snapshot, &snapshot, &policy).has_changes());
}

#[test]
fn new_subtree_is_reported_once() {
    let before = window(vec![UiNode::new("AXToolbar")]);
    let after = window(vec![UiNode::new("AXToolbar"), sheet()]);
    let changes = detect(&before, &after);

    assert_eq!(changes.added.len(), 1);
    assert!(changes.removed.is_empty());
    assert!(changes.modified.is_empty());
    let added = &changes.added[0];
    assert_eq!(added.path.last().role(), "AXSheet");
    assert_eq!(added.node.descendant_count(), 4);
}

#[test]
fn removed_subtree_is_reported_by_path_once() {
    let before = window(vec![UiNode::new("AXToolbar"), sheet()]);
    let after = window(vec![UiNode::new("AXToolbar")]);
    let changes = detect(&before, &after);

    assert!(changes.added.is_empty());
    assert_eq!(
        changes.removed,
        vec![ElementPath::parse(
            r#"macos://ui/AXApplication[@AXTitle="Mail"]/AXWindow[@AXTitle="Inbox"]/AXSheet[@AXIdentifier="compose"]"#
        )
        .unwrap()]
    );
}

#[test]
fn retitled_window_moves_its_whole_subtree() {
    let before = window(vec![sheet()]);
    let mut after = Snapshot::new();
    for (path, node) in window(vec![sheet()]) {
        let text = path.to_string().replace("Inbox", "Drafts");
        after.insert(ElementPath::parse(&text).unwrap(), node);
    }
    let changes = detect(&before, &after);

    assert_eq!(changes.added.len(), 1);
    assert_eq!(changes.removed.len(), 1);
    assert_eq!(changes.added[0].path.last().attribute("AXTitle"), Some("Drafts"));
    assert!(changes.modified.is_empty());
}

#[test]
fn change_set_serializes_paths_as_strings() {
    let before = window(vec![]);
    let after = window(vec![UiNode::new("AXButton").with_attribute("AXTitle", "Reply")]);
    let value = serde_json::to_value(detect(&before, &after)).unwrap();
    assert_eq!(
        value["added"][0]["path"],
        json!(r#"macos://ui/AXApplication[@AXTitle="Mail"]/AXWindow[@AXTitle="Inbox"]/AXButton[@AXTitle="Reply"]"#)
    );
    assert_eq!(value["added"][0]["node"]["attributes"]["AXTitle"], "Reply");
    assert_eq!(value["removed"], json!([]));
}
