//! Path in, node out, opaque id back to the same path, and a diff after an
//! action, wired the way the CLI wires them.

use std::path::Path;
use std::sync::Arc;

use axpath::tree_file::parse_tree;
use axpath::{AppContext, Config};
use axpath_change_detector::detect;
use axpath_core_types::NodeId;
use axpath_element_path::ElementPath;
use axpath_path_resolver::{capture_snapshot, generate_path, PathResolver, SnapshotWalker};

const BEFORE: &str = r#"{
  "role": "AXApplication",
  "attributes": {"AXTitle": "Calculator", "bundleId": "com.apple.calculator"},
  "children": [{
    "role": "AXWindow",
    "attributes": {"AXTitle": "Calculator"},
    "children": [
      {"role": "AXStaticText", "attributes": {"AXValue": "0"}},
      {"role": "AXButton", "attributes": {"AXDescription": "seven"}},
      {"role": "AXButton", "attributes": {"AXDescription": "equals"}}
    ]
  }]
}"#;

#[tokio::test]
async fn resolve_map_and_diff() {
    let ctx = AppContext::new(
        Config {
            opaque_id_capacity: 8,
            ..Config::default()
        },
        "axpath.yaml".into(),
    );
    let arena = Arc::new(parse_tree(Path::new("before.json"), BEFORE).unwrap());
    let resolver = PathResolver::new(Arc::new(SnapshotWalker::from_shared(arena.clone())));

    let requested = ElementPath::parse(
        r#"macos://ui/AXApplication[@bundleId="com.apple.calculator"]/AXWindow/AXButton[@AXDescription="Equals"]"#,
    )
    .unwrap();
    let node = resolver.resolve(&requested).await.unwrap();
    let id = NodeId::from_handle(node.handle.unwrap());
    let generated = generate_path(&arena, id).unwrap();
    assert_eq!(resolver.resolve(&generated).await.unwrap(), node);

    let token = ctx.opaque_ids().id_for(&generated.to_string());
    assert_eq!(
        ctx.opaque_ids().path_for(&token),
        Some(generated.to_string())
    );

    let after = BEFORE.replace(r#""AXValue": "0""#, r#""AXValue": "7""#);
    let after = parse_tree(Path::new("after.json"), &after).unwrap();
    let changes = detect(&capture_snapshot(&arena), &capture_snapshot(&after));
    assert_eq!(changes.summary(), "0 added, 0 removed, 1 modified");
    assert_eq!(changes.modified[0].path.last().role(), "AXStaticText");
}
