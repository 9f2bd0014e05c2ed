use std::sync::Arc;

use async_trait::async_trait;
use axpath_core_types::{NodeArena, UiNode};
use axpath_element_path::{ElementPath, PathSegment};
use axpath_path_resolver::{
    generate_path, PathResolver, ResolveError, SnapshotWalker, TreeWalker, WalkerError,
};

fn duplicate_groups() -> PathResolver {
    let window = UiNode::new("AXWindow")
        .with_attribute("AXTitle", "Inspector")
        .with_child(
            UiNode::new("AXGroup")
                .with_attribute("AXTitle", "Duplicate")
                .with_attribute("AXIdentifier", "first"),
        )
        .with_child(UiNode::new("AXGroup").with_attribute("AXTitle", "Other"))
        .with_child(
            UiNode::new("AXGroup")
                .with_attribute("AXTitle", "Duplicate")
                .with_attribute("AXIdentifier", "second"),
        );
    PathResolver::new(Arc::new(SnapshotWalker::from_roots([window])))
}

#[tokio::test]
async fn ambiguous_segment_reports_match_count() {
    let resolver = duplicate_groups();
    let err = resolver
        .resolve_str(r#"macos://ui/AXWindow/AXGroup[@AXTitle="Duplicate"]"#)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::AmbiguousMatchNoIndex {
            segment_index: 1,
            segment: r#"AXGroup[@AXTitle="Duplicate"]"#.to_string(),
            match_count: 2,
        }
    );
}

#[tokio::test]
async fn either_index_spelling_selects_the_second_match() {
    let resolver = duplicate_groups();
    for text in [
        r#"macos://ui/AXWindow/AXGroup[@AXTitle="Duplicate"]#1"#,
        r#"macos://ui/AXWindow/AXGroup[@AXTitle="Duplicate"][1]"#,
    ] {
        let node = resolver.resolve_str(text).await.unwrap();
        assert_eq!(node.attribute_text("AXIdentifier").as_deref(), Some("second"));
    }
}

#[tokio::test]
async fn resolution_is_deterministic() {
    let resolver = duplicate_groups();
    let path = ElementPath::parse(r#"macos://ui/AXWindow/AXGroup[@AXTitle="Duplicate"][0]"#).unwrap();
    let first = resolver.resolve(&path).await.unwrap();
    let again = resolver.resolve(&path).await.unwrap();
    assert_eq!(first, again);
    assert_eq!(first.attribute_text("AXIdentifier").as_deref(), Some("first"));
}

#[tokio::test]
async fn indices_outside_the_match_range_fail() {
    let resolver = duplicate_groups();
    for index in [2i64, 7, -1] {
        let path = ElementPath::parse("macos://ui/AXWindow")
            .unwrap()
            .appending(
                PathSegment::new("AXGroup")
                    .with_attribute("AXTitle", "Duplicate")
                    .with_index(index),
            )
            .unwrap();
        let err = resolver.resolve(&path).await.unwrap_err();
        match err {
            ResolveError::IndexOutOfRange {
                segment_index,
                index: reported,
                match_count,
                ..
            } => {
                assert_eq!(segment_index, 1);
                assert_eq!(reported, index);
                assert_eq!(match_count, 2);
            }
            other => panic!("unexpected error for index {index}: {other:?}"),
        }
    }
}

#[tokio::test]
async fn parse_errors_surface_through_resolve_str() {
    let resolver = duplicate_groups();
    let err = resolver.resolve_str("ui/AXWindow").await.unwrap_err();
    assert!(matches!(err, ResolveError::Path(_)));
    assert_eq!(err.segment_index(), None);
}

#[tokio::test]
async fn generated_paths_resolve_back_to_their_node() {
    let list = UiNode::new("AXList").with_children((0..4).map(|row| {
        UiNode::new("AXRow")
            .with_attribute("AXIdentifier", format!("row-{}", row % 2))
            .with_child(UiNode::new("AXStaticText").with_attribute("AXValue", format!("item {row}")))
    }));
    let arena = NodeArena::from_roots([
        UiNode::new("AXApplication")
            .with_attribute("AXTitle", "Finder")
            .with_child(UiNode::new("AXWindow").with_child(list.clone())),
        UiNode::new("AXApplication")
            .with_attribute("AXTitle", "Finder")
            .with_child(UiNode::new("AXWindow").with_child(list)),
    ]);
    let resolver = PathResolver::new(Arc::new(SnapshotWalker::new(arena.clone())));

    for id in arena.ids() {
        let path = generate_path(&arena, id).unwrap();
        let node = resolver
            .resolve(&path)
            .await
            .unwrap_or_else(|err| panic!("{path} failed: {err}"));
        assert_eq!(node.handle, Some(id.handle()), "{path}");
    }
}

struct FailingWalker;

#[async_trait]
impl TreeWalker for FailingWalker {
    async fn roots(&self, _first: &PathSegment) -> Result<Vec<UiNode>, WalkerError> {
        Ok(vec![UiNode::new("AXWindow")])
    }

    async fn children(&self, _node: &UiNode) -> Result<Vec<UiNode>, WalkerError> {
        Err(WalkerError::Backend("accessibility server not responding".into()))
    }
}

#[tokio::test]
async fn walker_failures_become_segment_resolution_errors() {
    let resolver = PathResolver::new(Arc::new(FailingWalker));
    let err = resolver
        .resolve_str("macos://ui/AXWindow/AXButton")
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    match err {
        ResolveError::SegmentResolutionFailed {
            segment_index,
            reason,
            ..
        } => {
            assert_eq!(segment_index, 1);
            assert!(reason.contains("not responding"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
