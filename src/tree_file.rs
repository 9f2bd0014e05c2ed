//! Captured accessibility trees on disk.
//!
//! A tree file is JSON holding either a single root node or an array of
//! roots, each node shaped as `{"role", "attributes", "children"}`.

use std::path::Path;

use axpath_core_types::{NodeArena, UiNode};
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::errors::AppError;

#[derive(Deserialize)]
#[serde(untagged)]
enum TreeFile {
    Roots(Vec<UiNode>),
    Root(UiNode),
}

pub fn parse_tree(path: &Path, content: &str) -> Result<NodeArena, AppError> {
    let file: TreeFile = serde_json::from_str(content).map_err(|source| AppError::TreeFormat {
        path: path.to_path_buf(),
        source,
    })?;
    let roots = match file {
        TreeFile::Roots(roots) => roots,
        TreeFile::Root(root) => vec![root],
    };
    if roots.is_empty() {
        return Err(AppError::EmptyTree {
            path: path.to_path_buf(),
        });
    }
    Ok(NodeArena::from_roots(roots))
}

pub async fn load_tree(path: &Path) -> Result<NodeArena, AppError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let arena = parse_tree(path, &content)?;
    debug!(path = %path.display(), nodes = arena.len(), "Loaded accessibility tree");
    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_root_or_root_list() {
        let path = Path::new("tree.json");
        let single = parse_tree(
            path,
            r#"{"role": "AXApplication", "children": [{"role": "AXWindow"}]}"#,
        )
        .unwrap();
        assert_eq!(single.len(), 2);

        let many = parse_tree(path, r#"[{"role": "AXApplication"}, {"role": "AXApplication"}]"#)
            .unwrap();
        assert_eq!(many.roots().len(), 2);
    }

    #[test]
    fn rejects_empty_and_malformed_trees() {
        let path = Path::new("tree.json");
        assert!(matches!(
            parse_tree(path, "[]"),
            Err(AppError::EmptyTree { .. })
        ));
        assert!(matches!(
            parse_tree(path, r#"{"attributes": {}}"#),
            Err(AppError::TreeFormat { .. })
        ));
    }
}
