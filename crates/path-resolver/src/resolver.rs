//! Segment-by-segment path resolution

use std::sync::Arc;

use axpath_core_types::UiNode;
use axpath_element_path::{ElementPath, PathSegment};
use tracing::{debug, info};

use crate::errors::ResolveError;
use crate::matching::segment_matches;
use crate::walker::TreeWalker;

/// Upper bound on sibling descriptions attached to `NoMatchingElements`.
pub const SIBLING_SAMPLE_LIMIT: usize = 5;

/// Children of one node (or the root list) split by whether they satisfy a
/// segment.
pub(crate) struct Expansion {
    pub children: Vec<UiNode>,
    pub matches: Vec<UiNode>,
}

impl Expansion {
    fn split(children: Vec<UiNode>, segment: &PathSegment) -> Self {
        let matches = children
            .iter()
            .filter(|child| segment_matches(child, segment))
            .cloned()
            .collect();
        Self { children, matches }
    }
}

#[derive(Clone)]
pub struct PathResolver {
    walker: Arc<dyn TreeWalker>,
}

impl PathResolver {
    pub fn new(walker: Arc<dyn TreeWalker>) -> Self {
        Self { walker }
    }

    pub fn walker(&self) -> &Arc<dyn TreeWalker> {
        &self.walker
    }

    /// Resolve a path to exactly one node.
    pub async fn resolve(&self, path: &ElementPath) -> Result<UiNode, ResolveError> {
        info!("Resolving element path: {}", path);
        let mut current = self.root(path.first()).await?;

        for (segment_index, segment) in path.segments().iter().enumerate().skip(1) {
            let expansion = self.expand(&current, segment_index, segment).await?;
            debug!(
                "Segment {} ({}) matched {} of {} children",
                segment_index,
                segment,
                expansion.matches.len(),
                expansion.children.len()
            );
            current = select(segment_index, segment, expansion)?;
        }

        Ok(current)
    }

    /// Parse `text` and resolve it.
    pub async fn resolve_str(&self, text: &str) -> Result<UiNode, ResolveError> {
        let path = ElementPath::parse(text)?;
        self.resolve(&path).await
    }

    /// Every node matching the last segment under the resolved parent, in
    /// enumeration order.
    ///
    /// An index on the last segment narrows the result to that one match.
    pub async fn candidates(&self, path: &ElementPath) -> Result<Vec<UiNode>, ResolveError> {
        let segment_index = path.len() - 1;
        let segment = path.last();
        let expansion = match path.parent() {
            Some(parent_path) => {
                let parent = self.resolve(&parent_path).await?;
                self.expand(&parent, segment_index, segment).await?
            }
            None => self.expand_roots(segment).await?,
        };
        let mut matches = expansion.matches;

        match segment.index() {
            None => Ok(matches),
            Some(index) => {
                let position = checked_position(index, matches.len()).ok_or_else(|| {
                    ResolveError::IndexOutOfRange {
                        segment_index,
                        segment: segment.to_string(),
                        index,
                        match_count: matches.len(),
                    }
                })?;
                Ok(vec![matches.swap_remove(position)])
            }
        }
    }

    /// The first segment follows the same disambiguation rules as the rest,
    /// applied to the walker's root list.
    pub(crate) async fn root(&self, first: &PathSegment) -> Result<UiNode, ResolveError> {
        let expansion = self.expand_roots(first).await?;
        debug!(
            "Segment 0 ({}) matched {} of {} roots",
            first,
            expansion.matches.len(),
            expansion.children.len()
        );
        select(0, first, expansion)
    }

    pub(crate) async fn expand_roots(&self, first: &PathSegment) -> Result<Expansion, ResolveError> {
        let roots = self.walker.roots(first).await.map_err(|err| {
            ResolveError::SegmentResolutionFailed {
                segment_index: 0,
                segment: first.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Expansion::split(roots, first))
    }

    pub(crate) async fn expand(
        &self,
        node: &UiNode,
        segment_index: usize,
        segment: &PathSegment,
    ) -> Result<Expansion, ResolveError> {
        let children = self.walker.children(node).await.map_err(|err| {
            ResolveError::SegmentResolutionFailed {
                segment_index,
                segment: segment.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Expansion::split(children, segment))
    }
}

/// Applies the disambiguation rules to one expanded segment.
pub(crate) fn select(
    segment_index: usize,
    segment: &PathSegment,
    expansion: Expansion,
) -> Result<UiNode, ResolveError> {
    let Expansion {
        children,
        mut matches,
    } = expansion;

    match (matches.len(), segment.index()) {
        (0, _) => Err(ResolveError::NoMatchingElements {
            segment_index,
            segment: segment.to_string(),
            siblings: children
                .iter()
                .take(SIBLING_SAMPLE_LIMIT)
                .map(UiNode::describe)
                .collect(),
        }),
        // A unique match wins whatever index was written.
        (1, _) => Ok(matches.remove(0)),
        (match_count, None) => Err(ResolveError::AmbiguousMatchNoIndex {
            segment_index,
            segment: segment.to_string(),
            match_count,
        }),
        (match_count, Some(index)) => match checked_position(index, match_count) {
            Some(position) => Ok(matches.swap_remove(position)),
            None => Err(ResolveError::IndexOutOfRange {
                segment_index,
                segment: segment.to_string(),
                index,
                match_count,
            }),
        },
    }
}

fn checked_position(index: i64, match_count: usize) -> Option<usize> {
    usize::try_from(index)
        .ok()
        .filter(|position| *position < match_count)
}
