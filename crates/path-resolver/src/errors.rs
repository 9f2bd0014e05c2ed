//! Error types for path resolution

use axpath_element_path::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The path text did not parse.
    #[error(transparent)]
    Path(#[from] PathError),

    /// No child satisfies the segment.
    #[error("no element matches segment {segment_index} ({segment})")]
    NoMatchingElements {
        segment_index: usize,
        segment: String,
        /// Bounded sample of the siblings that were considered.
        siblings: Vec<String>,
    },

    /// Several children match and the segment has no index.
    #[error(
        "segment {segment_index} ({segment}) matches {match_count} elements; add an index such as [0]"
    )]
    AmbiguousMatchNoIndex {
        segment_index: usize,
        segment: String,
        match_count: usize,
    },

    /// The index does not address one of the matches.
    #[error(
        "index {index} is out of range for segment {segment_index} ({segment}); {match_count} elements match"
    )]
    IndexOutOfRange {
        segment_index: usize,
        segment: String,
        index: i64,
        match_count: usize,
    },

    /// The tree walker failed while expanding the segment.
    #[error("segment {segment_index} ({segment}) could not be resolved: {reason}")]
    SegmentResolutionFailed {
        segment_index: usize,
        segment: String,
        reason: String,
    },
}

impl ResolveError {
    pub fn segment_index(&self) -> Option<usize> {
        match self {
            ResolveError::Path(err) => err.segment_index(),
            ResolveError::NoMatchingElements { segment_index, .. }
            | ResolveError::AmbiguousMatchNoIndex { segment_index, .. }
            | ResolveError::IndexOutOfRange { segment_index, .. }
            | ResolveError::SegmentResolutionFailed { segment_index, .. } => Some(*segment_index),
        }
    }

    /// Walker failures may succeed on a later attempt; the rest will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::SegmentResolutionFailed { .. })
    }
}
