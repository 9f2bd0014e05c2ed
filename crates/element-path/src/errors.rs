//! Syntax errors raised while parsing or constructing element paths.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no segments.
    #[error("element path has no segments")]
    EmptyPath,

    /// The text does not start with the element path scheme.
    #[error("element path must start with '{expected}', found '{found}'")]
    InvalidPathPrefix {
        expected: &'static str,
        found: String,
    },

    /// A segment has no role, e.g. a trailing or doubled `/`.
    #[error("segment {segment_index} has an empty role")]
    EmptySegment { segment_index: usize },

    /// Malformed attribute clause: bad quoting, missing bracket or `=`.
    #[error("invalid attribute syntax in segment {segment_index} near '{token}': {reason}")]
    InvalidAttributeSyntax {
        segment_index: usize,
        token: String,
        reason: String,
    },

    /// Index clause whose token is not an integer.
    #[error("invalid index '{token}' in segment {segment_index}")]
    InvalidIndexSyntax { token: String, segment_index: usize },
}

impl PathError {
    pub(crate) fn attribute(
        segment_index: usize,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttributeSyntax {
            segment_index,
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Segment the error points at, when it concerns a single segment.
    pub fn segment_index(&self) -> Option<usize> {
        match self {
            PathError::EmptySegment { segment_index }
            | PathError::InvalidAttributeSyntax { segment_index, .. }
            | PathError::InvalidIndexSyntax { segment_index, .. } => Some(*segment_index),
            PathError::EmptyPath | PathError::InvalidPathPrefix { .. } => None,
        }
    }

    /// Raw offending text, when there is one.
    pub fn token(&self) -> Option<&str> {
        match self {
            PathError::InvalidPathPrefix { found, .. } => Some(found),
            PathError::InvalidAttributeSyntax { token, .. }
            | PathError::InvalidIndexSyntax { token, .. } => Some(token),
            PathError::EmptyPath | PathError::EmptySegment { .. } => None,
        }
    }
}
