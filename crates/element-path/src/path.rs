use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::PathError;
use crate::parser::Parser;
use crate::segment::PathSegment;

/// Literal prefix every element path starts with.
pub const PATH_PREFIX: &str = "macos://ui/";

/// A non-empty, immutable sequence of segments.
///
/// Equality, hashing and ordering follow the structured form, which is in
/// one-to-one correspondence with the canonical text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementPath {
    segments: Vec<PathSegment>,
}

impl ElementPath {
    pub fn new(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::EmptyPath);
        }
        for (segment_index, segment) in segments.iter().enumerate() {
            segment.check(segment_index)?;
        }
        Ok(Self { segments })
    }

    pub fn parse(text: &str) -> Result<Self, PathError> {
        Parser::parse(text)
    }

    /// Cheap shape test; does not validate the rest of the grammar.
    pub fn is_path_like(text: &str) -> bool {
        text.trim_start().starts_with(PATH_PREFIX)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> &PathSegment {
        &self.segments[0]
    }

    pub fn last(&self) -> &PathSegment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn appending(&self, segment: PathSegment) -> Result<Self, PathError> {
        self.appending_all([segment])
    }

    pub fn appending_all(
        &self,
        more: impl IntoIterator<Item = PathSegment>,
    ) -> Result<Self, PathError> {
        let mut segments = self.segments.clone();
        segments.extend(more);
        Self::new(segments)
    }

    /// Path one level up, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Self> {
        self.prefix(self.segments.len() - 1)
    }

    /// The first `len` segments, when `1 <= len <= self.len()`.
    pub fn prefix(&self, len: usize) -> Option<Self> {
        if len == 0 || len > self.segments.len() {
            return None;
        }
        Some(Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Strict descendant test by whole segments, not by string prefix.
    pub fn is_descendant_of(&self, ancestor: &ElementPath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }

    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PATH_PREFIX)?;
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ElementPath {
    type Err = PathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Parser::parse(text)
    }
}

impl Serialize for ElementPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Parser::parse(&text).map_err(serde::de::Error::custom)
    }
}
