//! Per-attribute match strategies
//!
//! The strategy for an attribute is fixed by its name:
//! 1. Exact - identifiers, roles, bundle ids, flags, and anything unlisted
//! 2. Contains - descriptions and help text
//! 3. Substring - titles and values, tolerating truncation either way
//! 4. StartsWith - file and item names

use axpath_core_types::UiNode;
use axpath_element_path::PathSegment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrategy {
    Exact,
    Contains,
    Substring,
    StartsWith,
}

impl MatchStrategy {
    pub fn for_attribute(name: &str) -> Self {
        match name {
            "AXDescription" | "AXHelp" | "AXRoleDescription" => MatchStrategy::Contains,
            "AXTitle" | "AXValue" | "AXPlaceholderValue" => MatchStrategy::Substring,
            "AXFilename" | "AXName" => MatchStrategy::StartsWith,
            _ => MatchStrategy::Exact,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Contains => "contains",
            MatchStrategy::Substring => "substring",
            MatchStrategy::StartsWith => "starts-with",
        }
    }

    pub fn matches(&self, actual: &str, expected: &str) -> bool {
        match self {
            MatchStrategy::Exact => actual == expected,
            MatchStrategy::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
            MatchStrategy::Substring => {
                if actual == expected {
                    return true;
                }
                let actual = actual.to_lowercase();
                let expected = expected.to_lowercase();
                // An empty stored value would otherwise be "contained" in anything.
                actual.contains(&expected) || (!actual.is_empty() && expected.contains(&actual))
            }
            MatchStrategy::StartsWith => {
                actual.starts_with(expected)
                    || actual.to_lowercase().starts_with(&expected.to_lowercase())
            }
        }
    }
}

/// True when `node` has the segment's role and satisfies every attribute.
///
/// The segment index plays no part here; it only selects among matches.
pub fn segment_matches(node: &UiNode, segment: &PathSegment) -> bool {
    node.role == segment.role()
        && segment
            .attributes()
            .iter()
            .all(|(name, expected)| attribute_matches(node, name, expected))
}

pub fn attribute_matches(node: &UiNode, name: &str, expected: &str) -> bool {
    node.attribute_text(name)
        .map(|actual| MatchStrategy::for_attribute(name).matches(&actual, expected))
        .unwrap_or(false)
}
