//! Human-readable explanation of a path walk.
//!
//! Diagnosis repeats the resolver's walk but keeps going past ambiguity
//! (continuing with the first match) and, at the segment that cannot be
//! satisfied, lists the nearest candidates with a per-attribute comparison.
//! The report is advisory text only.

use std::collections::BTreeSet;

use axpath_core_types::UiNode;
use axpath_element_path::{ElementPath, PathSegment};

use crate::matching::{attribute_matches, MatchStrategy};
use crate::resolver::{PathResolver, SIBLING_SAMPLE_LIMIT};

impl PathResolver {
    pub async fn diagnose(&self, path: &ElementPath) -> String {
        diagnose(self, path).await
    }
}

pub async fn diagnose(resolver: &PathResolver, path: &ElementPath) -> String {
    let mut report = Report::new(path);
    let mut current: Option<UiNode> = None;

    for (segment_index, segment) in path.segments().iter().enumerate() {
        let expansion = match &current {
            None => resolver.expand_roots(segment).await,
            Some(node) => resolver.expand(node, segment_index, segment).await,
        };
        let expansion = match expansion {
            Ok(expansion) => expansion,
            Err(err) => {
                report.line(format!("segment {segment_index} {segment}: {err}"));
                return report.finish();
            }
        };
        let scope = if current.is_none() { "roots" } else { "children" };
        let match_count = expansion.matches.len();

        match (match_count, segment.index()) {
            (0, _) => {
                report.line(format!(
                    "segment {segment_index} {segment}: no match among {} {scope}",
                    expansion.children.len()
                ));
                report.candidates(segment, &expansion.children);
                report.suggest_for(segment, &expansion.children);
                return report.finish();
            }
            (1, _) => {
                report.line(format!("segment {segment_index} {segment}: ok"));
            }
            (count, None) => {
                report.line(format!(
                    "segment {segment_index} {segment}: ambiguous, {count} matches; continuing with the first"
                ));
                report.suggest(format!(
                    "add an index to segment {segment_index}, e.g. {}",
                    segment.without_index().with_index(0)
                ));
            }
            (count, Some(index)) if index < 0 || index as usize >= count => {
                report.line(format!(
                    "segment {segment_index} {segment}: index {index} out of range for {count} matches; continuing with the first"
                ));
                report.suggest(format!(
                    "use an index between 0 and {} on segment {segment_index}",
                    count - 1
                ));
            }
            (count, Some(index)) => {
                report.line(format!(
                    "segment {segment_index} {segment}: ok, index {index} of {count} matches"
                ));
            }
        }

        let position = match segment.index() {
            Some(index) if index >= 0 && (index as usize) < match_count => index as usize,
            _ => 0,
        };
        current = Some(expansion.matches[position].clone());
    }

    if let Some(node) = current {
        report.line(format!("resolved to {}", node.describe()));
    }
    report.finish()
}

struct Report {
    lines: Vec<String>,
    suggestions: Vec<String>,
}

impl Report {
    fn new(path: &ElementPath) -> Self {
        Self {
            lines: vec![format!("diagnosing {path}")],
            suggestions: Vec::new(),
        }
    }

    fn line(&mut self, text: String) {
        self.lines.push(format!("  {text}"));
    }

    fn suggest(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !self.suggestions.contains(&text) {
            self.suggestions.push(text);
        }
    }

    /// Up to five nodes, same-role ones first, each with an attribute breakdown.
    fn candidates(&mut self, segment: &PathSegment, nodes: &[UiNode]) {
        let mut ranked: Vec<&UiNode> = nodes.iter().collect();
        ranked.sort_by_key(|node| !node.role.eq_ignore_ascii_case(segment.role()));

        if ranked.is_empty() {
            self.lines.push("    (no children)".to_string());
        }
        for (position, node) in ranked.iter().take(SIBLING_SAMPLE_LIMIT).enumerate() {
            self.lines.push(format!("    candidate {position}: {}", node.describe()));
            if node.role != segment.role() {
                self.lines.push(format!(
                    "      role: actual {}, expected {} (exact) -> mismatch",
                    node.role,
                    segment.role()
                ));
            }
            for (name, expected) in segment.attributes() {
                let strategy = MatchStrategy::for_attribute(name);
                let verdict = if attribute_matches(node, name, expected) {
                    "match"
                } else {
                    "mismatch"
                };
                let actual = node
                    .attribute_text(name)
                    .map(|text| format!("{text:?}"))
                    .unwrap_or_else(|| "<missing>".to_string());
                self.lines.push(format!(
                    "      {name}: actual {actual}, expected {expected:?} ({}) -> {verdict}",
                    strategy.name()
                ));
            }
        }
        if ranked.len() > SIBLING_SAMPLE_LIMIT {
            self.lines
                .push(format!("    ... {} more", ranked.len() - SIBLING_SAMPLE_LIMIT));
        }
    }

    fn suggest_for(&mut self, segment: &PathSegment, nodes: &[UiNode]) {
        let role = segment.role();
        if let Some(node) = nodes
            .iter()
            .find(|node| node.role != role && node.role.eq_ignore_ascii_case(role))
        {
            self.suggest(format!(
                "check role casing: found {} where the path says {role}",
                node.role
            ));
        } else if !nodes.iter().any(|node| node.role == role) {
            let roles: BTreeSet<&str> = nodes.iter().map(|node| node.role.as_str()).collect();
            let roles: Vec<&str> = roles.into_iter().take(SIBLING_SAMPLE_LIMIT).collect();
            self.suggest(format!(
                "no child has role {role}; available roles: {}",
                if roles.is_empty() {
                    "none".to_string()
                } else {
                    roles.join(", ")
                }
            ));
        }

        let same_role: Vec<&UiNode> = nodes
            .iter()
            .filter(|node| node.role.eq_ignore_ascii_case(role))
            .collect();
        for name in segment.attributes().keys() {
            if same_role.is_empty() {
                break;
            }
            if !same_role.iter().any(|node| node.attribute_text(name).is_some()) {
                let known: BTreeSet<&str> = same_role
                    .iter()
                    .flat_map(|node| node.attributes.keys().map(String::as_str))
                    .collect();
                let known: Vec<&str> = known.into_iter().collect();
                self.suggest(format!(
                    "check attribute spelling: no {role} exposes {name}; available: {}",
                    known.join(", ")
                ));
            }
        }

        if same_role.len() > 1 && segment.index().is_none() {
            self.suggest(format!(
                "{} {role} siblings exist; if attributes are too strict, drop them and add an index such as {}",
                same_role.len(),
                segment.without_index().with_index(0)
            ));
        }
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        if !self.suggestions.is_empty() {
            out.push_str("\nsuggestions:");
            for suggestion in &self.suggestions {
                out.push_str("\n  - ");
                out.push_str(suggestion);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::walker::SnapshotWalker;

    fn resolver() -> PathResolver {
        let root = UiNode::new("AXApplication").with_child(
            UiNode::new("AXWindow")
                .with_child(UiNode::new("AXButton").with_attribute("AXTitle", "Open"))
                .with_child(UiNode::new("AXButton").with_attribute("AXTitle", "Save"))
                .with_child(UiNode::new("AXTextField").with_attribute("AXValue", "draft")),
        );
        PathResolver::new(Arc::new(SnapshotWalker::from_roots([root])))
    }

    #[tokio::test]
    async fn reports_attribute_breakdown_at_failing_segment() {
        let path = ElementPath::parse(r#"macos://ui/AXApplication/AXWindow/AXButton[@AXTitle="Close"]"#)
            .unwrap();
        let report = resolver().diagnose(&path).await;
        assert!(report.contains("segment 1 AXWindow: ok"), "{report}");
        assert!(report.contains("segment 2"), "{report}");
        assert!(report.contains(r#"AXTitle: actual "Open", expected "Close" (substring) -> mismatch"#));
        assert!(report.contains("add an index"), "{report}");
    }

    #[tokio::test]
    async fn suggests_role_casing() {
        let path = ElementPath::parse("macos://ui/AXApplication/AXWindow/AXTextfield").unwrap();
        let report = resolver().diagnose(&path).await;
        assert!(report.contains("check role casing: found AXTextField"), "{report}");
    }

    #[tokio::test]
    async fn suggests_attribute_spelling() {
        let path =
            ElementPath::parse(r#"macos://ui/AXApplication/AXWindow/AXButton[@AXTitel="Save"]"#).unwrap();
        let report = resolver().diagnose(&path).await;
        assert!(report.contains("check attribute spelling"), "{report}");
        assert!(report.contains("AXTitel"), "{report}");
    }

    #[tokio::test]
    async fn first_segment_is_explained_like_the_rest() {
        let path = ElementPath::parse("macos://ui/AXWindow").unwrap();
        let report = resolver().diagnose(&path).await;
        assert!(report.contains("segment 0 AXWindow: no match among 1 roots"), "{report}");
        assert!(report.contains("available roles: AXApplication"), "{report}");
    }

    #[tokio::test]
    async fn continues_past_ambiguity() {
        let path = ElementPath::parse("macos://ui/AXApplication/AXWindow/AXButton").unwrap();
        let report = resolver().diagnose(&path).await;
        assert!(report.contains("ambiguous, 2 matches"), "{report}");
        assert!(report.contains(r#"resolved to AXButton AXTitle="Open""#), "{report}");
        assert!(report.contains("AXButton[0]"), "{report}");
    }
}
