//! Lint-style checks that go beyond syntax.
//!
//! Warnings are advisory and only produced in strict mode; syntax errors are
//! always returned as [`PathError`].

use std::fmt;

use serde::Serialize;

use crate::errors::PathError;
use crate::path::ElementPath;
use crate::segment::PathSegment;

/// Paths longer than this are flagged as fragile.
pub const MAX_RECOMMENDED_SEGMENTS: usize = 10;

/// Roles that routinely appear several times under one parent.
const REPEATING_ROLES: &[&str] = &[
    "AXButton",
    "AXGroup",
    "AXStaticText",
    "AXCell",
    "AXRow",
    "AXImage",
    "AXTextField",
    "AXCheckBox",
    "AXRadioButton",
    "AXMenuItem",
    "AXLink",
    "AXScrollArea",
    "AXSplitGroup",
    "AXToolbar",
];

const LABELLED_CONTROLS: &[&str] = &["AXButton", "AXMenuItem", "AXCheckBox", "AXRadioButton"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationWarning {
    #[serde(rename_all = "camelCase")]
    MissingAttribute {
        segment_index: usize,
        role: String,
        expected: Vec<String>,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    PotentialAmbiguity {
        segment_index: usize,
        role: String,
        message: String,
    },
    #[serde(rename = "validationWarning", rename_all = "camelCase")]
    General {
        segment_index: usize,
        message: String,
    },
}

impl ValidationWarning {
    pub fn segment_index(&self) -> usize {
        match self {
            ValidationWarning::MissingAttribute { segment_index, .. }
            | ValidationWarning::PotentialAmbiguity { segment_index, .. }
            | ValidationWarning::General { segment_index, .. } => *segment_index,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationWarning::MissingAttribute { message, .. }
            | ValidationWarning::PotentialAmbiguity { message, .. }
            | ValidationWarning::General { message, .. } => message,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ValidationWarning::MissingAttribute { .. } => "missingAttribute",
            ValidationWarning::PotentialAmbiguity { .. } => "potentialAmbiguity",
            ValidationWarning::General { .. } => "validationWarning",
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] segment {}: {}",
            self.tag(),
            self.segment_index(),
            self.message()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub path: ElementPath,
    pub warnings: Vec<ValidationWarning>,
}

/// Parses `text` and, in strict mode, lints the result.
///
/// Non-strict mode only checks syntax. In strict mode `is_valid` is true
/// exactly when no warnings were produced.
pub fn validate(text: &str, strict: bool) -> Result<ValidationReport, PathError> {
    let path = ElementPath::parse(text)?;
    if !strict {
        return Ok(ValidationReport {
            is_valid: true,
            path,
            warnings: Vec::new(),
        });
    }
    let warnings = lint(&path);
    Ok(ValidationReport {
        is_valid: warnings.is_empty(),
        path,
        warnings,
    })
}

/// All warnings for an already-parsed path, in segment order.
pub fn lint(path: &ElementPath) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for (segment_index, segment) in path.segments().iter().enumerate() {
        lint_segment(segment_index, segment, &mut warnings);
    }
    if path.len() > MAX_RECOMMENDED_SEGMENTS {
        warnings.push(ValidationWarning::General {
            segment_index: path.len() - 1,
            message: format!(
                "path has {} segments; paths deeper than {} break easily when the UI changes",
                path.len(),
                MAX_RECOMMENDED_SEGMENTS
            ),
        });
    }
    warnings
}

fn lint_segment(segment_index: usize, segment: &PathSegment, warnings: &mut Vec<ValidationWarning>) {
    let role = segment.role();

    if !role.starts_with("AX") {
        warnings.push(ValidationWarning::General {
            segment_index,
            message: format!("role '{role}' does not follow the AX naming convention"),
        });
    }

    if segment_index > 0
        && !segment.has_attributes()
        && segment.index().is_none()
        && REPEATING_ROLES.contains(&role)
    {
        warnings.push(ValidationWarning::PotentialAmbiguity {
            segment_index,
            role: role.to_string(),
            message: format!(
                "{role} has no attributes or index and often has same-role siblings"
            ),
        });
    }

    let expected: &[&str] = match role {
        "AXApplication" => &["bundleId", "AXTitle"],
        "AXWindow" => &["AXTitle", "AXIdentifier"],
        r if LABELLED_CONTROLS.contains(&r) => &["AXTitle", "AXDescription", "AXIdentifier"],
        _ => &[],
    };
    if !expected.is_empty() && !expected.iter().any(|name| segment.attribute(name).is_some()) {
        warnings.push(ValidationWarning::MissingAttribute {
            segment_index,
            role: role.to_string(),
            expected: expected.iter().map(|name| name.to_string()).collect(),
            message: format!("{role} is usually identified by one of {}", expected.join(", ")),
        });
    }

    if segment.index().is_some() && segment.attribute("AXIdentifier").is_some() {
        warnings.push(ValidationWarning::General {
            segment_index,
            message: "index is likely unnecessary on a segment with AXIdentifier".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_strict_mode_only_checks_syntax() {
        let report = validate("macos://ui/Window/AXButton", false).unwrap();
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn syntax_errors_are_raised_in_both_modes() {
        assert!(validate("macos://ui/AXButton[x]", false).is_err());
        assert!(validate("macos://ui/AXButton[x]", true).is_err());
    }

    #[test]
    fn well_identified_path_is_clean() {
        let report = validate(
            r#"macos://ui/AXApplication[@bundleId="com.apple.calculator"]/AXWindow[@AXTitle="Calculator"]/AXButton[@AXDescription="Equals"]"#,
            true,
        )
        .unwrap();
        assert!(report.is_valid, "{:?}", report.warnings);
    }

    #[test]
    fn flags_naming_ambiguity_and_missing_attributes() {
        let report = validate("macos://ui/AXApplication/AXWindow/AXGroup/button", true).unwrap();
        assert!(!report.is_valid);
        let tags: Vec<(&str, usize)> = report
            .warnings
            .iter()
            .map(|w| (w.tag(), w.segment_index()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("missingAttribute", 0),
                ("missingAttribute", 1),
                ("potentialAmbiguity", 2),
                ("validationWarning", 3),
            ]
        );
    }

    #[test]
    fn flags_unnecessary_index_and_depth() {
        let mut text = String::from(r#"macos://ui/AXWindow[@AXIdentifier="main"][0]"#);
        for _ in 0..10 {
            text.push_str(r#"/AXGroup[@AXIdentifier="g"]"#);
        }
        let report = validate(&text, true).unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| w.segment_index() == 0 && w.message().contains("unnecessary")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.segment_index() == 10 && w.message().contains("11 segments")));
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let warning = ValidationWarning::General {
            segment_index: 2,
            message: "x".into(),
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["kind"], "validationWarning");
        assert_eq!(value["segmentIndex"], 2);
    }
}
