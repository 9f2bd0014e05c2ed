use std::collections::BTreeMap;
use std::fmt;

use crate::errors::PathError;
use crate::escape::escape_value;

/// Informal attribute spellings accepted in paths, keyed by lowercase alias.
pub const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[
    ("title", "AXTitle"),
    ("description", "AXDescription"),
    ("desc", "AXDescription"),
    ("value", "AXValue"),
    ("id", "AXIdentifier"),
    ("identifier", "AXIdentifier"),
    ("help", "AXHelp"),
    ("role", "AXRole"),
    ("subrole", "AXSubrole"),
    ("roledescription", "AXRoleDescription"),
    ("placeholder", "AXPlaceholderValue"),
    ("filename", "AXFilename"),
    ("name", "AXName"),
    ("enabled", "AXEnabled"),
    ("focused", "AXFocused"),
    ("selected", "AXSelected"),
    ("bundleid", "bundleId"),
    ("bundleidentifier", "bundleId"),
];

/// Maps an informal attribute name to its platform spelling.
///
/// Names already carrying the `AX` prefix and unknown names are kept as-is.
pub fn normalize_attribute_name(name: &str) -> String {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if trimmed.starts_with("AX") {
        return trimmed.to_string();
    }
    let lower = trimmed.to_ascii_lowercase();
    ATTRIBUTE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Roles are bare words: nothing that would open a clause, end the segment
/// or need quoting.
pub(crate) fn role_is_valid(role: &str) -> bool {
    !role.is_empty()
        && !role.chars().any(|ch| {
            ch.is_whitespace() || matches!(ch, '[' | ']' | '#' | '/' | '@' | '"' | '=' | '\\')
        })
}

/// Attribute names stop at the first `=`, bracket or slash, and a leading `@`
/// would be stripped again on the way back in.
pub(crate) fn attribute_name_is_valid(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.starts_with('@')
        && !name.chars().any(|ch| matches!(ch, '=' | '[' | ']' | '/'))
}

/// One role/attributes/index step of an element path.
///
/// Attribute names are normalized on insertion and kept sorted, so two
/// segments built from equivalent spellings compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment {
    role: String,
    attributes: BTreeMap<String, String>,
    index: Option<i64>,
}

impl PathSegment {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            attributes: BTreeMap::new(),
            index: None,
        }
    }

    pub(crate) fn from_parts(
        role: String,
        attributes: BTreeMap<String, String>,
        index: Option<i64>,
    ) -> Self {
        Self {
            role,
            attributes,
            index,
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(normalize_attribute_name(name), value.into());
        self
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn without_index(&self) -> Self {
        Self {
            role: self.role.clone(),
            attributes: self.attributes.clone(),
            index: None,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Looks up an expected value by canonical or informal name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&normalize_attribute_name(name))
            .map(String::as_str)
    }

    pub fn index(&self) -> Option<i64> {
        self.index
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Checks that the canonical text of this segment parses back to it.
    pub(crate) fn check(&self, segment_index: usize) -> Result<(), PathError> {
        if self.role.trim().is_empty() {
            return Err(PathError::EmptySegment { segment_index });
        }
        if !role_is_valid(&self.role) {
            return Err(PathError::attribute(
                segment_index,
                self.role.clone(),
                "role cannot contain whitespace or any of []#/@\"=\\",
            ));
        }
        if let Some(name) = self
            .attributes
            .keys()
            .find(|name| !attribute_name_is_valid(name))
        {
            return Err(PathError::attribute(
                segment_index,
                name.clone(),
                "attribute name must be non-empty and free of '=', '[', ']' and '/'",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.role)?;
        for (name, value) in &self.attributes {
            write!(f, "[@{}=\"{}\"]", name, escape_value(value))?;
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
