use std::collections::BTreeMap;
use std::fmt;

/// Characters of a string attribute shown by [`UiNode::describe`].
const DESCRIBE_TEXT_LIMIT: usize = 40;

/// Opaque reference to a live element owned by the platform walker.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// Scalar attribute value as reported by the accessibility API.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(untagged))]
#[derive(Clone, Debug)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Text used when comparing against the quoted value of a path attribute.
    pub fn to_match_text(&self) -> String {
        self.to_string()
    }
}

/// Numbers compare by bit pattern, so a value always equals itself (NaN
/// included) and snapshot comparison stays reflexive.
impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Number(a), AttributeValue::Number(b)) => a.to_bits() == b.to_bits(),
            (AttributeValue::String(a), AttributeValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AttributeValue {}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::Number(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            AttributeValue::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

/// One accessibility element.
///
/// `children` is whatever the producer captured: a walker hands out shallow
/// nodes (no children) while snapshots carry the full subtree. The handle is
/// never serialized; it only has meaning inside the process that walked the
/// tree.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiNode {
    pub role: String,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[cfg_attr(
        feature = "serde-full",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<UiNode>,
    #[cfg_attr(feature = "serde-full", serde(skip))]
    pub handle: Option<NodeHandle>,
}

impl UiNode {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            handle: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = UiNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_handle(mut self, handle: NodeHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Attribute rendered as match text. `AXRole` falls back to the node role.
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        match self.attributes.get(name) {
            Some(value) => Some(value.to_match_text()),
            None if name == "AXRole" => Some(self.role.clone()),
            None => None,
        }
    }

    /// Compares role and attributes only; children are ignored.
    pub fn same_content(&self, other: &UiNode) -> bool {
        self.role == other.role && self.attributes == other.attributes
    }

    /// Number of nodes below this one in the captured subtree.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Short human-readable description, e.g. `AXButton AXTitle="OK"`.
    pub fn describe(&self) -> String {
        let mut out = self.role.clone();
        for (name, value) in &self.attributes {
            match value {
                AttributeValue::String(text) => {
                    let shown: String = text.chars().take(DESCRIBE_TEXT_LIMIT).collect();
                    if text.chars().count() > DESCRIBE_TEXT_LIMIT {
                        out.push_str(&format!(" {name}=\"{shown}...\""));
                    } else {
                        out.push_str(&format!(" {name}=\"{shown}\""));
                    }
                }
                other => out.push_str(&format!(" {name}={other}")),
            }
        }
        out
    }

    /// Copy of this node without its captured children.
    pub fn shallow(&self) -> UiNode {
        UiNode {
            role: self.role.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
            handle: self.handle,
        }
    }
}
