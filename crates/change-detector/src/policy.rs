use std::collections::BTreeSet;

use axpath_core_types::{AttributeValue, UiNode};
use axpath_element_path::ElementPath;
use serde::{Deserialize, Serialize};

/// Narrows what a diff looks at.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffPolicy {
    /// Only this path and its descendants are compared.
    #[serde(default)]
    pub focus: Option<ElementPath>,
    /// Attributes left out of the content comparison, e.g. a ticking clock's
    /// `AXValue`.
    #[serde(default)]
    pub ignored_attributes: BTreeSet<String>,
}

impl DiffPolicy {
    pub fn focused(mut self, focus: ElementPath) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn ignoring(mut self, attribute: impl Into<String>) -> Self {
        self.ignored_attributes.insert(attribute.into());
        self
    }

    pub(crate) fn in_scope(&self, path: &ElementPath) -> bool {
        match &self.focus {
            Some(focus) => path == focus || path.is_descendant_of(focus),
            None => true,
        }
    }

    /// Role and attributes equal, children and ignored attributes aside.
    pub(crate) fn same_content(&self, before: &UiNode, after: &UiNode) -> bool {
        if self.ignored_attributes.is_empty() {
            return before.same_content(after);
        }
        before.role == after.role && self.visible(before).eq(self.visible(after))
    }

    fn visible<'a>(
        &'a self,
        node: &'a UiNode,
    ) -> impl Iterator<Item = (&'a String, &'a AttributeValue)> + 'a {
        node.attributes
            .iter()
            .filter(move |(name, _)| !self.ignored_attributes.contains(*name))
    }
}
