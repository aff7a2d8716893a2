//! # Configuration Tree
//!
//! The already-parsed descriptor tree scopes are loaded from. Each element has a
//! tag, attributes, optional text and children, so XML-shaped documents map onto it
//! directly and JSON documents deserialize into it through serde.
//!
//! ```text
//! scopes/scope{name}/serverDetectionApproach/approach{name,active}
//! scopes/scope{name}/reporting/configuration/filtering/{ranges,services}/{include,exclude}/{range,service}
//! scopes/scope{name}/reporting/reporter{name}/filtering/...
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag used for comment nodes.
pub const COMMENT_TAG: &str = "#comment";

/// Attribute that switches an element off.
pub const ACTIVE_ATTR: &str = "active";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(COMMENT_TAG).with_text(text)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ConfigNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    /// Trimmed text content, `None` when blank.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// The `name` attribute, falling back to the text content.
    pub fn identifier(&self) -> Option<&str> {
        self.name().or_else(|| self.text())
    }

    pub fn is_comment(&self) -> bool {
        self.tag == COMMENT_TAG
    }

    /// Elements are active unless `active` says otherwise.
    pub fn is_active(&self) -> bool {
        match self.attr(ACTIVE_ATTR) {
            Some(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            None => true,
        }
    }

    /// Children that are neither comments nor switched off.
    pub fn elements(&self) -> impl Iterator<Item = &ConfigNode> {
        self.children
            .iter()
            .filter(|child| !child.is_comment() && child.is_active())
    }

    /// Active children with the given tag.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.elements().filter(move |child| child.tag == tag)
    }

    /// First active child with the given tag.
    pub fn element(&self, tag: &str) -> Option<&ConfigNode> {
        self.elements().find(|child| child.tag == tag)
    }

    /// Follows a `/`-separated path of tags through active children.
    pub fn find(&self, path: &str) -> Option<&ConfigNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.element(segment))
    }

    /// True when no active element lives below this node.
    pub fn is_empty(&self) -> bool {
        self.elements().next().is_none()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
