//! Declarative scaffold template tree.
//!
//! A template description is a tree of typed nodes. The root contributes no
//! path segment, directories contribute one segment each, and files are the
//! leaves that carry content.
//!
//! ```text
//! root
//! ├── dir  "${artifactId}-domain"
//! │   └── dir  "src/main/java/${basePackage}/domain"
//! │       └── file "package-info.java"   (raw, conflict = skip)
//! └── file "README.md"                    (url, conflict = overwrite)
//! ```
//!
//! ## Wire format
//!
//! The serde field names match the template description files:
//!
//! ```json
//! {
//!   "type": "root",
//!   "children": [
//!     { "type": "dir", "name": "docs", "children": [
//!       { "type": "file", "name": "README.md", "format": "raw",
//!         "data": "# ${artifactId}", "conflict": "overwrite" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Nodes are parsed once and never mutated; the renderer consumes the tree
//! top-down exactly once.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Node type: `root | dir | file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Dir,
    File,
}

/// Where a file node's content comes from: `raw | url`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// `data` is the literal content.
    #[default]
    Raw,
    /// `data` is a locator (path or URL) fetched at render time.
    Url,
}

/// What to do when a file node's target already exists: `skip | warn | overwrite`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the existing file alone, silently.
    Skip,
    /// Leave the existing file alone and surface a warning.
    #[default]
    Warn,
    /// Delete and rewrite.
    Overwrite,
}

/// One node of a scaffold template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Path segment; required for `dir` and `file`, ignored for `root`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "format", default)]
    pub source: ContentSource,

    /// Literal content (`raw`) or locator (`url`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default)]
    pub conflict: ConflictPolicy,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn root() -> Self {
        Self::new(NodeKind::Root, None)
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Dir, Some(name.into()))
    }

    /// A file node with inline content.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::File, Some(name.into()));
        node.data = Some(content.into());
        node
    }

    /// A file node whose content is fetched from `locator`.
    pub fn remote_file(name: impl Into<String>, locator: impl Into<String>) -> Self {
        let mut node = Self::file(name, locator);
        node.source = ContentSource::Url;
        node
    }

    fn new(kind: NodeKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            source: ContentSource::default(),
            data: None,
            conflict: ConflictPolicy::default(),
            children: Vec::new(),
        }
    }

    pub fn with_conflict(mut self, conflict: ConflictPolicy) -> Self {
        self.conflict = conflict;
        self
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    /// Segment name, empty for unnamed nodes.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Inline content or locator, empty when absent.
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or_default()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let below: usize = self.children.iter().map(TemplateNode::node_count).sum();
        1 + below
    }

    /// Check the tree invariants before anything touches the filesystem.
    ///
    /// Every `dir` and `file` node must have a non-empty name. Children of a
    /// `file` node would never be rendered, so they are rejected too.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_under("<root>")
    }

    fn validate_under(&self, parent: &str) -> Result<(), DomainError> {
        if self.kind != NodeKind::Root && self.name().trim().is_empty() {
            return Err(DomainError::MissingNodeName {
                parent: parent.to_string(),
            });
        }

        if self.kind == NodeKind::File && !self.children.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "file node '{}' cannot have children",
                self.name()
            )));
        }

        let here = match self.kind {
            NodeKind::Root => parent.to_string(),
            _ if parent == "<root>" => self.name().to_string(),
            _ => format!("{}/{}", parent, self.name()),
        };
        for child in &self.children {
            child.validate_under(&here)?;
        }

        Ok(())
    }
}
