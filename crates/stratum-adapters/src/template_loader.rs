//! Template description loader.
//!
//! Reads a scaffold template description through a `TemplateSourceFetcher`
//! (so the description itself may be a local path or a URL) and parses it
//! into a validated [`TemplateNode`] tree.
//!
//! # Formats
//!
//! JSON is the default; a locator ending in `.toml` is parsed as TOML.
//!
//! ```toml
//! type = "root"
//!
//! [[children]]
//! type = "dir"
//! name = "${artifactId}-domain"
//!
//!   [[children.children]]
//!   type = "file"
//!   name = "pom.xml"
//!   format = "url"
//!   data = "files/domain-pom.xml"
//!   conflict = "skip"
//! ```

use std::sync::Arc;

use stratum_core::{
    application::ports::TemplateSourceFetcher,
    domain::{DomainError, TemplateNode},
    error::StratumResult,
};
use tracing::{debug, instrument};

/// Serialization format of a template description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Json,
    Toml,
}

impl DescriptionFormat {
    /// Pick the format from the locator's extension.
    pub fn from_locator(locator: &str) -> Self {
        let path = locator.split(['?', '#']).next().unwrap_or(locator);
        if path.to_ascii_lowercase().ends_with(".toml") {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

/// Parse and validate a description.
///
/// # Errors
///
/// [`DomainError::TemplateParse`] for malformed input or a tree that breaks
/// the node invariants (unnamed `dir`/`file` nodes, children under a file).
pub fn parse_description(
    content: &str,
    format: DescriptionFormat,
) -> Result<TemplateNode, DomainError> {
    let parsed: Result<TemplateNode, String> = match format {
        DescriptionFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DescriptionFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    let root = parsed.map_err(|reason| DomainError::TemplateParse { reason })?;

    root.validate().map_err(|e| DomainError::TemplateParse {
        reason: e.to_string(),
    })?;
    Ok(root)
}

pub struct TemplateDescriptionLoader {
    fetcher: Arc<dyn TemplateSourceFetcher>,
}

impl TemplateDescriptionLoader {
    pub fn new(fetcher: Arc<dyn TemplateSourceFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse the description at `locator`.
    #[instrument(skip(self))]
    pub fn load(&self, locator: &str) -> StratumResult<TemplateNode> {
        let content = self.fetcher.fetch(locator)?;
        let format = DescriptionFormat::from_locator(locator);
        let root = parse_description(&content, format)?;
        debug!(?format, nodes = root.node_count(), "Loaded template description");
        Ok(root)
    }
}
