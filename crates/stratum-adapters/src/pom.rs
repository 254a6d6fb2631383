//! Project coordinates from `pom.xml`.
//!
//! Only the project's own `groupId`, `artifactId` and `version` are needed,
//! so this is a handful of regexes rather than an XML parser. Nested blocks
//! that carry their own coordinates (parent, dependencies, plugins) are cut
//! out first; the parent's group and version are used when the project
//! inherits them.

use std::path::Path;

use regex::Regex;
use stratum_core::{application::ApplicationError, error::StratumResult};
use tracing::debug;

pub const POM_FILE: &str = "pom.xml";

const NESTED_BLOCKS: [&str; 7] = [
    "parent",
    "dependencies",
    "dependencyManagement",
    "build",
    "modules",
    "profiles",
    "reporting",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

impl PomMetadata {
    /// Read `pom.xml` in `dir`; `None` when there is none.
    pub fn read(dir: &Path) -> StratumResult<Option<Self>> {
        let path = dir.join(POM_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ApplicationError::FileRead {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let metadata = Self::parse(&content);
        debug!(path = %path.display(), ?metadata, "Read project coordinates");
        Ok(Some(metadata))
    }

    pub fn parse(content: &str) -> Self {
        let without_comments = strip_block(content, r"<!--.*?-->");
        let parent = capture(&without_comments, r"(?s)<parent>(.*?)</parent>").unwrap_or_default();

        let mut own = without_comments;
        for block in NESTED_BLOCKS {
            own = strip_block(&own, &format!(r"<{0}\b[^>]*>.*?</{0}>", block));
        }

        Self {
            group_id: element(&own, "groupId").or_else(|| element(&parent, "groupId")),
            artifact_id: element(&own, "artifactId"),
            version: element(&own, "version").or_else(|| element(&parent, "version")),
        }
    }
}

fn strip_block(content: &str, pattern: &str) -> String {
    match Regex::new(&format!("(?s){}", pattern)) {
        Ok(re) => re.replace_all(content, "").into_owned(),
        Err(_) => content.to_string(),
    }
}

fn capture(content: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn element(content: &str, name: &str) -> Option<String> {
    capture(content, &format!(r"<{0}>\s*([^<]*?)\s*</{0}>", name)).filter(|v| !v.is_empty())
}
