//! Token substitution for template paths and file contents.
//!
//! Templates reference project facts through `${name}` tokens. Paths only
//! understand the tokens that make sense as directory names; contents
//! additionally understand project coordinates and three escape tokens that
//! let template authors write characters which would otherwise collide with
//! the token syntax.
//!
//! | Token              | Path                     | Content          |
//! |--------------------|--------------------------|------------------|
//! | `${basePackage}`   | `com/acme/shop`          | `com.acme.shop`  |
//! | `${artifactId}`    | artifact id (if known)   | artifact id      |
//! | `${groupId}`       | -                        | group id         |
//! | `${version}`       | -                        | version          |
//! | `${symbol_pound}`  | -                        | `#`              |
//! | `${symbol_escape}` | -                        | `\`              |
//! | `${symbol_dollar}` | -                        | `$`              |

use std::path::MAIN_SEPARATOR_STR;

pub const TOKEN_BASE_PACKAGE: &str = "${basePackage}";
pub const TOKEN_GROUP_ID: &str = "${groupId}";
pub const TOKEN_ARTIFACT_ID: &str = "${artifactId}";
pub const TOKEN_VERSION: &str = "${version}";
pub const TOKEN_POUND: &str = "${symbol_pound}";
pub const TOKEN_ESCAPE: &str = "${symbol_escape}";
pub const TOKEN_DOLLAR: &str = "${symbol_dollar}";

/// Project facts available to token substitution.
///
/// Immutable after construction; `with_*` methods consume and return a new
/// context, the same way a render context is built fluently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    base_package: String,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

impl TokenContext {
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
            ..Self::default()
        }
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    /// Expand the path-eligible tokens in `path`.
    ///
    /// `${artifactId}` is left untouched when the artifact id is unknown or
    /// empty, so a template never silently collapses a path segment.
    pub fn expand_path(&self, path: &str) -> String {
        let mut result = path.replace(
            TOKEN_BASE_PACKAGE,
            &self.base_package.replace('.', MAIN_SEPARATOR_STR),
        );
        if let Some(artifact_id) = self.artifact_id.as_deref().filter(|a| !a.is_empty()) {
            result = result.replace(TOKEN_ARTIFACT_ID, artifact_id);
        }
        result
    }

    /// Expand every content token in `text`.
    ///
    /// Escapes are substituted last: their output is never scanned again, so
    /// `${symbol_dollar}{basePackage}` yields the literal `${basePackage}`.
    pub fn expand_content(&self, text: &str) -> String {
        let group_id = self.group_id.as_deref().unwrap_or_default();
        let artifact_id = self.artifact_id.as_deref().unwrap_or_default();
        let version = self.version.as_deref().unwrap_or_default();
        text.replace(TOKEN_BASE_PACKAGE, &self.base_package)
            .replace(TOKEN_GROUP_ID, group_id)
            .replace(TOKEN_ARTIFACT_ID, artifact_id)
            .replace(TOKEN_VERSION, version)
            .replace(TOKEN_POUND, "#")
            .replace(TOKEN_ESCAPE, "\\")
            .replace(TOKEN_DOLLAR, "$")
    }
}
