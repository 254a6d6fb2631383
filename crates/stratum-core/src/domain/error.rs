// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep them alongside outcomes)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template node under '{parent}' has an empty name")]
    MissingNodeName { parent: String },

    #[error("Template description could not be parsed: {reason}")]
    TemplateParse { reason: String },

    // ========================================================================
    // Regeneration Errors
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cannot derive a class name from '{path}'")]
    InvalidSourcePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(msg) => vec![
                "Check your template description".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingNodeName { parent } => vec![
                format!("A 'dir' or 'file' node below '{}' has no name", parent),
                "Every dir/file node needs a non-empty \"name\" field".into(),
            ],
            Self::TemplateParse { .. } => vec![
                "The template must be a JSON (or .toml) tree of nodes".into(),
                "Nodes have type (root|dir|file), name, format (raw|url) and data".into(),
                "conflict is one of skip, warn or overwrite; dirs may have children".into(),
            ],
            Self::InvalidConfiguration(msg) => vec![
                format!("Configuration issue: {}", msg),
                "Check the [repository] section of stratum.toml".into(),
            ],
            Self::InvalidSourcePath { path } => vec![
                format!("'{}' does not look like a source file", path),
                "Source files are expected under src/main/java".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_)
            | Self::MissingNodeName { .. }
            | Self::TemplateParse { .. } => ErrorCategory::Validation,
            Self::InvalidConfiguration(_) => ErrorCategory::Configuration,
            Self::InvalidSourcePath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
