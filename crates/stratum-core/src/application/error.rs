//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! pure logic. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while rendering templates or regenerating sources.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A required configuration value is absent or blank.
    #[error("Missing configuration value: {name}")]
    ConfigurationMissing { name: String },

    /// Remote or local template content could not be fetched.
    #[error("Failed to fetch template source '{locator}': {reason}")]
    TemplateSourceFetch { locator: String, reason: String },

    #[error("Failed to read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },

    /// Any other filesystem operation (mkdir, rename, remove, list).
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A retired copy could not be restored after an interrupted run.
    #[error("Could not recover retired copy of {path}: {reason}")]
    RecoveryFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    pub fn fs(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigurationMissing { name } => vec![
                format!("Set '{name}' in stratum.toml or pass it on the command line"),
                "Run 'stratum config list' to see the effective configuration".into(),
            ],
            Self::TemplateSourceFetch { locator, .. } => vec![
                format!("Check that '{}' exists and is reachable", locator),
                "Relative locators are resolved against the template's directory".into(),
            ],
            Self::FileRead { path, .. } => vec![
                format!("Check that {} is readable", path.display()),
                "The file may be locked or not valid UTF-8".into(),
            ],
            Self::FileWrite { path, .. } | Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RecoveryFailed { path, .. } => vec![
                format!(
                    "Restore {}.retired by hand by removing the '.retired' suffix",
                    path.display()
                ),
                "Then run the command again".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationMissing { .. } => ErrorCategory::Configuration,
            Self::TemplateSourceFetch { .. } => ErrorCategory::NotFound,
            Self::FileRead { .. }
            | Self::FileWrite { .. }
            | Self::FilesystemError { .. }
            | Self::RecoveryFailed { .. } => ErrorCategory::Internal,
        }
    }
}
