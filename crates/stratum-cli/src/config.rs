//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the values derived
//! from it (`RepositoryConfig`, `TokenContext`).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (merged at the call-site, not here)
//! 2. `STRATUM__SECTION__KEY` environment variables (`.env` included)
//! 3. `--config FILE`
//! 4. `./stratum.toml`
//! 5. User config file (`config.toml` in the platform config dir)
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stratum_adapters::project_layout::{DEFAULT_ADAPTER_SUFFIX, DEFAULT_DOMAIN_SUFFIX};
use stratum_core::domain::{
    DEFAULT_AGGREGATE_ROOT_MARKER,
    RepositoryConfig,
    entities::repository::{DEFAULT_BASE_INTERFACE, DEFAULT_IDENTITY_TYPE, DEFAULT_PACKAGE_SUFFIX},
};

use crate::error::{CliError, CliResult};

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "stratum.toml";

const ENV_PREFIX: &str = "STRATUM";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    /// Project coordinates; unset values fall back to `pom.xml`.
    pub project: ProjectConfig,
    pub architecture: ArchitectureConfig,
    pub repository: RepositorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human` or `plain`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub base_package: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureConfig {
    /// Template description locator used when `--template` is absent.
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySettings {
    pub multi_module: bool,
    pub domain_module_suffix: String,
    pub adapter_module_suffix: String,
    pub package_suffix: String,
    /// Comma-separated aggregate names to skip.
    pub ignore: String,
    pub base_interface: String,
    pub identity_type: String,
    /// Initial body of new repositories; `None` uses the built-in adapter block.
    pub custom_code: Option<String>,
    pub aggregate_root_marker: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            multi_module: false,
            domain_module_suffix: DEFAULT_DOMAIN_SUFFIX.into(),
            adapter_module_suffix: DEFAULT_ADAPTER_SUFFIX.into(),
            package_suffix: DEFAULT_PACKAGE_SUFFIX.into(),
            ignore: String::new(),
            base_interface: DEFAULT_BASE_INTERFACE.into(),
            identity_type: DEFAULT_IDENTITY_TYPE.into(),
            custom_code: None,
            aggregate_root_marker: DEFAULT_AGGREGATE_ROOT_MARKER.into(),
        }
    }
}

impl RepositorySettings {
    /// Core configuration with these settings applied.
    pub fn to_repository_config(&self) -> RepositoryConfig {
        let mut config = RepositoryConfig::default()
            .with_base_interface(self.base_interface.as_str())
            .with_identity_type(self.identity_type.as_str())
            .with_package_suffix(self.package_suffix.as_str())
            .with_ignored(self.ignore.split(','));
        if let Some(code) = &self.custom_code {
            config = config.with_custom_code(code.as_str());
        }
        config
    }
}

impl AppConfig {
    /// Load configuration from every layer below the CLI flags.
    ///
    /// `explicit` is the path the user passed via `--config`; it must exist.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let mut builder = Config::builder()
            .add_source(
                File::from(Self::config_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                File::from(PathBuf::from(LOCAL_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            );

        if let Some(path) = explicit {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .map_err(config_error)?;

        let app: Self = config.try_deserialize().map_err(config_error)?;
        debug!(?app, "Configuration loaded");
        Ok(app)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `stratum.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stratum", "stratum")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file with the highest priority that is actually in effect.
    pub fn active_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let user = Self::config_path();
        user.is_file().then_some(user)
    }

    /// Render as TOML, the format every config file uses.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise configuration: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_core_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.repository.identity_type, "Long");
        assert_eq!(cfg.repository.domain_module_suffix, "-domain");
        assert_eq!(cfg.repository.aggregate_root_marker, "AggregateRoot");
        assert!(cfg.project.base_package.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[project]\nbase_package = \"com.acme.shop\"\n\n\
             [repository]\nidentity_type = \"UUID\"\nignore = \"AuditLog, Outbox\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.project.base_package.as_deref(), Some("com.acme.shop"));
        assert_eq!(cfg.repository.identity_type, "UUID");
        assert_eq!(
            cfg.repository.package_suffix,
            ".adapter.domain.repositories"
        );

        let repo = cfg.repository.to_repository_config();
        assert!(repo.is_ignored("outbox"));
        assert!(repo.is_ignored("AUDITLOG"));
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here/stratum.toml")));
        assert!(matches!(result, Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let cfg = AppConfig::default();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(cfg.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            loaded.repository.base_interface,
            cfg.repository.base_interface
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
