//! `stratum config`: inspect the effective configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Every key `config get` understands.
const KEYS: &[&str] = &[
    "output.no_color",
    "output.format",
    "project.base_package",
    "project.group_id",
    "project.artifact_id",
    "project.version",
    "architecture.template",
    "repository.multi_module",
    "repository.domain_module_suffix",
    "repository.adapter_module_suffix",
    "repository.package_suffix",
    "repository.ignore",
    "repository.base_interface",
    "repository.identity_type",
    "repository.custom_code",
    "repository.aggregate_root_marker",
];

pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    explicit: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value.unwrap_or_default())?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => match AppConfig::active_path(explicit) {
            Some(path) => output.print(&path.display().to_string())?,
            None => output.info(&format!(
                "No configuration file; defaults apply ({} would be read)",
                AppConfig::config_path().display()
            ))?,
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Value of a dotted key; `None` when the key is known but unset.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Option<String>> {
    if !KEYS.contains(&key) {
        return Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        });
    }

    let table: toml::Table =
        toml::from_str(&config.to_toml()?).map_err(|e| CliError::ConfigError {
            message: format!("Failed to read back configuration: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut segments = key.split('.');
    let section = segments.next().and_then(|s| table.get(s));
    let value = segments
        .next()
        .and_then(|field| section.and_then(|s| s.get(field)));

    Ok(value.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

// ── tests ─────────────────────────────────────────────────────────────────────
