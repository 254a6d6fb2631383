//! Implementation of the `stratum repository` command.
//!
//! Responsibility: work out the project layout and regeneration settings,
//! call `RepositorySourceSynthesizer::regenerate_all`, and print one line per
//! aggregate root. A missing base package is rejected by the synthesizer
//! before any file is touched.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use stratum_adapters::{LocalFilesystem, ProjectLayout};
use stratum_core::application::{
    RegenerationReport, RegenerationRequest, RegenerationStatus, RepositorySourceSynthesizer,
};
use stratum_core::domain::{AggregateRootDetector, RepositoryConfig};
use stratum_core::error::StratumError;

use crate::{
    cli::RepositoryArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stratum repository` command.
#[instrument(skip_all)]
pub fn execute(args: RepositoryArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project_dir = args.project_dir.clone().unwrap_or_else(|| ".".into());
    let settings = &config.repository;

    let layout = if args.multi_module || settings.multi_module {
        ProjectLayout::multi_module(
            &project_dir,
            &settings.domain_module_suffix,
            &settings.adapter_module_suffix,
        )?
    } else {
        ProjectLayout::single_module(project_dir.clone())
    };

    let base_package = args
        .base_package
        .clone()
        .or(config.project.base_package.clone())
        .or_else(|| layout.infer_base_package())
        .unwrap_or_default();

    let detector = detector(&args, &config)?;

    let repository_config = repository_config(&args, &config);
    debug!(
        ?layout,
        base_package = %base_package,
        ?repository_config,
        "Regeneration inputs resolved"
    );

    let fs = LocalFilesystem::new();
    let swept = fs.sweep_temp_files(&layout.adapter_dir)?;
    if swept > 0 {
        info!(swept, "Removed temp files left by an interrupted run");
    }

    let synthesizer = RepositorySourceSynthesizer::new(Arc::new(fs), repository_config, detector);
    let request = RegenerationRequest {
        domain_root: layout.domain_dir.clone(),
        search_root: layout.adapter_dir.clone(),
        base_package,
    };

    output.header(&format!(
        "Regenerating repositories in {}",
        layout.adapter_dir.display()
    ))?;
    let report = synthesizer.regenerate_all(&request)?;
    print_report(&report, &output)?;
    info!(
        outcomes = report.outcomes.len(),
        failed = report.failed(),
        "Regeneration finished"
    );

    if report.has_failures() {
        return Err(CliError::BatchFailed {
            failed: report.failed(),
            total: report.outcomes.len(),
        });
    }
    Ok(())
}

/// A bad `--marker` is an input error; a bad configured marker stays a
/// configuration error.
fn detector(args: &RepositoryArgs, config: &AppConfig) -> CliResult<AggregateRootDetector> {
    match &args.marker {
        Some(marker) => AggregateRootDetector::new(marker).map_err(|e| CliError::InvalidInput {
            message: format!("--marker '{}' is not an annotation name", marker),
            source: Some(Box::new(e)),
        }),
        None => AggregateRootDetector::new(&config.repository.aggregate_root_marker)
            .map_err(|e| StratumError::from(e).into()),
    }
}

/// Config file settings with command-line overrides applied.
fn repository_config(args: &RepositoryArgs, config: &AppConfig) -> RepositoryConfig {
    let mut repo = config.repository.to_repository_config();
    if let Some(base_interface) = &args.base_interface {
        repo = repo.with_base_interface(base_interface.as_str());
    }
    if let Some(identity_type) = &args.identity_type {
        repo = repo.with_identity_type(identity_type.as_str());
    }
    if let Some(custom_code) = &args.custom_code {
        repo = repo.with_custom_code(custom_code.as_str());
    }
    if !args.ignore.is_empty() {
        repo = repo.with_ignored(args.ignore.iter().map(String::as_str));
    }
    repo
}

fn print_report(report: &RegenerationReport, output: &OutputManager) -> CliResult<()> {
    if report.outcomes.is_empty() {
        output.info("No aggregate roots found")?;
        return Ok(());
    }

    for outcome in &report.outcomes {
        let entity = outcome.entity_path.display();
        match &outcome.status {
            RegenerationStatus::Failed(_) => {
                output.error(&format!("{}: {}", entity, outcome.status))?
            }
            RegenerationStatus::Ignored => output.info(&format!("{}: ignored", entity))?,
            status => output.print(&format!("{}: {}", entity, status))?,
        }
    }

    let written = report.outcomes.len() - report.failed();
    output.success(&format!(
        "{} aggregate roots processed, {} failed",
        written,
        report.failed()
    ))?;
    Ok(())
}
