//! Implementation of the `stratum arch` command.
//!
//! Resolves the template locator and project coordinates (flag, then config,
//! then `pom.xml`), loads the template description, and renders it into the
//! output directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use stratum_adapters::{LocalFilesystem, LocatorFetcher, PomMetadata, TemplateDescriptionLoader};
use stratum_core::application::{RenderAction, RenderReport, TemplateTreeRenderer};
use stratum_core::domain::TokenContext;

use crate::{
    cli::ArchArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stratum arch` command.
#[instrument(skip_all)]
pub fn execute(args: ArchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    let template = args
        .template
        .clone()
        .or(config.architecture.template.clone())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CliError::missing_setting("architecture.template", "--template"))?;

    let context = token_context(&args, &config, &project_dir)?;
    debug!(?context, template = %template, "Architecture inputs resolved");

    let fetcher = LocatorFetcher::new(".");
    let root = TemplateDescriptionLoader::new(Arc::new(fetcher.clone())).load(&template)?;

    let sources = fetcher.for_description(&template);
    debug!(base_dir = %sources.base_dir().display(), "Template sources resolved");

    output.header(&format!("Rendering '{}' into {}", template, project_dir.display()))?;
    let renderer = TemplateTreeRenderer::new(Arc::new(LocalFilesystem::new()), Arc::new(sources));
    let report = renderer.render(&root, &context, &project_dir)?;

    print_report(&report, &output)?;
    info!(outcomes = report.outcomes.len(), "Architecture rendered");

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: report.outcomes.len(),
        });
    }
    Ok(())
}

/// Flags win over config, config wins over `pom.xml`.
fn token_context(
    args: &ArchArgs,
    config: &AppConfig,
    project_dir: &Path,
) -> CliResult<TokenContext> {
    let base_package = args
        .base_package
        .clone()
        .or(config.project.base_package.clone())
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| CliError::missing_setting("project.base_package", "--base-package"))?;

    let pom = PomMetadata::read(project_dir)?.unwrap_or_default();
    let pick = |flag: &Option<String>, configured: &Option<String>, from_pom: Option<String>| {
        flag.clone().or(configured.clone()).or(from_pom)
    };

    let project = &config.project;
    let mut context = TokenContext::new(base_package);
    if let Some(group_id) = pick(&args.group_id, &project.group_id, pom.group_id) {
        context = context.with_group_id(group_id);
    }
    if let Some(artifact_id) = pick(&args.artifact_id, &project.artifact_id, pom.artifact_id) {
        context = context.with_artifact_id(artifact_id);
    }
    if let Some(version) = pick(&args.version, &project.version, pom.version) {
        context = context.with_version(version);
    }
    Ok(context)
}

fn print_report(report: &RenderReport, output: &OutputManager) -> CliResult<()> {
    for outcome in &report.outcomes {
        let action = outcome.action.to_string();
        let line = format!("{:>12}  {}", action, outcome.path.display());
        match &outcome.action {
            RenderAction::Failed(_) => output.error(&line)?,
            RenderAction::ConflictWarning => output.warning(&line)?,
            _ => output.print(&line)?,
        }
    }

    let created = report.count(|a| {
        matches!(
            a,
            RenderAction::DirectoryCreated
                | RenderAction::FileCreated
                | RenderAction::FileOverwritten
        )
    });
    let kept = report.count(|a| matches!(a, RenderAction::Skipped | RenderAction::ConflictWarning));
    output.success(&format!("{created} written, {kept} left unchanged"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ArchArgs;

    fn args() -> ArchArgs {
        ArchArgs {
            template: None,
            base_package: None,
            group_id: None,
            artifact_id: None,
            version: None,
            output: None,
        }
    }

    #[test]
    fn missing_base_package_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = token_context(&args(), &AppConfig::default(), dir.path());
        assert!(matches!(result, Err(ref e) if e.exit_code() == 4));
    }

    #[test]
    fn flags_override_config_and_pom() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pom.xml"),
            "<project><groupId>com.pom</groupId><artifactId>shop</artifactId>\
             <version>1.0</version></project>",
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.project.base_package = Some("com.config".into());
        config.project.group_id = Some("com.config".into());

        let mut cli = args();
        cli.version = Some("2.0".into());

        let ctx = token_context(&cli, &config, dir.path()).unwrap();
        assert_eq!(ctx.base_package(), "com.config");
        assert_eq!(ctx.artifact_id(), Some("shop"));
        assert_eq!(
            ctx.expand_content("${groupId}:${artifactId}:${version}"),
            "com.config:shop:2.0"
        );
    }
}
