//! Repository Source Synthesizer - regenerates companion repository interfaces.
//!
//! For every aggregate root found in the domain sources, one
//! `{Entity}Repository` interface is created or regenerated:
//!
//! 1. Resolve the target (default location, or an existing companion anywhere
//!    under the search root)
//! 2. Extract the developer-owned sections and retire the old file
//! 3. Emit fresh source around the preserved body
//! 4. Write, then discard the retired copy (or roll back on failure)
//!
//! A batch never stops on a single file: each one ends up in the
//! `RegenerationReport` with its own status.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::Filesystem;
use crate::application::services::extractor::CustomCodeExtractor;
use crate::application::services::retirement::{RETIRED_SUFFIX, Retirement, live_path};
use crate::application::services::source_scan::{find_by_simple_class_name, load_files};
use crate::domain::source_layout::{
    is_source_file, parse_package_declaration, resolve_class_name, resolve_package,
    resolve_simple_class_name, resolve_source_file,
};
use crate::domain::{
    AggregateRootDetector, REPOSITORY_SUFFIX, RepositoryConfig, RepositoryTarget, filter_imports,
    render_repository_source,
};
use crate::error::StratumResult;

/// Result of synthesizing one companion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub target: RepositoryTarget,
    /// `true` when no previous file existed.
    pub created: bool,
    pub preserved_lines: usize,
}

/// Inputs of one batch regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationRequest {
    /// Module whose sources are scanned for aggregate roots.
    pub domain_root: PathBuf,
    /// Module where companions are searched for and written.
    pub search_root: PathBuf,
    pub base_package: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenerationStatus {
    Created(PathBuf),
    Regenerated {
        path: PathBuf,
        preserved_lines: usize,
    },
    Ignored,
    Failed(String),
}

impl fmt::Display for RegenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "created {}", path.display()),
            Self::Regenerated {
                path,
                preserved_lines,
            } => write!(
                f,
                "regenerated {} ({} custom lines kept)",
                path.display(),
                preserved_lines
            ),
            Self::Ignored => write!(f, "ignored"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub entity_path: PathBuf,
    pub status: RegenerationStatus,
}

/// Outcomes of a batch, one per detected aggregate root or unreadable file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegenerationReport {
    pub outcomes: Vec<FileOutcome>,
}

impl RegenerationReport {
    fn record(&mut self, entity_path: &Path, status: RegenerationStatus) {
        self.outcomes.push(FileOutcome {
            entity_path: entity_path.to_path_buf(),
            status,
        });
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RegenerationStatus::Failed(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn status_for(&self, entity_path: &Path) -> Option<&RegenerationStatus> {
        self.outcomes
            .iter()
            .find(|o| o.entity_path == entity_path)
            .map(|o| &o.status)
    }
}

pub struct RepositorySourceSynthesizer {
    fs: Arc<dyn Filesystem>,
    extractor: CustomCodeExtractor,
    retirement: Retirement,
    config: RepositoryConfig,
    detector: AggregateRootDetector,
}

impl RepositorySourceSynthesizer {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        config: RepositoryConfig,
        detector: AggregateRootDetector,
    ) -> Self {
        Self {
            extractor: CustomCodeExtractor::new(fs.clone()),
            retirement: Retirement::new(fs.clone()),
            fs,
            config,
            detector,
        }
    }

    /// Create or regenerate the companion of one entity source file.
    ///
    /// An existing `{Simple}Repository` source under `search_root` wins over
    /// the default location, and keeps its package.
    pub fn synthesize(
        &self,
        entity_path: &Path,
        base_package: &str,
        search_root: &Path,
    ) -> StratumResult<SynthesisOutcome> {
        let companions = self.scan_companions(search_root)?;
        self.synthesize_among(&companions, entity_path, base_package, search_root)
    }

    /// Scan `request.domain_root` and regenerate every aggregate root's companion.
    ///
    /// The search root is listed once, when the first aggregate root is found.
    ///
    /// # Errors
    ///
    /// Fails before touching any file when the configuration or base package
    /// is blank, or when the domain root cannot be listed. Everything after
    /// that is reported per file.
    #[instrument(skip_all, fields(domain_root = %request.domain_root.display()))]
    pub fn regenerate_all(
        &self,
        request: &RegenerationRequest,
    ) -> StratumResult<RegenerationReport> {
        if let Some(name) = self.config.missing_field() {
            return Err(ApplicationError::ConfigurationMissing { name: name.into() }.into());
        }
        if request.base_package.trim().is_empty() {
            return Err(ApplicationError::ConfigurationMissing {
                name: "base_package".into(),
            }
            .into());
        }

        let files = load_files(self.fs.as_ref(), &request.domain_root)?;
        info!(
            files = files.len(),
            marker = self.detector.marker(),
            "Scanning domain sources"
        );

        let mut companions: Option<Vec<PathBuf>> = None;
        let mut report = RegenerationReport::default();
        for file in &files {
            let content = match self.fs.read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Unreadable source file");
                    report.record(file, RegenerationStatus::Failed(e.to_string()));
                    continue;
                }
            };

            if !self.detector.is_aggregate_root(&content) {
                continue;
            }

            let simple_name = match resolve_simple_class_name(file) {
                Ok(name) => name,
                Err(e) => {
                    report.record(file, RegenerationStatus::Failed(e.to_string()));
                    continue;
                }
            };
            info!(entity = %simple_name, "Found aggregate root");

            if self.config.is_ignored(&simple_name) {
                info!(entity = %simple_name, "Ignored by configuration");
                report.record(file, RegenerationStatus::Ignored);
                continue;
            }

            if companions.is_none() {
                match self.scan_companions(&request.search_root) {
                    Ok(found) => companions = Some(found),
                    Err(e) => {
                        error!(path = %file.display(), error = %e, "Cannot scan search root");
                        report.record(file, RegenerationStatus::Failed(e.to_string()));
                        continue;
                    }
                }
            }
            let known = companions.as_deref().unwrap_or_default();

            let status = match self.synthesize_among(
                known,
                file,
                &request.base_package,
                &request.search_root,
            ) {
                Ok(outcome) if outcome.created => {
                    RegenerationStatus::Created(outcome.target.file_path)
                }
                Ok(outcome) => RegenerationStatus::Regenerated {
                    path: outcome.target.file_path,
                    preserved_lines: outcome.preserved_lines,
                },
                Err(e) => {
                    error!(path = %file.display(), error = %e, "Regeneration failed");
                    RegenerationStatus::Failed(e.to_string())
                }
            };
            report.record(file, status);
        }

        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    #[instrument(skip_all, fields(entity = %entity_path.display()))]
    fn synthesize_among(
        &self,
        companions: &[PathBuf],
        entity_path: &Path,
        base_package: &str,
        search_root: &Path,
    ) -> StratumResult<SynthesisOutcome> {
        let target = self.target_among(companions, entity_path, base_package, search_root)?;
        let extraction = self.extractor.extract(&target.file_path)?;

        let mut sections = extraction.sections;
        sections.import_lines = filter_imports(&sections.import_lines, &target.entity_simple_name);
        let preserved_lines = sections.custom_lines.len();

        let source = render_repository_source(&target, &sections, &self.config);

        if let Err(e) = self.write(&target.file_path, &source) {
            error!(path = %target.file_path.display(), error = %e, "Failed to write companion");
            if let Some(retired) = &extraction.retired {
                self.retirement.rollback(&target.file_path, retired)?;
            }
            return Err(ApplicationError::FileWrite {
                path: target.file_path.clone(),
                reason: e.to_string(),
            }
            .into());
        }

        if let Some(retired) = &extraction.retired {
            self.retirement.discard(retired)?;
        }

        debug!(path = %target.file_path.display(), preserved_lines, "Companion written");
        Ok(SynthesisOutcome {
            created: extraction.retired.is_none(),
            preserved_lines,
            target,
        })
    }

    /// Where the companion lives; `companions` is the source listing of
    /// `search_root`.
    fn target_among(
        &self,
        companions: &[PathBuf],
        entity_path: &Path,
        base_package: &str,
        search_root: &Path,
    ) -> StratumResult<RepositoryTarget> {
        let mut target = RepositoryTarget {
            entity_class_name: resolve_class_name(entity_path)?,
            entity_simple_name: resolve_simple_class_name(entity_path)?,
            package_name: format!("{}{}", base_package, self.config.package_suffix),
            file_path: PathBuf::new(),
            relocated: false,
        };
        let repository_name = target.repository_simple_name();
        target.file_path = resolve_source_file(search_root, &target.package_name, &repository_name);

        if let Some(existing) = find_by_simple_class_name(companions, &repository_name) {
            if existing != target.file_path.as_path() {
                info!(path = %existing.display(), "Found relocated companion");
                if let Some(package) = self.existing_package(existing)? {
                    target.package_name = package;
                }
                target.file_path = existing.to_path_buf();
                target.relocated = true;
            }
        }

        Ok(target)
    }

    /// Restore retired companions left by an interrupted run, then list the
    /// sources under `search_root`.
    fn scan_companions(&self, search_root: &Path) -> StratumResult<Vec<PathBuf>> {
        let suffix = RETIRED_SUFFIX.trim_start_matches('.');
        for retired in self.fs.list_files(search_root, suffix)? {
            let Some(live) = live_path(&retired) else {
                continue;
            };
            let is_companion = is_source_file(&live)
                && resolve_simple_class_name(&live).is_ok_and(|s| s.ends_with(REPOSITORY_SUFFIX));
            if is_companion {
                self.retirement.recover(&live)?;
            }
        }
        load_files(self.fs.as_ref(), search_root)
    }

    fn write(&self, path: &Path, source: &str) -> StratumResult<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.fs.create_dir_all(dir)?;
        }
        self.fs.write_file(path, source)
    }

    /// Package of an existing companion: path first, then its `package` line.
    fn existing_package(&self, path: &Path) -> StratumResult<Option<String>> {
        if let Ok(package) = resolve_package(path) {
            if !package.is_empty() {
                return Ok(Some(package));
            }
        }
        let content = self.fs.read_to_string(path)?;
        Ok(parse_package_declaration(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DEFAULT_AGGREGATE_ROOT_MARKER;
    use crate::error::StratumError;

    fn detector() -> AggregateRootDetector {
        AggregateRootDetector::new(DEFAULT_AGGREGATE_ROOT_MARKER).unwrap()
    }

    fn request(base_package: &str) -> RegenerationRequest {
        RegenerationRequest {
            domain_root: PathBuf::from("shop-domain"),
            search_root: PathBuf::from("shop-adapter"),
            base_package: base_package.into(),
        }
    }

    fn untouched_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_list_files().never();
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();
        fs.expect_rename().never();
        fs
    }

    #[test]
    fn blank_base_package_fails_before_io() {
        let synth = RepositorySourceSynthesizer::new(
            Arc::new(untouched_fs()),
            RepositoryConfig::default(),
            detector(),
        );

        let err = synth.regenerate_all(&request("  ")).unwrap_err();
        assert_eq!(
            err,
            StratumError::Application(ApplicationError::ConfigurationMissing {
                name: "base_package".into()
            })
        );
    }

    #[test]
    fn blank_identity_type_fails_before_io() {
        let synth = RepositorySourceSynthesizer::new(
            Arc::new(untouched_fs()),
            RepositoryConfig::default().with_identity_type(""),
            detector(),
        );

        assert!(matches!(
            synth.regenerate_all(&request("com.acme")),
            Err(StratumError::Application(
                ApplicationError::ConfigurationMissing { ref name }
            )) if name == "identity_type"
        ));
    }

    #[test]
    fn non_aggregates_are_silent_and_ignored_entities_are_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_list_files().returning(|_, _| {
            Ok(vec![
                PathBuf::from("shop-domain/src/main/java/com/acme/domain/Money.java"),
                PathBuf::from("shop-domain/src/main/java/com/acme/domain/Order.java"),
            ])
        });
        fs.expect_read_to_string().returning(|p| {
            if p.ends_with("Order.java") {
                Ok("package com.acme.domain;\n@AggregateRoot\npublic class Order {}\n".into())
            } else {
                Ok("package com.acme.domain;\npublic record Money() {}\n".into())
            }
        });
        fs.expect_write_file().never();

        let synth = RepositorySourceSynthesizer::new(
            Arc::new(fs),
            RepositoryConfig::default().with_ignored(["order"]),
            detector(),
        );
        let report = synth.regenerate_all(&request("com.acme")).unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].status, RegenerationStatus::Ignored);
        assert!(!report.has_failures());
    }

    #[test]
    fn search_root_is_listed_once_per_batch() {
        const AGGREGATE: &str = "package com.acme.domain;\n@AggregateRoot\npublic class X {}\n";
        let mut fs = MockFilesystem::new();
        fs.expect_list_files()
            .withf(|root, _| root == Path::new("shop-domain"))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    PathBuf::from("shop-domain/src/main/java/com/acme/domain/Invoice.java"),
                    PathBuf::from("shop-domain/src/main/java/com/acme/domain/Order.java"),
                ])
            });
        fs.expect_list_files()
            .withf(|root, ext| root == Path::new("shop-adapter") && ext == "retired")
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        fs.expect_list_files()
            .withf(|root, ext| root == Path::new("shop-adapter") && ext == "java")
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        fs.expect_read_to_string()
            .returning(|_| Ok(AGGREGATE.into()));
        fs.expect_exists().returning(|_| false);
        fs.expect_is_file().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));

        let synth =
            RepositorySourceSynthesizer::new(Arc::new(fs), RepositoryConfig::default(), detector());
        let report = synth.regenerate_all(&request("com.acme")).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        for outcome in &report.outcomes {
            assert!(matches!(outcome.status, RegenerationStatus::Created(_)));
        }
    }

    #[test]
    fn synthesize_writes_fresh_companion_at_default_location() {
        const TARGET: &str =
            "shop-adapter/src/main/java/com/acme/adapter/domain/repositories/OrderRepository.java";
        let mut fs = MockFilesystem::new();
        fs.expect_list_files().returning(|_, _| Ok(Vec::new()));
        fs.expect_exists().returning(|_| false);
        fs.expect_is_file().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new(TARGET)
                    && content.starts_with("package com.acme.adapter.domain.repositories;\n")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let synth =
            RepositorySourceSynthesizer::new(Arc::new(fs), RepositoryConfig::default(), detector());
        let outcome = synth
            .synthesize(
                Path::new("shop-domain/src/main/java/com/acme/domain/Order.java"),
                "com.acme",
                Path::new("shop-adapter"),
            )
            .unwrap();

        assert!(outcome.created);
        assert!(!outcome.target.relocated);
        assert_eq!(outcome.target.entity_class_name, "com.acme.domain.Order");
    }

    #[test]
    fn unreadable_file_is_a_failed_outcome() {
        const BROKEN: &str = "shop-domain/src/main/java/com/acme/domain/Broken.java";
        let mut fs = MockFilesystem::new();
        fs.expect_list_files()
            .returning(|_, _| Ok(vec![PathBuf::from(BROKEN)]));
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FileRead {
                path: p.to_path_buf(),
                reason: "stream did not contain valid UTF-8".into(),
            }
            .into())
        });

        let synth =
            RepositorySourceSynthesizer::new(Arc::new(fs), RepositoryConfig::default(), detector());
        let report = synth.regenerate_all(&request("com.acme")).unwrap();

        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.status_for(Path::new(BROKEN)),
            Some(RegenerationStatus::Failed(_))
        ));
    }
}
