//! Project layout discovery.
//!
//! A project is either a single module (domain sources and repositories in
//! one tree) or a multi-module build with sibling `*-domain` and `*-adapter`
//! modules:
//!
//! ```text
//! shop/
//! ├── pom.xml
//! ├── shop-domain/src/main/java/com/acme/shop/domain/Order.java
//! └── shop-adapter/src/main/java/com/acme/shop/adapter/...
//! ```

use std::path::{Path, PathBuf};

use stratum_core::{
    application::ApplicationError, domain::source_layout::SOURCE_ROOT, error::StratumResult,
};
use tracing::{debug, info, instrument};

pub const DEFAULT_DOMAIN_SUFFIX: &str = "-domain";
pub const DEFAULT_ADAPTER_SUFFIX: &str = "-adapter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub project_dir: PathBuf,
    /// Module scanned for aggregate roots.
    pub domain_dir: PathBuf,
    /// Module receiving repository interfaces.
    pub adapter_dir: PathBuf,
    pub multi_module: bool,
}

impl ProjectLayout {
    pub fn single_module(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            domain_dir: project_dir.clone(),
            adapter_dir: project_dir.clone(),
            project_dir,
            multi_module: false,
        }
    }

    /// Locate the domain and adapter modules below `project_dir`.
    ///
    /// When `project_dir` is itself one of the modules, its parent is used as
    /// the project directory.
    #[instrument(skip_all, fields(project_dir = %project_dir.display()))]
    pub fn multi_module(
        project_dir: &Path,
        domain_suffix: &str,
        adapter_suffix: &str,
    ) -> StratumResult<Self> {
        let project_dir = if ends_with_any(project_dir, &[domain_suffix, adapter_suffix]) {
            project_dir.parent().unwrap_or(project_dir).to_path_buf()
        } else {
            project_dir.to_path_buf()
        };

        let modules = module_dirs(&project_dir)?;
        let find = |suffix: &str| {
            modules
                .iter()
                .find(|m| ends_with_any(m, &[suffix]))
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::fs(
                        &project_dir,
                        format!("no module directory ending in '{}'", suffix),
                    )
                })
        };

        let domain_dir = find(domain_suffix)?;
        let adapter_dir = find(adapter_suffix)?;
        info!(
            domain = %domain_dir.display(),
            adapter = %adapter_dir.display(),
            "Multi-module project"
        );

        Ok(Self {
            project_dir,
            domain_dir,
            adapter_dir,
            multi_module: true,
        })
    }

    /// Base package guessed from the domain module's source tree.
    pub fn infer_base_package(&self) -> Option<String> {
        infer_base_package(&self.domain_dir)
    }
}

/// Follow the source root down while each level is a lone directory with no
/// sources; the packages passed on the way form the base package.
pub fn infer_base_package(module_dir: &Path) -> Option<String> {
    let mut dir = module_dir.join(SOURCE_ROOT.iter().collect::<PathBuf>());
    let mut segments: Vec<String> = Vec::new();

    loop {
        let entries: Vec<PathBuf> = std::fs::read_dir(&dir)
            .ok()?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .collect();
        let has_files = entries.iter().any(|p| p.is_file());
        let subdirs: Vec<&PathBuf> = entries.iter().filter(|p| p.is_dir()).collect();

        match subdirs.as_slice() {
            [only] if !has_files => {
                segments.push(only.file_name()?.to_str()?.to_string());
                dir = only.to_path_buf();
            }
            _ => break,
        }
    }

    debug!(segments = ?segments, "Inferred base package");
    (!segments.is_empty()).then(|| segments.join("."))
}

fn module_dirs(project_dir: &Path) -> StratumResult<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(project_dir)
        .map_err(|e| ApplicationError::fs(project_dir, e))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn ends_with_any(path: &Path, suffixes: &[&str]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| suffixes.iter().any(|s| !s.is_empty() && n.ends_with(s)))
}
