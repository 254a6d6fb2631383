//! Template tree rendering.
//!
//! Walks a validated `TemplateNode` tree depth-first in declared order and
//! materializes it below a parent directory. A failing node never aborts
//! the walk: it is recorded in the `RenderReport` and its siblings carry on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::application::ports::{Filesystem, TemplateSourceFetcher};
use crate::domain::{
    ConflictPolicy, ContentSource, DomainError, NodeKind, TemplateNode, TokenContext,
};
use crate::error::StratumResult;

/// What happened to one rendered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderAction {
    DirectoryCreated,
    FileCreated,
    FileOverwritten,
    /// Existing file kept under the `skip` policy.
    Skipped,
    /// Existing file kept under the `warn` policy.
    ConflictWarning,
    Failed(String),
}

impl fmt::Display for RenderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryCreated => write!(f, "created dir"),
            Self::FileCreated => write!(f, "created"),
            Self::FileOverwritten => write!(f, "overwritten"),
            Self::Skipped => write!(f, "skipped"),
            Self::ConflictWarning => write!(f, "exists"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutcome {
    pub path: PathBuf,
    pub action: RenderAction,
}

/// Ordered outcomes of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub outcomes: Vec<NodeOutcome>,
}

impl RenderReport {
    fn record(&mut self, path: PathBuf, action: RenderAction) {
        self.outcomes.push(NodeOutcome { path, action });
    }

    pub fn count(&self, predicate: impl Fn(&RenderAction) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| predicate(&o.action))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, RenderAction::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn action_for(&self, path: &Path) -> Option<&RenderAction> {
        self.outcomes
            .iter()
            .find(|o| o.path == path)
            .map(|o| &o.action)
    }
}

/// Materializes template trees through the filesystem port.
pub struct TemplateTreeRenderer {
    fs: Arc<dyn Filesystem>,
    fetcher: Arc<dyn TemplateSourceFetcher>,
}

impl TemplateTreeRenderer {
    pub fn new(fs: Arc<dyn Filesystem>, fetcher: Arc<dyn TemplateSourceFetcher>) -> Self {
        Self { fs, fetcher }
    }

    /// Render `root` below `parent`.
    ///
    /// # Errors
    ///
    /// Only an invalid tree is fatal, and it is rejected before anything is
    /// written. Per-node failures are reported in the returned report.
    #[instrument(skip_all, fields(parent = %parent.display(), nodes = root.node_count()))]
    pub fn render(
        &self,
        root: &TemplateNode,
        context: &TokenContext,
        parent: &Path,
    ) -> StratumResult<RenderReport> {
        root.validate().map_err(|e| DomainError::TemplateParse {
            reason: e.to_string(),
        })?;

        let mut report = RenderReport::default();
        self.render_node(root, context, parent, &mut report);

        info!(
            outcomes = report.outcomes.len(),
            failed = report.count(|a| matches!(a, RenderAction::Failed(_))),
            "Template rendered"
        );
        Ok(report)
    }

    fn render_node(
        &self,
        node: &TemplateNode,
        context: &TokenContext,
        parent: &Path,
        report: &mut RenderReport,
    ) {
        match node.kind {
            NodeKind::Root => {
                for child in &node.children {
                    self.render_node(child, context, parent, report);
                }
            }
            NodeKind::Dir => {
                let path = parent.join(context.expand_path(node.name()));
                if !self.render_dir(&path, report) {
                    return;
                }
                for child in &node.children {
                    self.render_node(child, context, &path, report);
                }
            }
            NodeKind::File => {
                let path = parent.join(context.expand_path(node.name()));
                let action = self.render_file(node, context, &path);
                report.record(path, action);
            }
        }
    }

    /// Returns `false` when the directory could not be created.
    fn render_dir(&self, path: &Path, report: &mut RenderReport) -> bool {
        if self.fs.exists(path) {
            debug!(path = %path.display(), "Directory exists");
            return true;
        }
        match self.fs.create_dir_all(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Created directory");
                report.record(path.to_path_buf(), RenderAction::DirectoryCreated);
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to create directory");
                report.record(path.to_path_buf(), RenderAction::Failed(e.to_string()));
                false
            }
        }
    }

    fn render_file(
        &self,
        node: &TemplateNode,
        context: &TokenContext,
        path: &Path,
    ) -> RenderAction {
        let raw = match node.source {
            ContentSource::Raw => node.data().to_string(),
            ContentSource::Url => match self.fetcher.fetch(node.data()) {
                Ok(content) => content,
                Err(e) => {
                    error!(
                        path = %path.display(),
                        locator = node.data(),
                        error = %e,
                        "Failed to fetch template source"
                    );
                    return RenderAction::Failed(e.to_string());
                }
            },
        };
        let content = context.expand_content(&raw);

        let existed = self.fs.exists(path);
        if existed {
            match node.conflict {
                ConflictPolicy::Skip => {
                    info!(path = %path.display(), "File exists, skipped");
                    return RenderAction::Skipped;
                }
                ConflictPolicy::Warn => {
                    warn!(path = %path.display(), "File already exists");
                    return RenderAction::ConflictWarning;
                }
                ConflictPolicy::Overwrite => {
                    info!(path = %path.display(), "Overwriting file");
                    if let Err(e) = self.fs.remove_file(path) {
                        error!(path = %path.display(), error = %e, "Failed to remove file");
                        return RenderAction::Failed(e.to_string());
                    }
                }
            }
        }

        let written = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => self
                .fs
                .create_dir_all(dir)
                .and_then(|()| self.fs.write_file(path, &content)),
            _ => self.fs.write_file(path, &content),
        };

        match written {
            Ok(()) if existed => RenderAction::FileOverwritten,
            Ok(()) => {
                debug!(path = %path.display(), "Created file");
                RenderAction::FileCreated
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to write file");
                RenderAction::Failed(e.to_string())
            }
        }
    }
}
