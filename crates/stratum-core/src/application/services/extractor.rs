//! File-level custom-code extraction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::Filesystem;
use crate::application::services::retirement::Retirement;
use crate::domain::ExtractedFileSections;
use crate::error::StratumResult;

/// Sections recovered from an existing file plus its retired location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub sections: ExtractedFileSections,
    /// Where the original was moved; `None` when there was no file.
    pub retired: Option<PathBuf>,
}

/// Reads a previously generated file and moves it out of the way.
///
/// After `extract` returns, the live path is free for a fresh write and the
/// caller owns the retired copy: it must either `discard` or `rollback` it.
pub struct CustomCodeExtractor {
    fs: Arc<dyn Filesystem>,
    retirement: Retirement,
}

impl CustomCodeExtractor {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            retirement: Retirement::new(fs.clone()),
            fs,
        }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn extract(&self, path: &Path) -> StratumResult<Extraction> {
        self.retirement.recover(path)?;

        if !self.fs.is_file(path) {
            debug!("No existing file, starting fresh");
            return Ok(Extraction {
                sections: ExtractedFileSections::empty(),
                retired: None,
            });
        }

        let content = self.fs.read_to_string(path)?;
        let sections = ExtractedFileSections::parse(&content);
        debug!(
            imports = sections.import_lines.len(),
            annotations = sections.annotation_lines.len(),
            custom = sections.custom_lines.len(),
            "Extracted sections"
        );

        let retired = self.retirement.retire(path)?;
        Ok(Extraction {
            sections,
            retired: Some(retired),
        })
    }
}
