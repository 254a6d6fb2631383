//! Resolves locators to text: local paths, `file://` URLs and http(s) URLs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use stratum_core::{
    application::{ApplicationError, ports::TemplateSourceFetcher},
    error::StratumResult,
};
use tracing::{debug, instrument};

const FILE_SCHEME: &str = "file://";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// `true` for `http://` and `https://` locators.
pub fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Production fetcher.
///
/// Relative paths are resolved against `base_dir`. Use
/// [`LocatorFetcher::for_description`] to get a fetcher for the `url` nodes
/// of a description, so their paths are relative to the description file.
#[derive(Debug, Clone)]
pub struct LocatorFetcher {
    base_dir: PathBuf,
}

impl LocatorFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Fetcher rebased on the directory holding the description at
    /// `locator`. Remote descriptions keep the current base directory.
    pub fn for_description(&self, locator: &str) -> Self {
        if is_remote(locator) {
            return self.clone();
        }
        match self.resolve_path(locator).parent() {
            Some(dir) => Self::new(dir),
            None => self.clone(),
        }
    }

    /// Local path a non-remote locator points at.
    pub fn resolve_path(&self, locator: &str) -> PathBuf {
        let raw = Path::new(locator.strip_prefix(FILE_SCHEME).unwrap_or(locator));
        if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.base_dir.join(raw)
        }
    }

    fn fetch_remote(&self, locator: &str) -> StratumResult<String> {
        let response = ureq::get(locator)
            .timeout(HTTP_TIMEOUT)
            .call()
            .map_err(|e| fetch_error(locator, e))?;
        response.into_string().map_err(|e| fetch_error(locator, e))
    }
}

impl Default for LocatorFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TemplateSourceFetcher for LocatorFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, locator: &str) -> StratumResult<String> {
        if is_remote(locator) {
            debug!("Fetching over HTTP");
            return self.fetch_remote(locator);
        }

        let path = self.resolve_path(locator);
        debug!(path = %path.display(), "Reading local source");
        std::fs::read_to_string(&path).map_err(|e| fetch_error(locator, e))
    }
}

fn fetch_error(locator: &str, reason: impl ToString) -> stratum_core::error::StratumError {
    ApplicationError::TemplateSourceFetch {
        locator: locator.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
