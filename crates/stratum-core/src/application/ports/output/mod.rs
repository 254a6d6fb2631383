//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `stratum-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::StratumResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stratum_adapters::filesystem::LocalFilesystem` (production)
/// - `stratum_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Writes are whole-file; a live file is either absent or complete
/// - `rename` replaces the destination if it exists
/// - `list_files` is recursive and returns paths in sorted order
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StratumResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StratumResult<String>;

    fn remove_file(&self, path: &Path) -> StratumResult<()>;

    fn rename(&self, from: &Path, to: &Path) -> StratumResult<()>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Every file under `root` whose name ends in `.{extension}`.
    ///
    /// A missing `root` yields an empty list.
    fn list_files(&self, root: &Path, extension: &str) -> StratumResult<Vec<PathBuf>>;
}

/// Port for resolving a content locator (path or URL) to text.
///
/// Implemented by:
/// - `stratum_adapters::fetcher::LocatorFetcher` (paths, `file://`, http(s))
/// - `stratum_adapters::fetcher::MemoryFetcher` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSourceFetcher: Send + Sync {
    fn fetch(&self, locator: &str) -> StratumResult<String>;
}
