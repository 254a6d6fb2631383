//! Source tree lookups through the filesystem port.

use std::path::{Path, PathBuf};

use crate::application::ports::Filesystem;
use crate::domain::source_layout::{SOURCE_EXTENSION, resolve_simple_class_name};
use crate::error::StratumResult;

/// Every source file under `root`, sorted.
pub fn load_files(fs: &dyn Filesystem, root: &Path) -> StratumResult<Vec<PathBuf>> {
    fs.list_files(root, SOURCE_EXTENSION)
}

/// First of `files` declaring `simple_name`, by file name.
pub fn find_by_simple_class_name<'a>(files: &'a [PathBuf], simple_name: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|p| resolve_simple_class_name(p).is_ok_and(|s| s == simple_name))
        .map(PathBuf::as_path)
}
