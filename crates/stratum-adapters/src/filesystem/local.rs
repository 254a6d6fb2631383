//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use stratum_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StratumError, StratumResult},
};
use tracing::{trace, warn};
use walkdir::WalkDir;

const TEMP_SUFFIX: &str = ".stratum-tmp";

/// Production filesystem implementation using `std::fs`.
///
/// `write_file` goes through a sibling temp file and a rename, so a reader
/// never sees a half-written file.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Remove temp files left under `root` by a write that never reached its
    /// rename. Returns how many were removed.
    pub fn sweep_temp_files(&self, root: &Path) -> StratumResult<usize> {
        if !root.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                ApplicationError::fs(path, format!("directory walk error: {e}"))
            })?;
            let is_temp = entry.file_type().is_file()
                && entry.file_name().to_str().is_some_and(is_temp_name);
            if is_temp {
                warn!(path = %entry.path().display(), "Removing leftover temp file");
                self.remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        let tmp = temp_sibling(path);
        trace!(path = %path.display(), tmp = %tmp.display(), "Writing via temp file");

        if let Err(e) = std::fs::write(&tmp, content) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_error(path, e));
        }
        std::fs::rename(&tmp, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            write_error(path, e)
        })
    }

    fn read_to_string(&self, path: &Path) -> StratumResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn remove_file(&self, path: &Path) -> StratumResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> StratumResult<()> {
        std::fs::rename(from, to).map_err(|e| {
            map_io_error(from, e, &format!("rename to '{}'", to.display()))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_files(&self, root: &Path, extension: &str) -> StratumResult<Vec<PathBuf>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                ApplicationError::fs(path, format!("directory walk error: {e}"))
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
            {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}{}", name, TEMP_SUFFIX))
}

fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
}

fn write_error(path: &Path, e: io::Error) -> StratumError {
    ApplicationError::FileWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StratumError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_replaces_content_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("A.java");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "one").unwrap();
        fs.write_file(&path, "two").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "two");
        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("A.java")]);
    }

    #[test]
    fn write_into_missing_directory_is_a_write_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("A.java");

        let err = LocalFilesystem::new().write_file(&path, "x").unwrap_err();
        assert!(matches!(
            err,
            StratumError::Application(ApplicationError::FileWrite { .. })
        ));
    }

    #[test]
    fn list_files_is_recursive_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let root = temp.path();
        fs.create_dir_all(&root.join("b/c")).unwrap();
        fs.write_file(&root.join("b/c/Z.java"), "").unwrap();
        fs.write_file(&root.join("A.java"), "").unwrap();
        fs.write_file(&root.join("b/notes.txt"), "").unwrap();
        fs.write_file(&root.join("b/Y.java.retired"), "").unwrap();

        let java = fs.list_files(root, "java").unwrap();
        assert_eq!(java, vec![root.join("A.java"), root.join("b/c/Z.java")]);

        let retired = fs.list_files(root, "retired").unwrap();
        assert_eq!(retired, vec![root.join("b/Y.java.retired")]);
    }

    #[test]
    fn list_files_of_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = LocalFilesystem::new()
            .list_files(&temp.path().join("nope"), "java")
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn sweep_removes_only_leftover_temp_files() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let root = temp.path();
        fs.create_dir_all(&root.join("a/b")).unwrap();
        fs.write_file(&root.join("a/b/A.java"), "kept").unwrap();
        std::fs::write(root.join("a/b/.A.java.stratum-tmp"), "half").unwrap();
        std::fs::write(root.join("a/.B.java.stratum-tmp"), "half").unwrap();

        assert_eq!(fs.sweep_temp_files(root).unwrap(), 2);
        assert!(!root.join("a/b/.A.java.stratum-tmp").exists());
        assert!(!root.join("a/.B.java.stratum-tmp").exists());
        assert_eq!(fs.read_to_string(&root.join("a/b/A.java")).unwrap(), "kept");

        assert_eq!(fs.sweep_temp_files(root).unwrap(), 0);
        assert_eq!(fs.sweep_temp_files(&root.join("missing")).unwrap(), 0);
    }

    #[test]
    fn rename_replaces_destination() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs.write_file(&a, "new").unwrap();
        fs.write_file(&b, "old").unwrap();

        fs.rename(&a, &b).unwrap();

        assert!(!fs.exists(&a));
        assert_eq!(fs.read_to_string(&b).unwrap(), "new");
    }
}
