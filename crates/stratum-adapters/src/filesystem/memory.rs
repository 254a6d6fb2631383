//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stratum_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StratumResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same state, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_parents(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Make every later write to `path` fail (testing helper).
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.as_ref().to_path_buf());
        }
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.failing_writes.clear();
        }
    }

    fn read_lock(&self, path: &Path) -> StratumResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::fs(path, "memory filesystem lock poisoned").into())
    }

    fn write_lock(
        &self,
        path: &Path,
    ) -> StratumResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::fs(path, "memory filesystem lock poisoned").into())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        let mut inner = self.write_lock(path)?;
        inner.add_parents(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        let mut inner = self.write_lock(path)?;

        if inner.failing_writes.contains(path) {
            return Err(ApplicationError::FileWrite {
                path: path.to_path_buf(),
                reason: "simulated write failure".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FileWrite {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StratumResult<String> {
        let inner = self.read_lock(path)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn remove_file(&self, path: &Path) -> StratumResult<()> {
        let mut inner = self.write_lock(path)?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::fs(path, "No such file").into())
    }

    fn rename(&self, from: &Path, to: &Path) -> StratumResult<()> {
        let mut inner = self.write_lock(from)?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| ApplicationError::fs(from, "No such file"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn list_files(&self, root: &Path, extension: &str) -> StratumResult<Vec<PathBuf>> {
        let inner = self.read_lock(root)?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(extension))
            .cloned()
            .collect())
    }
}
