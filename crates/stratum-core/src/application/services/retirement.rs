//! Two-phase replacement of generated files.
//!
//! A companion file is never deleted before its replacement is on disk:
//!
//! ```text
//! phase 1   Foo.java ──rename──▶ Foo.java.retired
//! phase 2   write Foo.java
//!           ├─ ok   ─▶ remove Foo.java.retired          (discard)
//!           └─ err  ─▶ Foo.java.retired ──rename──▶ Foo.java (rollback)
//! ```
//!
//! If the process dies between the phases, `recover` finishes the job on the
//! next run: a retired copy with no live file is restored, a retired copy
//! next to a live file is the leftover of a completed write and is removed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::error::{StratumError, StratumResult};

pub const RETIRED_SUFFIX: &str = ".retired";

/// `Foo.java` → `Foo.java.retired`.
pub fn retired_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(RETIRED_SUFFIX);
    PathBuf::from(name)
}

/// `Foo.java.retired` → `Foo.java`; `None` if the suffix is absent.
pub fn live_path(retired: &Path) -> Option<PathBuf> {
    retired
        .to_str()
        .and_then(|s| s.strip_suffix(RETIRED_SUFFIX))
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// What `recover` found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// No retired copy.
    Nothing,
    /// Retired copy renamed back to the live path.
    Restored,
    /// Live file present; retired leftover removed.
    DiscardedStale,
}

#[derive(Clone)]
pub struct Retirement {
    fs: Arc<dyn Filesystem>,
}

impl Retirement {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Phase 1: move `path` aside and return the retired location.
    pub fn retire(&self, path: &Path) -> StratumResult<PathBuf> {
        let retired = retired_path(path);
        self.fs.rename(path, &retired)?;
        debug!(path = %path.display(), "Retired");
        Ok(retired)
    }

    /// Phase 2 succeeded: drop the retired copy.
    pub fn discard(&self, retired: &Path) -> StratumResult<()> {
        if self.fs.exists(retired) {
            self.fs.remove_file(retired)?;
        }
        Ok(())
    }

    /// Phase 2 failed: put the retired copy back at `path`.
    pub fn rollback(&self, path: &Path, retired: &Path) -> StratumResult<()> {
        warn!(path = %path.display(), "Write failed, restoring previous content");
        if self.fs.exists(path) {
            self.fs
                .remove_file(path)
                .map_err(|e| recovery_failed(path, e))?;
        }
        self.fs
            .rename(retired, path)
            .map_err(|e| recovery_failed(path, e))
    }

    /// Finish an interrupted replacement of `path`. Idempotent.
    pub fn recover(&self, path: &Path) -> StratumResult<RecoveryAction> {
        let retired = retired_path(path);
        if !self.fs.exists(&retired) {
            return Ok(RecoveryAction::Nothing);
        }

        if self.fs.exists(path) {
            self.fs
                .remove_file(&retired)
                .map_err(|e| recovery_failed(path, e))?;
            info!(path = %path.display(), "Removed stale retired copy");
            Ok(RecoveryAction::DiscardedStale)
        } else {
            self.fs
                .rename(&retired, path)
                .map_err(|e| recovery_failed(path, e))?;
            warn!(path = %path.display(), "Restored retired copy from an interrupted run");
            Ok(RecoveryAction::Restored)
        }
    }
}

fn recovery_failed(path: &Path, cause: StratumError) -> StratumError {
    ApplicationError::RecoveryFailed {
        path: path.to_path_buf(),
        reason: cause.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    #[test]
    fn retired_and_live_paths_round_trip() {
        let live = Path::new("a/OrderRepository.java");
        let retired = retired_path(live);
        assert_eq!(retired, Path::new("a/OrderRepository.java.retired"));
        assert_eq!(live_path(&retired).as_deref(), Some(live));
        assert_eq!(live_path(live), None);
    }

    #[test]
    fn recover_without_retired_copy_does_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_rename().never();
        fs.expect_remove_file().never();

        let r = Retirement::new(Arc::new(fs));
        let action = r.recover(Path::new("A.java")).unwrap();
        assert_eq!(action, RecoveryAction::Nothing);
    }

    #[test]
    fn recover_restores_when_live_file_is_missing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("A.java.retired"));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("A.java.retired") && to == Path::new("A.java"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_remove_file().never();

        let r = Retirement::new(Arc::new(fs));
        let action = r.recover(Path::new("A.java")).unwrap();
        assert_eq!(action, RecoveryAction::Restored);
    }

    #[test]
    fn recover_discards_retired_copy_when_both_exist() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_file()
            .withf(|p| p == Path::new("A.java.retired"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_rename().never();

        let r = Retirement::new(Arc::new(fs));
        let action = r.recover(Path::new("A.java")).unwrap();
        assert_eq!(action, RecoveryAction::DiscardedStale);
    }

    #[test]
    fn recover_failure_is_reported_as_recovery_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("A.java.retired"));
        fs.expect_rename()
            .returning(|from, _| Err(ApplicationError::fs(from, "permission denied").into()));

        let r = Retirement::new(Arc::new(fs));
        assert!(matches!(
            r.recover(Path::new("A.java")),
            Err(StratumError::Application(ApplicationError::RecoveryFailed { .. }))
        ));
    }

    #[test]
    fn rollback_replaces_partial_live_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_file()
            .withf(|p| p == Path::new("A.java"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("A.java.retired") && to == Path::new("A.java"))
            .times(1)
            .returning(|_, _| Ok(()));

        let r = Retirement::new(Arc::new(fs));
        r.rollback(Path::new("A.java"), Path::new("A.java.retired"))
            .unwrap();
    }
}
