//! Per-category advisory file locks.
//!
//! Every category has its own lock file (`<name>.lock`) in a shared lock
//! directory, separate from the configuration file itself. Holding the lock
//! serializes read-modify-write cycles across all processes on the host.
//! Operations on different categories never contend.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::category::Category;
use crate::error::{Result, TenantError};

/// Lock name serializing `shorewall reload` across applications.
pub const RELOAD_LOCK: &str = "reload";

/// A guard that holds an exclusive lock on one lock file.
/// The lock is released when the guard is dropped.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    /// Block until the exclusive lock for `category` is held.
    pub fn acquire(lock_dir: &Path, category: Category) -> Result<Self> {
        Self::acquire_named(lock_dir, category.lock_name())
    }

    /// Block until the exclusive lock `<lock_dir>/<name>.lock` is held.
    pub fn acquire_named(lock_dir: &Path, name: &str) -> Result<Self> {
        let path = lock_dir.join(format!("{name}.lock"));
        let lock_err = |source| TenantError::Lock {
            name: name.to_string(),
            path: path.clone(),
            source,
        };

        // An existing directory is fine.
        fs::create_dir_all(lock_dir).map_err(lock_err)?;

        // Open without truncating so a concurrent holder keeps its file.
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(lock_err)?;

        debug!("Waiting for lock {:?}", path);
        file.lock_exclusive().map_err(lock_err)?;
        debug!("Acquired lock {:?}", path);

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock anyway.
        let _ = FileExt::unlock(&self.file);
        debug!("Released lock {:?}", self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let lock_dir = dir.path().join("nested/locks");
        let guard = LockGuard::acquire(&lock_dir, Category::Snat).unwrap();
        assert_eq!(guard.path(), lock_dir.join("snats.lock"));
        assert!(guard.path().exists());
    }

    #[test]
    fn test_lock_reacquire_after_drop() {
        let dir = TempDir::new().unwrap();
        drop(LockGuard::acquire(dir.path(), Category::Zones).unwrap());
        let _again = LockGuard::acquire(dir.path(), Category::Zones).unwrap();
    }

    #[test]
    fn test_same_category_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let guard = LockGuard::acquire(dir.path(), Category::Rules).unwrap();

        // flock is per open file description: a second open must not succeed.
        let other = File::open(guard.path()).unwrap();
        assert!(other.try_lock_exclusive().is_err());
        drop(guard);
        assert!(other.try_lock_exclusive().is_ok());
    }

    #[test]
    fn test_blocking_acquire_waits_for_release() {
        let dir = TempDir::new().unwrap();
        let lock_dir = dir.path().to_path_buf();
        let guard = LockGuard::acquire(&lock_dir, Category::Policy).unwrap();
        let acquired = Arc::new(AtomicBool::new(false));

        let handle = {
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                let _g = LockGuard::acquire(&lock_dir, Category::Policy).unwrap();
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!acquired.load(Ordering::SeqCst));
        drop(guard);
        handle.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_different_categories_do_not_contend() {
        let dir = TempDir::new().unwrap();
        let _zones = LockGuard::acquire(dir.path(), Category::Zones).unwrap();
        let interfaces = File::create(dir.path().join("interfaces.lock")).unwrap();
        assert!(interfaces.try_lock_exclusive().is_ok());
    }

    #[test]
    fn test_lock_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("locks");
        std::fs::write(&blocker, b"").unwrap();
        let err = LockGuard::acquire(&blocker, Category::Zones).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Lock);
    }
}
