//! Fetch serialization
//!
//! Two layers: a mutex per cache path for threads of this process, and an
//! advisory lock on a sidecar `.lock` file for other processes sharing the
//! cache root. Callers take the in-process lock first.

use fs4::fs_std::FileExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-path mutexes shared by every fetch in this process
#[derive(Debug, Default)]
pub struct CoordinateLocks {
    slots: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl CoordinateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex guarding `path`, created on first use
    pub fn slot(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(path.to_path_buf()).or_default())
    }

    /// Drop mutexes nobody is holding or waiting on
    pub fn prune(&self) {
        self.slots
            .lock()
            .retain(|_, slot| Arc::strong_count(slot) > 1);
    }

    /// Number of tracked paths
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive advisory lock on a file, released on drop
///
/// The lock file itself is left in place; removing it would let a waiter
/// lock an unlinked inode while a newcomer locks a fresh one.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until an exclusive lock on `path` is held
    pub fn acquire(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        FileExt::lock_exclusive(&file)?;
        debug!("Acquired lock {}", path.display());

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
        debug!("Released lock {}", self.path.display());
    }
}
