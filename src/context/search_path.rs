//! Shared in-process code search path

use crate::inject::{ExtendSearchPath, ExtensionError};
use parking_lot::RwLock;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<PathBuf>,
    sealed: bool,
}

/// Ordered list of code locations, shared by every clone
///
/// A host resolves code by walking [`SearchPath::entries`]; appending an
/// entry makes it visible to every subsequent lookup without a restart.
/// Once [`sealed`](SearchPath::seal) the path refuses further entries.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    inner: Arc<RwLock<Inner>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries in insertion order
    pub fn entries(&self) -> Vec<PathBuf> {
        self.inner.read().entries.clone()
    }

    pub fn contains(&self, entry: &Path) -> bool {
        self.inner.read().entries.iter().any(|e| e == entry)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refuse any further entries
    pub fn seal(&self) {
        self.inner.write().sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().sealed
    }

    /// First entry, in order, for which `relative` exists inside it
    ///
    /// Directory entries are joined with `relative`; archive entries only
    /// match when they are themselves the requested file name.
    pub fn locate(&self, relative: &Path) -> Option<PathBuf> {
        self.inner.read().entries.iter().find_map(|entry| {
            if entry.is_dir() {
                let candidate = entry.join(relative);
                candidate.exists().then_some(candidate)
            } else {
                (entry.file_name() == relative.file_name() && entry.exists())
                    .then(|| entry.clone())
            }
        })
    }

    /// Entries joined with the platform path-list separator
    pub fn to_os_string(&self) -> Result<OsString, std::env::JoinPathsError> {
        std::env::join_paths(self.inner.read().entries.iter())
    }

    /// Append `entry` unless already present; `Ok(false)` when it was
    fn try_push(&self, entry: &Path) -> Result<bool, ExtensionError> {
        let mut inner = self.inner.write();
        if inner.sealed {
            return Err(ExtensionError::rejected("search path is sealed"));
        }
        if inner.entries.iter().any(|e| e == entry) {
            return Ok(false);
        }
        inner.entries.push(entry.to_path_buf());
        Ok(true)
    }
}

/// Capability appending to a [`SearchPath`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendToSearchPath;

impl ExtendSearchPath<SearchPath> for AppendToSearchPath {
    fn extend(&self, target: &SearchPath, entry: &Path) -> Result<(), ExtensionError> {
        target.try_push(entry).map(|_| ())
    }
}
