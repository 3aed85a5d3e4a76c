//! Cache path derivation and presence checks

use crate::coordinate::Coordinate;
use crate::error::{DepinjectError, DepinjectResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Cache root used when none is configured, relative to the working directory
pub const DEFAULT_CACHE_ROOT: &str = ".dependencies";

/// Whether a coordinate's archive is already cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Archive present
    Hit,
    /// Archive absent, a fetch is needed
    Miss,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        };
        write!(f, "{}", name)
    }
}

/// Maps coordinates to archive paths under a root directory
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    root: PathBuf,
}

impl ArtifactCache {
    /// Create a cache rooted at `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a cache, rejecting a root that exists but is not a directory
    pub fn open(root: impl Into<PathBuf>) -> DepinjectResult<Self> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            return Err(DepinjectError::CacheRootInvalid {
                path: root,
                reason: "exists and is not a directory".to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every file of one coordinate
    pub fn dir_for(&self, coordinate: &Coordinate) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(coordinate.group_segments());
        dir.push(coordinate.artifact());
        dir.push(coordinate.version());
        dir
    }

    /// Canonical archive path of a coordinate
    ///
    /// The repository is not part of the path: the same coordinate fetched
    /// from two repositories shares one entry.
    pub fn path_for(&self, coordinate: &Coordinate) -> PathBuf {
        self.dir_for(coordinate).join(coordinate.file_name())
    }

    /// Advisory lock file guarding fetches of a coordinate
    pub fn lock_path_for(&self, coordinate: &Coordinate) -> PathBuf {
        self.dir_for(coordinate)
            .join(format!("{}.lock", coordinate.file_name()))
    }

    /// Presence check only, the content is never inspected
    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Hit or miss for a coordinate
    pub fn state(&self, coordinate: &Coordinate) -> CacheState {
        if self.exists(&self.path_for(coordinate)) {
            CacheState::Hit
        } else {
            CacheState::Miss
        }
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ROOT)
    }
}
