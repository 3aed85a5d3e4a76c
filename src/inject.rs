//! Code search path injection
//!
//! Making an archive visible to a live execution context is a privileged,
//! host-specific operation. It is modelled as a capability object
//! implementing [`ExtendSearchPath`] for some target type; the [`Injector`]
//! owns one capability and applies it to caller-owned targets.

use crate::error::{DepinjectError, DepinjectResult};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Why a search path extension did not happen
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// The target exposes no extension point
    #[error("target does not support search path extension")]
    Unsupported,

    /// The target refused the entry
    #[error("extension rejected: {reason}")]
    Rejected { reason: String },

    /// The underlying mechanism failed
    #[error("extension failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ExtensionError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Capability to append a local path to a target's code search path
///
/// The target is owned by the caller and only borrowed for one call.
pub trait ExtendSearchPath<T: ?Sized>: Send + Sync {
    fn extend(&self, target: &T, entry: &Path) -> Result<(), ExtensionError>;
}

impl<T: ?Sized, C: ExtendSearchPath<T> + ?Sized> ExtendSearchPath<T> for &C {
    fn extend(&self, target: &T, entry: &Path) -> Result<(), ExtensionError> {
        (**self).extend(target, entry)
    }
}

impl<T: ?Sized, C: ExtendSearchPath<T> + ?Sized> ExtendSearchPath<T> for Box<C> {
    fn extend(&self, target: &T, entry: &Path) -> Result<(), ExtensionError> {
        (**self).extend(target, entry)
    }
}

/// Applies a search path capability to cached archives
#[derive(Debug, Clone, Default)]
pub struct Injector<C> {
    capability: C,
}

impl<C> Injector<C> {
    pub fn new(capability: C) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Extend `target` with `artifact`
    ///
    /// The archive must exist; its content is not inspected. A failure
    /// leaves the cached archive in place.
    pub fn inject<T: ?Sized>(&self, artifact: &Path, target: &T) -> DepinjectResult<()>
    where
        C: ExtendSearchPath<T>,
    {
        let name = artifact
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.display().to_string());

        if !artifact.is_file() {
            return Err(DepinjectError::Injection {
                name,
                source: ExtensionError::rejected(format!(
                    "{} does not exist",
                    artifact.display()
                )),
            });
        }

        self.capability
            .extend(target, artifact)
            .map_err(|source| DepinjectError::Injection { name, source })?;

        debug!("Injected {}", artifact.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use parking_lot::Mutex;
    use std::error::Error as _;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Recorder;

    impl ExtendSearchPath<Mutex<Vec<PathBuf>>> for Recorder {
        fn extend(&self, target: &Mutex<Vec<PathBuf>>, entry: &Path) -> Result<(), ExtensionError> {
            target.lock().push(entry.to_path_buf());
            Ok(())
        }
    }

    struct NoExtensionPoint;

    impl ExtendSearchPath<()> for NoExtensionPoint {
        fn extend(&self, _target: &(), _entry: &Path) -> Result<(), ExtensionError> {
            Err(ExtensionError::Unsupported)
        }
    }

    fn archive(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("lib-1.0.0.jar");
        fs::write(&path, b"jar").unwrap();
        path
    }

    #[test]
    fn inject_appends() {
        let dir = TempDir::new().unwrap();
        let path = archive(&dir);
        let target = Mutex::new(Vec::new());

        Injector::new(Recorder).inject(&path, &target).unwrap();

        assert_eq!(*target.lock(), vec![path]);
    }

    #[test]
    fn missing_archive_is_injection_failure() {
        let dir = TempDir::new().unwrap();
        let target = Mutex::new(Vec::new());

        let err = Injector::new(Recorder)
            .inject(&dir.path().join("absent-1.0.jar"), &target)
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::InjectionFailure));
        assert!(target.lock().is_empty());
    }

    #[test]
    fn unsupported_target_carries_cause() {
        let dir = TempDir::new().unwrap();
        let path = archive(&dir);

        let err = Injector::new(NoExtensionPoint).inject(&path, &()).unwrap_err();

        assert_eq!(err.to_string(), "Could not inject dependency lib-1.0.0");
        assert!(err
            .source()
            .is_some_and(|s| s.to_string().contains("does not support")));
        assert!(path.exists());
    }

    #[test]
    fn capability_by_reference() {
        let dir = TempDir::new().unwrap();
        let path = archive(&dir);
        let target = Mutex::new(Vec::new());
        let recorder = Recorder;

        Injector::new(&recorder).inject(&path, &target).unwrap();
        Injector::new(Box::new(Recorder)).inject(&path, &target).unwrap();

        assert_eq!(target.lock().len(), 2);
    }
}
