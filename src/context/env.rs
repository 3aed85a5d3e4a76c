//! PATH-style environment variable of the running process

use crate::inject::{ExtendSearchPath, ExtensionError};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Variable extended when none is configured
pub const DEFAULT_PATH_VAR: &str = "CLASSPATH";

/// The environment of the current process
///
/// Child processes spawned after an injection inherit the extended
/// variable. The environment is process-global, so concurrent injections
/// into the same variable should be serialized by the caller.
///
/// Extending calls `std::env::set_var`. On Unix that is only sound while no
/// other thread reads or writes the environment (including libc calls such
/// as `getaddrinfo`), so inject before starting other work or while the rest
/// of the process is otherwise idle. The `exec` command injects before it
/// spawns the child and performs no concurrent lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Current entries of `var`, empty when unset
    pub fn entries(&self, var: &str) -> Vec<PathBuf> {
        env::var_os(var)
            .map(|value| env::split_paths(&value).collect())
            .unwrap_or_default()
    }
}

/// Capability appending to one PATH-style variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPathVar {
    var: String,
}

impl EnvPathVar {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvPathVar {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_VAR)
    }
}

impl ExtendSearchPath<ProcessEnvironment> for EnvPathVar {
    fn extend(&self, target: &ProcessEnvironment, entry: &Path) -> Result<(), ExtensionError> {
        if self.var.is_empty() || self.var.contains(['=', '\0']) {
            return Err(ExtensionError::rejected(format!(
                "invalid variable name '{}'",
                self.var
            )));
        }

        let mut entries = target.entries(&self.var);
        if entries.iter().any(|e| e == entry) {
            return Ok(());
        }
        entries.push(entry.to_path_buf());

        let joined = env::join_paths(&entries).map_err(|e| {
            ExtensionError::rejected(format!("{} cannot hold {}: {}", self.var, entry.display(), e))
        })?;
        env::set_var(&self.var, &joined);

        debug!("{} extended with {}", self.var, entry.display());
        Ok(())
    }
}
