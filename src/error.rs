//! Error types for depinject
//!
//! The fetch-cache-inject pipeline only ever surfaces the four core kinds
//! (see [`ErrorKind`]). The remaining variants belong to the CLI and the
//! configuration layer.

use crate::inject::ExtensionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for depinject operations
pub type DepinjectResult<T> = Result<T, DepinjectError>;

/// Boxed transport or I/O cause attached to a download failure
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can occur in depinject
#[derive(Error, Debug)]
pub enum DepinjectError {
    // Pipeline errors
    #[error("Malformed coordinate '{input}': {reason}")]
    MalformedCoordinate { input: String, reason: String },

    #[error("Invalid repository '{url}': {reason}")]
    InvalidRepository { url: String, reason: String },

    #[error("Could not download dependency {name}: {reason}")]
    DependencyDownload {
        name: String,
        reason: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Could not inject dependency {name}")]
    Injection {
        name: String,
        #[source]
        source: ExtensionError,
    },

    // Cache errors
    #[error("Invalid cache root {path}: {reason}")]
    CacheRootInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The four failure kinds the pipeline reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedCoordinate,
    InvalidRepository,
    DependencyDownloadFailure,
    InjectionFailure,
}

impl DepinjectError {
    /// Create a malformed coordinate error
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid repository error
    pub fn invalid_repository(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRepository {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a download failure without an underlying cause
    pub fn download(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DependencyDownload {
            name: name.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a download failure wrapping a transport or I/O error
    pub fn download_caused(
        name: impl Into<String>,
        reason: impl Into<String>,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::DependencyDownload {
            name: name.into(),
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Pipeline failure kind, `None` for configuration and CLI errors
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::MalformedCoordinate { .. } => Some(ErrorKind::MalformedCoordinate),
            Self::InvalidRepository { .. } => Some(ErrorKind::InvalidRepository),
            Self::DependencyDownload { .. } => Some(ErrorKind::DependencyDownloadFailure),
            Self::Injection { .. } => Some(ErrorKind::InjectionFailure),
            _ => None,
        }
    }

    /// Check if error is retryable
    ///
    /// Nothing is retried automatically; this only tells callers whether
    /// running the same request again can possibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DependencyDownload { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedCoordinate { .. } => Some("Use the form group:artifact:version"),
            Self::InvalidRepository { .. } => {
                Some("Pass a preset name (see: depinject repos) or an http(s) URL")
            }
            Self::DependencyDownload { .. } => {
                Some("Check the repository URL and your network connection")
            }
            Self::ConfigInvalid { .. } => Some("Run: depinject config show"),
            _ => None,
        }
    }
}
