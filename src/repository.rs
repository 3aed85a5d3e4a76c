//! Remote artifact repositories
//!
//! A [`Repository`] is just a base URL. The [`RepositoryCatalog`] maps a few
//! well-known names to their URLs and can be extended once, at startup, with
//! named repositories from the configuration file.

use crate::error::{DepinjectError, DepinjectResult};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the default repository
pub const DEFAULT_REPOSITORY: &str = "central";

/// Built-in repository presets: (name, base URL)
pub const PRESETS: &[(&str, &str)] = &[
    ("central", "https://repo1.maven.org/maven2/"),
    ("jcenter", "https://jcenter.bintray.com/"),
    ("google", "https://maven.google.com/"),
    (
        "sonatype",
        "https://oss.sonatype.org/content/repositories/releases/",
    ),
];

/// Reference to a remote repository by base URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Repository {
    base_url: String,
}

impl Repository {
    /// Create a repository from an arbitrary base URL
    ///
    /// Only emptiness is checked here; the URL is parsed when a download
    /// URL is resolved.
    pub fn new(base_url: impl Into<String>) -> DepinjectResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(DepinjectError::invalid_repository(
                base_url,
                "repository URL is empty",
            ));
        }
        Ok(Self { base_url })
    }

    /// The public central repository
    pub fn central() -> Self {
        Self {
            base_url: PRESETS[0].1.to_string(),
        }
    }

    /// Base URL exactly as supplied
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::central()
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url)
    }
}

/// Named repositories, fixed once built
#[derive(Debug, Clone)]
pub struct RepositoryCatalog {
    entries: BTreeMap<String, Repository>,
}

impl RepositoryCatalog {
    /// Catalog holding only the built-in presets
    pub fn presets() -> Self {
        let entries = PRESETS
            .iter()
            .map(|(name, url)| {
                (
                    (*name).to_string(),
                    Repository {
                        base_url: (*url).to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Presets plus configuration-defined repositories
    ///
    /// Custom entries may not shadow a preset name.
    pub fn with_custom(custom: &BTreeMap<String, String>) -> DepinjectResult<Self> {
        let mut catalog = Self::presets();
        for (name, url) in custom {
            if catalog.entries.contains_key(name) {
                return Err(DepinjectError::invalid_repository(
                    url.clone(),
                    format!("'{}' is a built-in repository name", name),
                ));
            }
            catalog.entries.insert(name.clone(), Repository::new(url.clone())?);
        }
        Ok(catalog)
    }

    /// Look up a repository by name
    pub fn lookup(&self, name: &str) -> Option<&Repository> {
        self.entries.get(name)
    }

    /// Resolve a catalog name or, failing that, an arbitrary URL
    pub fn resolve_ref(&self, name_or_url: &str) -> DepinjectResult<Repository> {
        match self.lookup(name_or_url) {
            Some(repo) => Ok(repo.clone()),
            None => Repository::new(name_or_url),
        }
    }

    /// Iterate over (name, repository) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Repository)> {
        self.entries.iter().map(|(name, repo)| (name.as_str(), repo))
    }

    /// Whether `name` is one of the built-in presets
    pub fn is_preset(name: &str) -> bool {
        PRESETS.iter().any(|(preset, _)| *preset == name)
    }
}

impl Default for RepositoryCatalog {
    fn default() -> Self {
        Self::presets()
    }
}
