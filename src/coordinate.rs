//! Artifact coordinates
//!
//! A coordinate names one artifact archive: `group:artifact:version`, plus
//! the repository it is downloaded from. Coordinates are validated once on
//! construction and immutable afterwards.

use crate::error::{DepinjectError, DepinjectResult};
use crate::repository::Repository;
use std::fmt;
use std::str::FromStr;

/// File extension of every artifact archive
pub const ARCHIVE_EXTENSION: &str = "jar";

/// A validated `group:artifact:version` triple and its repository
///
/// Equality and hashing cover all four fields, repository included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
    repository: Repository,
}

impl Coordinate {
    /// Create a coordinate against the default (central) repository
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> DepinjectResult<Self> {
        let group = group.into();
        let artifact = artifact.into();
        let version = version.into();

        let input = format!("{}:{}:{}", group, artifact, version);
        for (field, value) in [("group", &group), ("artifact", &artifact), ("version", &version)] {
            validate_segment(&input, field, value)?;
        }

        Ok(Self {
            group,
            artifact,
            version,
            repository: Repository::default(),
        })
    }

    /// Parse shorthand `group:artifact:version` against the default repository
    pub fn parse(shorthand: &str) -> DepinjectResult<Self> {
        let segments: Vec<&str> = shorthand.split(':').collect();
        if segments.len() != 3 {
            return Err(DepinjectError::malformed(
                shorthand,
                format!(
                    "expected group:artifact:version, found {} segment(s)",
                    segments.len()
                ),
            ));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(DepinjectError::malformed(
                shorthand,
                "group, artifact and version must all be non-empty",
            ));
        }
        Self::new(segments[0], segments[1], segments[2]).map_err(|e| match e {
            DepinjectError::MalformedCoordinate { reason, .. } => {
                DepinjectError::malformed(shorthand, reason)
            }
            other => other,
        })
    }

    /// Parse shorthand and attach a repository
    pub fn parse_with_repository(shorthand: &str, repository: Repository) -> DepinjectResult<Self> {
        Ok(Self::parse(shorthand)?.with_repository(repository))
    }

    /// Same coordinate, different repository
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repository = repository;
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// `artifact-version`, the name used in messages
    pub fn name(&self) -> String {
        format!("{}-{}", self.artifact, self.version)
    }

    /// `artifact-version.jar`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name(), ARCHIVE_EXTENSION)
    }

    /// Group id split on `.`
    pub fn group_segments(&self) -> impl Iterator<Item = &str> {
        self.group.split('.')
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Coordinate {
    type Err = DepinjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reject values that are empty or could escape the cache directory
fn validate_segment(input: &str, field: &str, value: &str) -> DepinjectResult<()> {
    let reason = if value.is_empty() {
        Some(format!("{} is empty", field))
    } else if value.trim() != value {
        Some(format!("{} has surrounding whitespace", field))
    } else if value.contains(['/', '\\', '\0']) {
        Some(format!("{} contains a path separator", field))
    } else if value.contains(':') {
        Some(format!("{} contains ':'", field))
    } else if value == "." || value == ".." {
        Some(format!("{} is a relative path component", field))
    } else if field == "group" && value.split('.').any(str::is_empty) {
        // `org..example` would produce an empty directory name
        Some("group has an empty segment".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DepinjectError::malformed(input, reason)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;

    #[test]
    fn parse_shorthand() {
        let c: Coordinate = "org.example:lib:1.0.0".parse().unwrap();
        assert_eq!(c.group(), "org.example");
        assert_eq!(c.artifact(), "lib");
        assert_eq!(c.version(), "1.0.0");
        assert_eq!(c.repository(), &Repository::central());
    }

    #[test]
    fn parse_wrong_segment_count() {
        for input in ["", "org.example", "org.example:lib", "a:b:c:d", "a:b:c:"] {
            let err = Coordinate::parse(input).unwrap_err();
            assert_eq!(err.kind(), Some(ErrorKind::MalformedCoordinate), "{}", input);
            assert!(err.to_string().contains(input));
        }
    }

    #[test]
    fn parse_empty_segment() {
        let err = Coordinate::parse("org.example::1.0").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MalformedCoordinate));
    }

    #[test]
    fn rejects_path_escape() {
        assert!(Coordinate::new("org", "../../etc", "1").is_err());
        assert!(Coordinate::new("org", "lib", "..").is_err());
        assert!(Coordinate::new("org", "lib", "1.0\\x").is_err());
        assert!(Coordinate::new("org..example", "lib", "1").is_err());
        assert!(Coordinate::new(".org", "lib", "1").is_err());
    }

    #[test]
    fn rejects_colon_in_field() {
        for (g, a, v) in [("org:x", "lib", "1"), ("org", "a:b", "1"), ("org", "lib", "1:0")] {
            let err = Coordinate::new(g, a, v).unwrap_err();
            assert_eq!(err.kind(), Some(ErrorKind::MalformedCoordinate));
            assert!(err.to_string().contains("contains ':'"));
        }
    }

    #[test]
    fn rejects_whitespace() {
        assert!(Coordinate::parse("org.example: lib:1.0").is_err());
    }

    #[test]
    fn no_case_normalization() {
        let c = Coordinate::parse("Org.Example:Lib:1.0-SNAPSHOT").unwrap();
        assert_eq!(c.to_string(), "Org.Example:Lib:1.0-SNAPSHOT");
    }

    #[test]
    fn equality_includes_repository() {
        let a = Coordinate::parse("org.example:lib:1.0.0").unwrap();
        let b = a
            .clone()
            .with_repository(Repository::new("https://repo.example.com/").unwrap());
        assert_ne!(a, b);

        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn names() {
        let c = Coordinate::new("org.example", "lib", "1.0.0").unwrap();
        assert_eq!(c.name(), "lib-1.0.0");
        assert_eq!(c.file_name(), "lib-1.0.0.jar");
        assert_eq!(c.group_segments().collect::<Vec<_>>(), ["org", "example"]);
    }

    #[test]
    fn parse_with_repository() {
        let repo = Repository::new("https://repo.example.com/maven2").unwrap();
        let c = Coordinate::parse_with_repository("org.example:lib:1.0.0", repo.clone()).unwrap();
        assert_eq!(c.repository(), &repo);
    }
}
