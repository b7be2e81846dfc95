use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A project-relative file path.
///
/// Invariant: never absolute, never empty, `/` separated, no `.` or `..`
/// segments. Comparison is case-sensitive, ordering is lexicographic so
/// file trees iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Fallible constructor. Backslashes are normalised to `/`.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let normalised = raw.replace('\\', "/");

        if normalised.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }
        if normalised.starts_with('/') || Path::new(raw).is_absolute() {
            return Err(invalid(raw, "path must be relative"));
        }

        let mut segments = Vec::new();
        for segment in normalised.split('/') {
            match segment {
                "" => continue,
                "." | ".." => return Err(invalid(raw, "'.' and '..' segments are not allowed")),
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return Err(invalid(raw, "path has no segments"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Native path below `root`.
    pub fn to_path_under(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, s| acc.join(s))
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RelativePath> for String {
    fn from(value: RelativePath) -> Self {
        value.0
    }
}

fn invalid(path: &str, reason: &str) -> DomainError {
    DomainError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
