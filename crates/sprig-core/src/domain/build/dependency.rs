use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Build identity of a dependency or plugin: `(group, artifact)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyId {
    pub group_id: String,
    pub artifact_id: String,
}

impl DependencyId {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.group_id.trim().is_empty() || self.artifact_id.trim().is_empty() {
            return Err(DomainError::InvalidDependency(format!(
                "'{self}' needs both a group and an artifact"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for DependencyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((group, artifact)) = s.split_once(':') else {
            return Err(DomainError::InvalidDependency(format!(
                "'{s}' is not in group:artifact form"
            )));
        };
        let id = Self::new(group.trim(), artifact.trim());
        id.validate()?;
        Ok(id)
    }
}

/// When a dependency is on the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    #[default]
    Compile,
    CompileOnly,
    Runtime,
    ProvidedRuntime,
    AnnotationProcessor,
    TestCompile,
    TestRuntime,
}

impl DependencyScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::CompileOnly => "compile-only",
            Self::Runtime => "runtime",
            Self::ProvidedRuntime => "provided-runtime",
            Self::AnnotationProcessor => "annotation-processor",
            Self::TestCompile => "test-compile",
            Self::TestRuntime => "test-runtime",
        }
    }

    pub const fn is_test(&self) -> bool {
        matches!(self, Self::TestCompile | Self::TestRuntime)
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "compile" => Ok(Self::Compile),
            "compile-only" => Ok(Self::CompileOnly),
            "runtime" => Ok(Self::Runtime),
            "provided-runtime" | "provided" => Ok(Self::ProvidedRuntime),
            "annotation-processor" => Ok(Self::AnnotationProcessor),
            "test-compile" | "test" => Ok(Self::TestCompile),
            "test-runtime" => Ok(Self::TestRuntime),
            other => Err(DomainError::InvalidDependency(format!(
                "unknown scope: {other}"
            ))),
        }
    }
}

/// A transitive dependency to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

/// A dependency declaration.
///
/// Exclusions are kept sorted and unique so two declarations compare equal
/// regardless of the order their exclusions were added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(flatten)]
    id: DependencyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default)]
    scope: DependencyScope,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exclusions: Vec<Exclusion>,
}

impl Dependency {
    /// A compile-scoped dependency without an explicit version.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            id: DependencyId::new(group_id, artifact_id),
            version: None,
            scope: DependencyScope::Compile,
            exclusions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        if let Err(pos) = self.exclusions.binary_search(&exclusion) {
            self.exclusions.insert(pos, exclusion);
        }
        self
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }
    pub fn group_id(&self) -> &str {
        &self.id.group_id
    }
    pub fn artifact_id(&self) -> &str {
        &self.id.artifact_id
    }
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    pub const fn scope(&self) -> DependencyScope {
        self.scope
    }
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    /// Validate the invariants, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.id.validate()?;
        if self.version.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(DomainError::InvalidDependency(format!(
                "'{}' has a blank version",
                self.id
            )));
        }
        Ok(())
    }

    /// Restore the sorted-exclusions invariant after deserialization.
    pub(crate) fn normalised(mut self) -> Self {
        self.exclusions.sort();
        self.exclusions.dedup();
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(v) = &self.version {
            write!(f, ":{v}")?;
        }
        write!(f, " ({})", self.scope)?;
        if !self.exclusions.is_empty() {
            write!(f, " excluding {}", self.exclusions.len())?;
        }
        Ok(())
    }
}
