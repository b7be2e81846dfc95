//! Domain value objects: LanguageId, Language, BuildSystem, Packaging.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! define the types, their string representations, and their `FromStr`
//! parsers. Activation logic lives in `condition.rs`.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Register contributors for it in the adapters crate

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JVM release targeted when the caller does not pick one.
pub const DEFAULT_JVM_VERSION: &str = "17";

// ── LanguageId ───────────────────────────────────────────────────────────────

/// A supported JVM language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    Java,
    Kotlin,
    Groovy,
    Scala,
}

impl LanguageId {
    pub const ALL: [LanguageId; 4] = [Self::Java, Self::Kotlin, Self::Groovy, Self::Scala];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Groovy => "groovy",
            Self::Scala => "scala",
        }
    }

    /// Directory under `src/main` and `src/test` holding this language's sources.
    pub const fn source_dir(&self) -> &'static str {
        self.as_str()
    }

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
            Self::Groovy => "groovy",
            Self::Scala => "scala",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "kotlin" | "kt" => Ok(Self::Kotlin),
            "groovy" => Ok(Self::Groovy),
            "scala" => Ok(Self::Scala),
            other => Err(DomainError::InvalidDescriptor(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

// ── Language ─────────────────────────────────────────────────────────────────

/// A language together with the JVM release it compiles for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    id: LanguageId,
    jvm_version: String,
}

impl Language {
    pub fn new(id: LanguageId, jvm_version: impl Into<String>) -> Self {
        Self {
            id,
            jvm_version: jvm_version.into(),
        }
    }

    /// Language targeting [`DEFAULT_JVM_VERSION`].
    pub fn of(id: LanguageId) -> Self {
        Self::new(id, DEFAULT_JVM_VERSION)
    }

    pub const fn id(&self) -> LanguageId {
        self.id
    }

    pub fn jvm_version(&self) -> &str {
        &self.jvm_version
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.jvm_version)
    }
}

// ── BuildSystem ──────────────────────────────────────────────────────────────

/// The build tool the generated project is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Maven,
    Gradle,
}

impl BuildSystem {
    pub const ALL: [BuildSystem; 2] = [Self::Maven, Self::Gradle];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
        }
    }

    /// Name of the build descriptor at the project root.
    pub const fn build_file_name(&self) -> &'static str {
        match self {
            Self::Maven => "pom.xml",
            Self::Gradle => "build.gradle",
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maven" | "mvn" => Ok(Self::Maven),
            "gradle" => Ok(Self::Gradle),
            other => Err(DomainError::InvalidDescriptor(format!(
                "unknown build system: {other}"
            ))),
        }
    }
}

// ── Packaging ────────────────────────────────────────────────────────────────

/// How the built artifact is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    Jar,
    War,
}

impl Packaging {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jar => "jar",
            Self::War => "war",
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Packaging {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jar" => Ok(Self::Jar),
            "war" => Ok(Self::War),
            other => Err(DomainError::InvalidDescriptor(format!(
                "unknown packaging: {other}"
            ))),
        }
    }
}
