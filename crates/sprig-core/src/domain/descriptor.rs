//! The `ProjectDescriptor` aggregate root and its typestate builder.
//!
//! A descriptor is the validated, immutable description of the project a
//! caller wants generated. It is created once per generation request and is
//! shared read-only by the resolver, the registry and every contributor.
//!
//! # Typestate builder
//!
//! The builder carries the language in its type parameter (`NoLanguage` /
//! `HasLanguage`), so a descriptor cannot be built without one. Everything
//! else has a default:
//!
//! | Field | Default |
//! |-------|---------|
//! | group id | `com.example` |
//! | artifact id | `demo` |
//! | version | `0.0.1-SNAPSHOT` |
//! | platform version | [`ProjectDescriptor::DEFAULT_PLATFORM_VERSION`] |
//! | build system | maven |
//! | packaging | jar |
//! | name | artifact id |
//! | application name | derived from the name |
//! | package name | derived from group and artifact ids |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    naming,
    value_objects::{BuildSystem, Language, Packaging},
    version::PlatformVersion,
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully validated generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    language: Language,
    platform_version: PlatformVersion,
    build_system: BuildSystem,
    packaging: Packaging,
    group_id: String,
    artifact_id: String,
    version: String,
    name: String,
    description: Option<String>,
    application_name: String,
    package_name: String,
    facets: Vec<String>,
}

impl ProjectDescriptor {
    pub const DEFAULT_PLATFORM_VERSION: PlatformVersion = PlatformVersion::new(3, 2, 0);
    pub const DEFAULT_GROUP_ID: &'static str = "com.example";
    pub const DEFAULT_ARTIFACT_ID: &'static str = "demo";
    pub const DEFAULT_VERSION: &'static str = "0.0.1-SNAPSHOT";

    /// Start building a new descriptor.
    pub fn builder() -> ProjectDescriptorBuilder<NoLanguage> {
        ProjectDescriptorBuilder::new()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
    pub fn platform_version(&self) -> &PlatformVersion {
        &self.platform_version
    }
    pub const fn build_system(&self) -> BuildSystem {
        self.build_system
    }
    pub const fn packaging(&self) -> Packaging {
        self.packaging
    }
    pub fn group_id(&self) -> &str {
        &self.group_id
    }
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn application_name(&self) -> &str {
        &self.application_name
    }
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Requested facets, deduplicated, in request order.
    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    pub fn has_facet(&self, facet: &str) -> bool {
        self.facets.iter().any(|f| f == facet)
    }

    /// Package name as a directory path (`com/example/demo`).
    pub fn package_path(&self) -> String {
        self.package_name.replace('.', "/")
    }

    /// Check internal consistency.
    ///
    /// Called by the builder. Available for re-validation after
    /// deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_coordinate("group id", &self.group_id, true)?;
        validate_coordinate("artifact id", &self.artifact_id, false)?;

        if self.version.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "version" });
        }
        if self.language.jvm_version().trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "jvm version",
            });
        }
        if !is_identifier(&self.application_name) {
            return Err(DomainError::InvalidDescriptor(format!(
                "application name '{}' is not a valid class name",
                self.application_name
            )));
        }
        if self.package_name.is_empty() || !self.package_name.split('.').all(is_identifier) {
            return Err(DomainError::InvalidDescriptor(format!(
                "package name '{}' is not a valid package",
                self.package_name
            )));
        }
        if let Some(facet) = self.facets.iter().find(|f| f.trim().is_empty()) {
            return Err(DomainError::InvalidDescriptor(format!(
                "facet id '{facet}' is blank"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ProjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({}, {}, {}, platform {})",
            self.group_id,
            self.artifact_id,
            self.language,
            self.build_system,
            self.packaging,
            self.platform_version
        )?;
        if !self.facets.is_empty() {
            write!(f, " [{}]", self.facets.join(", "))?;
        }
        Ok(())
    }
}

fn validate_coordinate(what: &str, value: &str, dotted: bool) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::InvalidDescriptor(format!("{what} is empty")));
    }
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid || (dotted && (value.starts_with('.') || value.ends_with('.'))) {
        return Err(DomainError::InvalidDescriptor(format!(
            "{what} '{value}' may only contain letters, digits, '-', '_' and '.'"
        )));
    }
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: language has not yet been set.
pub struct NoLanguage;
/// Marker: language has been set.
pub struct HasLanguage(Language);

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ProjectDescriptor`].
pub struct ProjectDescriptorBuilder<L> {
    language: L,
    platform_version: Option<PlatformVersion>,
    build_system: BuildSystem,
    packaging: Packaging,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    name: Option<String>,
    description: Option<String>,
    application_name: Option<String>,
    package_name: Option<String>,
    facets: Vec<String>,
}

impl ProjectDescriptorBuilder<NoLanguage> {
    pub fn new() -> Self {
        Self {
            language: NoLanguage,
            platform_version: None,
            build_system: BuildSystem::Maven,
            packaging: Packaging::Jar,
            group_id: None,
            artifact_id: None,
            version: None,
            name: None,
            description: None,
            application_name: None,
            package_name: None,
            facets: Vec::new(),
        }
    }

    /// Set the language. This transitions the builder to `HasLanguage`.
    pub fn language(self, language: Language) -> ProjectDescriptorBuilder<HasLanguage> {
        ProjectDescriptorBuilder {
            language: HasLanguage(language),
            platform_version: self.platform_version,
            build_system: self.build_system,
            packaging: self.packaging,
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            version: self.version,
            name: self.name,
            description: self.description,
            application_name: self.application_name,
            package_name: self.package_name,
            facets: self.facets,
        }
    }
}

impl Default for ProjectDescriptorBuilder<NoLanguage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> ProjectDescriptorBuilder<L> {
    pub fn platform_version(mut self, version: PlatformVersion) -> Self {
        self.platform_version = Some(version);
        self
    }

    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.build_system = build_system;
        self
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Request a facet. Repeated requests are ignored.
    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        let facet = facet.into().trim().to_string();
        if !self.facets.contains(&facet) {
            self.facets.push(facet);
        }
        self
    }

    pub fn facets<I, S>(self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        facets.into_iter().fold(self, |b, f| b.facet(f))
    }
}

impl ProjectDescriptorBuilder<HasLanguage> {
    /// Build the descriptor, deriving omitted names and validating the result.
    pub fn build(self) -> Result<ProjectDescriptor, DomainError> {
        let group_id = self
            .group_id
            .unwrap_or_else(|| ProjectDescriptor::DEFAULT_GROUP_ID.to_string());
        let artifact_id = self
            .artifact_id
            .unwrap_or_else(|| ProjectDescriptor::DEFAULT_ARTIFACT_ID.to_string());
        let name = self.name.unwrap_or_else(|| artifact_id.clone());
        let application_name = self
            .application_name
            .unwrap_or_else(|| naming::application_name(&name));
        let package_name = match self.package_name {
            Some(explicit) => naming::clean_package_name(&explicit),
            None => naming::package_name(&group_id, &artifact_id),
        };

        let descriptor = ProjectDescriptor {
            language: self.language.0,
            platform_version: self
                .platform_version
                .unwrap_or(ProjectDescriptor::DEFAULT_PLATFORM_VERSION),
            build_system: self.build_system,
            packaging: self.packaging,
            group_id,
            artifact_id,
            version: self
                .version
                .unwrap_or_else(|| ProjectDescriptor::DEFAULT_VERSION.to_string()),
            name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            application_name,
            package_name,
            facets: self.facets,
        };

        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::LanguageId;

    fn java() -> Language {
        Language::of(LanguageId::Java)
    }

    #[test]
    fn defaults_are_applied() {
        let d = ProjectDescriptor::builder().language(java()).build().unwrap();
        assert_eq!(d.group_id(), "com.example");
        assert_eq!(d.artifact_id(), "demo");
        assert_eq!(d.name(), "demo");
        assert_eq!(d.application_name(), "DemoApplication");
        assert_eq!(d.package_name(), "com.example.demo");
        assert_eq!(d.package_path(), "com/example/demo");
        assert_eq!(d.build_system(), BuildSystem::Maven);
        assert_eq!(d.packaging(), Packaging::Jar);
        assert_eq!(d.platform_version(), &ProjectDescriptor::DEFAULT_PLATFORM_VERSION);
        assert!(d.facets().is_empty());
    }

    #[test]
    fn names_are_derived_from_coordinates() {
        let d = ProjectDescriptor::builder()
            .group_id("org.acme")
            .artifact_id("order-service")
            .language(java())
            .build()
            .unwrap();
        assert_eq!(d.application_name(), "OrderServiceApplication");
        assert_eq!(d.package_name(), "org.acme.orderservice");
    }

    #[test]
    fn explicit_names_win() {
        let d = ProjectDescriptor::builder()
            .language(java())
            .application_name("Main")
            .package_name("io.sample")
            .build()
            .unwrap();
        assert_eq!(d.application_name(), "Main");
        assert_eq!(d.package_name(), "io.sample");
    }

    #[test]
    fn facets_are_deduplicated_in_order() {
        let d = ProjectDescriptor::builder()
            .language(java())
            .facets(["web", "json", "web", " json "])
            .build()
            .unwrap();
        assert_eq!(d.facets(), ["web", "json"]);
        assert!(d.has_facet("json"));
        assert!(!d.has_facet("h2"));
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(
            ProjectDescriptor::builder()
                .language(java())
                .group_id("com example")
                .build()
                .is_err()
        );
        assert!(
            ProjectDescriptor::builder()
                .language(java())
                .artifact_id("")
                .build()
                .is_err()
        );
        assert!(
            ProjectDescriptor::builder()
                .language(java())
                .application_name("1Main")
                .build()
                .is_err()
        );
    }

    #[test]
    fn rejects_blank_facet() {
        let result = ProjectDescriptor::builder().language(java()).facet("  ").build();
        assert!(matches!(result, Err(DomainError::InvalidDescriptor(_))));
    }

    #[test]
    fn display_summarises() {
        let d = ProjectDescriptor::builder()
            .language(java())
            .packaging(Packaging::War)
            .facet("web")
            .build()
            .unwrap();
        assert_eq!(
            d.to_string(),
            "com.example:demo (java 17, maven, war, platform 3.2.0) [web]"
        );
    }
}
