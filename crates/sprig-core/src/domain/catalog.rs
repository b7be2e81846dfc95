//! The dependency catalog: facet ids mapped to conditional entries.
//!
//! A facet is what a user asks for (`web`, `json`, `data-jpa`). Each facet
//! has one or more entries, each valid for a subset of descriptors (its
//! [`Condition`]) and carrying the concrete dependencies, extra facet tags
//! and repositories that facet means for that subset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    build::{Dependency, Repository},
    condition::Condition,
    descriptor::ProjectDescriptor,
    error::DomainError,
};

/// One variant of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Label used in diagnostics. Defaults to `<facet>#<index>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub condition: Condition,

    pub dependencies: Vec<Dependency>,

    /// Facets implied by this entry, visible to post-processors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Repositories the dependencies are published in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<Repository>,
}

impl CatalogEntry {
    pub fn new(condition: Condition, dependencies: Vec<Dependency>) -> Self {
        Self {
            id: None,
            condition,
            dependencies,
            tags: Vec::new(),
            repositories: Vec::new(),
        }
    }

    /// An entry valid for every descriptor.
    pub fn always(dependencies: Vec<Dependency>) -> Self {
        Self::new(Condition::always(), dependencies)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn is_valid_for(&self, descriptor: &ProjectDescriptor) -> bool {
        self.condition.matches(descriptor)
    }

    pub fn specificity(&self) -> usize {
        self.condition.specificity()
    }
}

/// A facet and all of its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacetDefinition {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(alias = "entry")]
    pub entries: Vec<CatalogEntry>,
}

impl FacetDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            group: None,
            entries: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Diagnostic label of the entry at `index`.
    pub fn entry_label(&self, index: usize) -> String {
        self.entries
            .get(index)
            .and_then(|e| e.id.clone())
            .unwrap_or_else(|| format!("{}#{}", self.id, index))
    }

    /// Entries whose condition holds, with their index.
    pub fn valid_entries<'a, 'd>(
        &'a self,
        descriptor: &'d ProjectDescriptor,
    ) -> impl Iterator<Item = (usize, &'a CatalogEntry)> + use<'a, 'd> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.is_valid_for(descriptor))
    }

    pub fn is_available_for(&self, descriptor: &ProjectDescriptor) -> bool {
        self.valid_entries(descriptor).next().is_some()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidCatalog("facet with an empty id".into()));
        }
        if self.entries.is_empty() {
            return Err(DomainError::InvalidCatalog(format!(
                "facet '{}' has no entries",
                self.id
            )));
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.dependencies.is_empty() {
                return Err(DomainError::InvalidCatalog(format!(
                    "entry '{}' carries no dependencies",
                    self.entry_label(index)
                )));
            }
            for dependency in &entry.dependencies {
                dependency.validate().map_err(|e| {
                    DomainError::InvalidCatalog(format!("entry '{}': {e}", self.entry_label(index)))
                })?;
            }
            for repository in &entry.repositories {
                repository.validate().map_err(|e| {
                    DomainError::InvalidCatalog(format!("entry '{}': {e}", self.entry_label(index)))
                })?;
            }
        }
        Ok(())
    }
}

/// Facet id → definition. Iteration is sorted by facet id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCatalog {
    facets: BTreeMap<String, FacetDefinition>,
}

impl DependencyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a facet. A second facet with the same id is rejected.
    pub fn insert(&mut self, facet: FacetDefinition) -> Result<(), DomainError> {
        facet.validate()?;
        if self.facets.contains_key(&facet.id) {
            return Err(DomainError::InvalidCatalog(format!(
                "facet '{}' is defined twice",
                facet.id
            )));
        }
        self.facets.insert(facet.id.clone(), facet);
        Ok(())
    }

    pub fn with_facet(mut self, facet: FacetDefinition) -> Result<Self, DomainError> {
        self.insert(facet)?;
        Ok(self)
    }

    /// Layer `other` on top of this catalog. Its facets replace same-id ones.
    pub fn overlay(&mut self, other: DependencyCatalog) {
        self.facets.extend(other.facets);
    }

    pub fn get(&self, facet: &str) -> Option<&FacetDefinition> {
        self.facets.get(facet)
    }

    pub fn contains(&self, facet: &str) -> bool {
        self.facets.contains_key(facet)
    }

    pub fn facets(&self) -> impl Iterator<Item = &FacetDefinition> {
        self.facets.values()
    }

    /// Facets with at least one entry valid for the descriptor.
    pub fn available_for<'a>(
        &'a self,
        descriptor: &'a ProjectDescriptor,
    ) -> impl Iterator<Item = &'a FacetDefinition> + 'a {
        self.facets
            .values()
            .filter(move |f| f.is_available_for(descriptor))
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}
