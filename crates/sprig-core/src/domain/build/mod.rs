//! In-memory build model.
//!
//! Contributors mutate a [`BuildModel`] during generation; serializers only
//! ever see the [`EffectiveBuild`] snapshot taken afterwards.
//!
//! ## Merge policy
//!
//! | Operation | Same identity, equal value | Same identity, different value |
//! |-----------|----------------------------|--------------------------------|
//! | `add_repository` | merged (snapshots OR'd, credentials kept) | `RepositoryConflict` if the url differs |
//! | `add_dependency` | no-op | `DependencyConflict` |
//! | `override_dependency` | replaced | replaced |
//! | `add_plugin` | no-op | `PluginConflict` |
//! | `override_plugin` | replaced | replaced |
//! | `set_property` | replaced | replaced (last write wins) |
//! | `merge_property` | union | union |
//!
//! Every entry remembers which source put it there, so conflicts name both.

pub mod dependency;
pub mod plugin;
pub mod repository;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use dependency::{Dependency, DependencyId, DependencyScope, Exclusion};
pub use plugin::{Plugin, PluginSetting};
pub use repository::{Credentials, Repository, RepositoryBuilder};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tracked<T> {
    value: T,
    origin: String,
}

impl<T> Tracked<T> {
    fn new(value: T, origin: &str) -> Self {
        Self {
            value,
            origin: origin.to_string(),
        }
    }
}

/// Mutable build state for one generation.
#[derive(Debug, Clone, Default)]
pub struct BuildModel {
    repositories: BTreeMap<String, Tracked<Repository>>,
    dependencies: BTreeMap<DependencyId, Tracked<Dependency>>,
    plugins: BTreeMap<DependencyId, Tracked<Plugin>>,
    properties: BTreeMap<String, String>,
}

impl BuildModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Repositories ─────────────────────────────────────────────────────────

    pub fn add_repository(&mut self, repository: Repository, origin: &str) -> Result<(), DomainError> {
        repository.validate()?;
        match self.repositories.get_mut(repository.id()) {
            Some(existing) if existing.value.url() != repository.url() => {
                Err(DomainError::RepositoryConflict {
                    id: repository.id().to_string(),
                    existing_url: existing.value.url().to_string(),
                    incoming_url: repository.url().to_string(),
                    existing_origin: existing.origin.clone(),
                    incoming_origin: origin.to_string(),
                })
            }
            Some(existing) => {
                existing.value.absorb(repository);
                Ok(())
            }
            None => {
                self.repositories
                    .insert(repository.id().to_string(), Tracked::new(repository, origin));
                Ok(())
            }
        }
    }

    pub fn repository(&self, id: &str) -> Option<&Repository> {
        self.repositories.get(id).map(|t| &t.value)
    }

    // ── Dependencies ─────────────────────────────────────────────────────────

    /// Add a dependency under the strict policy.
    ///
    /// Returns `Ok(false)` when an identical declaration is already present.
    pub fn add_dependency(&mut self, dependency: Dependency, origin: &str) -> Result<bool, DomainError> {
        dependency.validate()?;
        let dependency = dependency.normalised();
        match self.dependencies.get(dependency.id()) {
            Some(existing) if existing.value == dependency => Ok(false),
            Some(existing) => Err(DomainError::DependencyConflict {
                identity: dependency.id().to_string(),
                existing: existing.value.to_string(),
                incoming: dependency.to_string(),
                existing_origin: existing.origin.clone(),
                incoming_origin: origin.to_string(),
            }),
            None => {
                self.dependencies
                    .insert(dependency.id().clone(), Tracked::new(dependency, origin));
                Ok(true)
            }
        }
    }

    /// Replace version, scope and exclusions of a dependency, adding it if absent.
    ///
    /// Returns the declaration that was replaced.
    pub fn override_dependency(
        &mut self,
        dependency: Dependency,
        origin: &str,
    ) -> Result<Option<Dependency>, DomainError> {
        dependency.validate()?;
        let dependency = dependency.normalised();
        Ok(self
            .dependencies
            .insert(dependency.id().clone(), Tracked::new(dependency, origin))
            .map(|t| t.value))
    }

    pub fn remove_dependency(&mut self, id: &DependencyId) -> Option<Dependency> {
        self.dependencies.remove(id).map(|t| t.value)
    }

    pub fn dependency(&self, id: &DependencyId) -> Option<&Dependency> {
        self.dependencies.get(id).map(|t| &t.value)
    }

    pub fn has_dependency(&self, id: &DependencyId) -> bool {
        self.dependencies.contains_key(id)
    }

    /// Which source declared a dependency.
    pub fn dependency_origin(&self, id: &DependencyId) -> Option<&str> {
        self.dependencies.get(id).map(|t| t.origin.as_str())
    }

    // ── Plugins ──────────────────────────────────────────────────────────────

    /// Add a plugin under the strict policy.
    pub fn add_plugin(&mut self, plugin: Plugin, origin: &str) -> Result<bool, DomainError> {
        plugin.validate()?;
        match self.plugins.get(plugin.id()) {
            Some(existing) if existing.value == plugin => Ok(false),
            Some(existing) => Err(DomainError::PluginConflict {
                identity: plugin.id().to_string(),
                existing: existing.value.to_string(),
                incoming: plugin.to_string(),
                existing_origin: existing.origin.clone(),
                incoming_origin: origin.to_string(),
            }),
            None => {
                self.plugins
                    .insert(plugin.id().clone(), Tracked::new(plugin, origin));
                Ok(true)
            }
        }
    }

    pub fn override_plugin(&mut self, plugin: Plugin, origin: &str) -> Result<Option<Plugin>, DomainError> {
        plugin.validate()?;
        Ok(self
            .plugins
            .insert(plugin.id().clone(), Tracked::new(plugin, origin))
            .map(|t| t.value))
    }

    pub fn plugin(&self, id: &DependencyId) -> Option<&Plugin> {
        self.plugins.get(id).map(|t| &t.value)
    }

    // ── Properties ───────────────────────────────────────────────────────────

    /// Set a property. Last write wins.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Merge comma-separated values into a property.
    ///
    /// The result is the sorted union of the existing and incoming values,
    /// so the outcome does not depend on which source merged first.
    pub fn merge_property(&mut self, key: impl Into<String>, value: &str) {
        let entry = self.properties.entry(key.into()).or_default();
        let merged: BTreeSet<&str> = entry
            .split(',')
            .chain(value.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        let joined = merged.into_iter().collect::<Vec<_>>().join(",");
        *entry = joined;
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    // ── Snapshot ─────────────────────────────────────────────────────────────

    /// Stable snapshot, sorted by identity.
    pub fn resolve_effective(&self) -> EffectiveBuild {
        EffectiveBuild {
            repositories: self.repositories.values().map(|t| t.value.clone()).collect(),
            dependencies: self.dependencies.values().map(|t| t.value.clone()).collect(),
            plugins: self.plugins.values().map(|t| t.value.clone()).collect(),
            properties: self.properties.clone(),
        }
    }
}

/// Immutable, sorted view of a finished [`BuildModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveBuild {
    pub repositories: Vec<Repository>,
    pub dependencies: Vec<Dependency>,
    pub plugins: Vec<Plugin>,
    pub properties: BTreeMap<String, String>,
}

impl EffectiveBuild {
    pub fn dependency(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|d| d.group_id() == group_id && d.artifact_id() == artifact_id)
    }

    pub fn has_dependency(&self, group_id: &str, artifact_id: &str) -> bool {
        self.dependency(group_id, artifact_id).is_some()
    }

    pub fn repository(&self, id: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.id() == id)
    }

    /// Dependencies outside the test scopes.
    pub fn main_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| !d.scope().is_test())
    }

    /// Dependencies in the test scopes.
    pub fn test_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.scope().is_test())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web() -> Dependency {
        Dependency::new("org.springframework.boot", "spring-boot-starter-web")
    }

    #[test]
    fn same_repository_twice_merges() {
        let mut model = BuildModel::new();
        let plain = Repository::with_id_and_url("m", "https://repo/m").build().unwrap();
        let snapshots = Repository::with_id_and_url("m", "https://repo/m")
            .snapshots_enabled(true)
            .credentials(Credentials::new("u", "p"))
            .build()
            .unwrap();

        model.add_repository(plain, "a").unwrap();
        model.add_repository(snapshots, "b").unwrap();

        let merged = model.repository("m").unwrap();
        assert!(merged.snapshots_enabled());
        assert_eq!(merged.credentials().map(|c| c.username.as_str()), Some("u"));
    }

    #[test]
    fn repository_url_mismatch_is_a_conflict() {
        let mut model = BuildModel::new();
        model
            .add_repository(Repository::with_id_and_url("m", "https://one").build().unwrap(), "first")
            .unwrap();
        let err = model
            .add_repository(Repository::with_id_and_url("m", "https://two").build().unwrap(), "second")
            .unwrap_err();
        match err {
            DomainError::RepositoryConflict {
                existing_origin,
                incoming_origin,
                ..
            } => {
                assert_eq!(existing_origin, "first");
                assert_eq!(incoming_origin, "second");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identical_dependency_is_a_no_op() {
        let mut model = BuildModel::new();
        assert!(model.add_dependency(web(), "a").unwrap());
        assert!(!model.add_dependency(web(), "b").unwrap());
        assert_eq!(model.resolve_effective().dependencies.len(), 1);
        assert_eq!(model.dependency_origin(web().id()), Some("a"));
    }

    #[test]
    fn diverging_dependency_is_a_conflict() {
        let mut model = BuildModel::new();
        model.add_dependency(web(), "a").unwrap();
        let err = model
            .add_dependency(web().with_scope(DependencyScope::Runtime), "b")
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("spring-boot-starter-web"));
    }

    #[test]
    fn override_replaces_declaration() {
        let mut model = BuildModel::new();
        model.add_dependency(web(), "a").unwrap();
        let previous = model
            .override_dependency(web().with_version("3.0.0"), "b")
            .unwrap();
        assert_eq!(previous, Some(web()));
        assert_eq!(model.dependency(web().id()).unwrap().version(), Some("3.0.0"));
        assert_eq!(model.dependency_origin(web().id()), Some("b"));
    }

    #[test]
    fn plugins_follow_the_strict_policy() {
        let mut model = BuildModel::new();
        let plugin = Plugin::new("org.jetbrains.kotlin", "kotlin-maven-plugin");
        assert!(model.add_plugin(plugin.clone(), "a").unwrap());
        assert!(!model.add_plugin(plugin.clone(), "b").unwrap());
        assert!(
            model
                .add_plugin(plugin.clone().with_configuration("jvmTarget", "17"), "c")
                .unwrap_err()
                .is_conflict()
        );
        model
            .override_plugin(plugin.with_configuration("jvmTarget", "17"), "c")
            .unwrap();
    }

    #[test]
    fn properties_set_and_merge() {
        let mut model = BuildModel::new();
        model.set_property("java.version", "11");
        model.set_property("java.version", "17");
        assert_eq!(model.property("java.version"), Some("17"));

        model.merge_property("compiler.args", "-parameters");
        model.merge_property("compiler.args", "-Xlint,-parameters");
        assert_eq!(model.property("compiler.args"), Some("-Xlint,-parameters"));
    }

    #[test]
    fn snapshot_is_independent_of_insertion_order() {
        let deps = [
            Dependency::new("b", "two"),
            Dependency::new("a", "one"),
            Dependency::new("c", "three").with_scope(DependencyScope::TestCompile),
        ];

        let mut forward = BuildModel::new();
        for d in deps.iter().cloned() {
            forward.add_dependency(d, "x").unwrap();
        }
        let mut backward = BuildModel::new();
        for d in deps.iter().rev().cloned() {
            backward.add_dependency(d, "x").unwrap();
        }

        let snapshot = forward.resolve_effective();
        assert_eq!(snapshot, backward.resolve_effective());
        assert_eq!(snapshot.dependencies[0].group_id(), "a");
        assert_eq!(snapshot.test_dependencies().count(), 1);
        assert_eq!(snapshot.main_dependencies().count(), 2);
    }
}
