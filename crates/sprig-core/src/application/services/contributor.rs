//! The contributor extension point.
//!
//! A contributor is a unit of generation: it reads the descriptor and the
//! resolved dependencies and writes files and/or mutates the build model.
//! Contributors never see each other; they share state only through the
//! [`ProjectScope`] they are handed, which attributes every file and build
//! change to the running contributor.

use crate::{
    application::services::resolver::ResolvedDependencies,
    domain::{
        BuildModel, Dependency, DependencyId, FileTree, Plugin, ProjectDescriptor, RelativePath,
        Repository,
    },
    error::SprigResult,
};

/// Well-known contributor categories.
///
/// The registry can require that at least one active contributor of a
/// category exists for every descriptor.
pub mod category {
    pub const MAIN_CLASS: &str = "main-class";
    pub const TEST_CLASS: &str = "test-class";
    pub const SERVLET_INITIALIZER: &str = "servlet-initializer";
    pub const BUILD: &str = "build";
    pub const RESOURCES: &str = "resources";
}

/// A unit of project generation.
pub trait ProjectContributor: Send + Sync {
    /// Name used to attribute files and build changes.
    fn name(&self) -> &str;

    /// Category this contributor fills, if any.
    fn category(&self) -> Option<&'static str> {
        None
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()>;
}

/// What a contributor can see and change while it runs.
pub struct ProjectScope<'a> {
    contributor: &'a str,
    descriptor: &'a ProjectDescriptor,
    dependencies: &'a ResolvedDependencies,
    build: &'a mut BuildModel,
    files: &'a mut FileTree,
}

impl<'a> ProjectScope<'a> {
    pub(crate) fn new(
        contributor: &'a str,
        descriptor: &'a ProjectDescriptor,
        dependencies: &'a ResolvedDependencies,
        build: &'a mut BuildModel,
        files: &'a mut FileTree,
    ) -> Self {
        Self {
            contributor,
            descriptor,
            dependencies,
            build,
            files,
        }
    }

    pub fn contributor(&self) -> &str {
        self.contributor
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        self.descriptor
    }

    pub fn dependencies(&self) -> &ResolvedDependencies {
        self.dependencies
    }

    /// Write a file, failing with `FileConflict` if another contributor already did.
    pub fn write_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> SprigResult<()> {
        let path = RelativePath::try_new(path)?;
        self.files.insert(path, content, self.contributor)?;
        Ok(())
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// Read-only view of the build so far.
    pub fn build_model(&self) -> &BuildModel {
        &*self.build
    }

    /// Editor attributing every change to this contributor.
    pub fn build(&mut self) -> BuildEditor<'_> {
        BuildEditor {
            model: &mut *self.build,
            origin: self.contributor,
        }
    }
}

/// Mutating access to the build model on behalf of one contributor.
pub struct BuildEditor<'s> {
    model: &'s mut BuildModel,
    origin: &'s str,
}

impl BuildEditor<'_> {
    pub fn add_repository(&mut self, repository: Repository) -> SprigResult<()> {
        Ok(self.model.add_repository(repository, self.origin)?)
    }

    pub fn add_dependency(&mut self, dependency: Dependency) -> SprigResult<bool> {
        Ok(self.model.add_dependency(dependency, self.origin)?)
    }

    pub fn override_dependency(&mut self, dependency: Dependency) -> SprigResult<Option<Dependency>> {
        Ok(self.model.override_dependency(dependency, self.origin)?)
    }

    pub fn remove_dependency(&mut self, id: &DependencyId) -> Option<Dependency> {
        self.model.remove_dependency(id)
    }

    pub fn add_plugin(&mut self, plugin: Plugin) -> SprigResult<bool> {
        Ok(self.model.add_plugin(plugin, self.origin)?)
    }

    pub fn override_plugin(&mut self, plugin: Plugin) -> SprigResult<Option<Plugin>> {
        Ok(self.model.override_plugin(plugin, self.origin)?)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.model.set_property(key, value);
    }

    pub fn merge_property(&mut self, key: impl Into<String>, value: &str) {
        self.model.merge_property(key, value);
    }
}
