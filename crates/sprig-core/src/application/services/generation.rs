//! Project generation.
//!
//! [`ProjectGenerator`] holds the process-wide, immutable parts (registry,
//! resolver, catalog). Each call to [`ProjectGenerator::generate`] opens a
//! [`ProjectGenerationContext`] that owns the per-request state: a fresh
//! build model and an empty file tree.
//!
//! ```text
//! descriptor ─► resolver ─► registry ─► contributors (in order) ─► snapshot
//!                  │                        │
//!               catalog            BuildModel + FileTree
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
    application::services::{
        contributor::ProjectScope,
        registry::ContributionRegistry,
        resolver::{DependencyResolver, ResolvedDependencies},
    },
    domain::{BuildModel, DependencyCatalog, DomainValidator, EffectiveBuild, FileTree, ProjectDescriptor},
    error::SprigResult,
};

/// Everything a generation produced, ready for serialization.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub generation_id: Uuid,
    pub descriptor: ProjectDescriptor,
    pub files: FileTree,
    pub build: EffectiveBuild,
    pub dependencies: ResolvedDependencies,
}

/// Serializable summary of a [`GeneratedProject`], for `--output-format json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary<'a> {
    pub descriptor: &'a ProjectDescriptor,
    pub files: Vec<&'a str>,
    pub build: &'a EffectiveBuild,
}

impl GeneratedProject {
    pub fn summary(&self) -> GenerationSummary<'_> {
        GenerationSummary {
            descriptor: &self.descriptor,
            files: self.files.paths().map(|p| p.as_str()).collect(),
            build: &self.build,
        }
    }
}

/// Entry point of the engine.
///
/// Cheap to clone; all state is shared behind `Arc`s and never mutated, so
/// one generator can serve concurrent generations.
#[derive(Clone)]
pub struct ProjectGenerator {
    registry: Arc<ContributionRegistry>,
    resolver: Arc<DependencyResolver>,
    catalog: Arc<DependencyCatalog>,
}

impl ProjectGenerator {
    pub fn new(
        registry: Arc<ContributionRegistry>,
        resolver: Arc<DependencyResolver>,
        catalog: Arc<DependencyCatalog>,
    ) -> Self {
        Self {
            registry,
            resolver,
            catalog,
        }
    }

    pub fn catalog(&self) -> &DependencyCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ContributionRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    /// Generate a project. Any error discards all partial output.
    pub fn generate(&self, descriptor: &ProjectDescriptor) -> SprigResult<GeneratedProject> {
        ProjectGenerationContext::new(self, descriptor.clone()).run()
    }
}

/// Per-generation state.
pub struct ProjectGenerationContext<'g> {
    id: Uuid,
    generator: &'g ProjectGenerator,
    descriptor: ProjectDescriptor,
    build: BuildModel,
    files: FileTree,
}

impl<'g> ProjectGenerationContext<'g> {
    pub fn new(generator: &'g ProjectGenerator, descriptor: ProjectDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            generator,
            descriptor,
            build: BuildModel::new(),
            files: FileTree::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolve dependencies and contributors, run contributors in order and
    /// take the build snapshot.
    pub fn run(mut self) -> SprigResult<GeneratedProject> {
        let span = info_span!("generate", id = %self.id, descriptor = %self.descriptor);
        let _guard = span.enter();

        DomainValidator::validate_descriptor(&self.descriptor)?;

        let dependencies = self
            .generator
            .resolver
            .resolve(&self.descriptor, &self.generator.catalog)?;
        let contributors = self.generator.registry.resolve(&self.descriptor)?;
        debug!(
            dependencies = dependencies.len(),
            contributors = contributors.len(),
            "Generation planned"
        );

        for contributor in &contributors {
            let mut scope = ProjectScope::new(
                contributor.name(),
                &self.descriptor,
                &dependencies,
                &mut self.build,
                &mut self.files,
            );
            if let Err(e) = contributor.contribute(&mut scope) {
                warn!(contributor = contributor.name(), error = %e, "Contributor failed");
                return Err(e);
            }
        }

        let build = self.build.resolve_effective();
        info!(
            files = self.files.len(),
            dependencies = build.dependencies.len(),
            "Generation complete"
        );

        Ok(GeneratedProject {
            generation_id: self.id,
            descriptor: self.descriptor,
            files: self.files,
            build,
            dependencies,
        })
    }
}
