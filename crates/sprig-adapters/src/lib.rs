//! Infrastructure adapters for Sprig.
//!
//! This crate implements the ports and extension points defined in
//! `sprig-core`: catalog sources, contributors, post-processors, build
//! serializers and filesystems.

pub mod catalog;
pub mod contributors;
pub mod filesystem;
pub mod post_processors;
pub mod render;
pub mod serializer;

use std::sync::Arc;

use sprig_core::{
    application::{ProjectGenerator, ScaffoldService, ports::Filesystem},
    domain::DependencyCatalog,
};

// Re-export commonly used adapters
pub use catalog::{BuiltinCatalog, DirectoryCatalog, builtin_catalog};
pub use contributors::default_registry;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use post_processors::default_resolver;
pub use render::RenderContext;
pub use serializer::{GradleBuildSerializer, MavenPomSerializer, default_serializers};

/// Generator wired with the built-in contributors and post-processors.
pub fn default_generator(catalog: DependencyCatalog) -> ProjectGenerator {
    ProjectGenerator::new(
        Arc::new(default_registry()),
        Arc::new(default_resolver()),
        Arc::new(catalog),
    )
}

/// Scaffold service over [`default_generator`] and the built-in serializers.
pub fn default_scaffold_service(
    catalog: DependencyCatalog,
    filesystem: Box<dyn Filesystem>,
) -> ScaffoldService {
    ScaffoldService::new(default_generator(catalog), default_serializers(), filesystem)
}
