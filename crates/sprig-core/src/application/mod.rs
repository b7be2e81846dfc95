//! Application layer for Sprig.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectGenerator, ScaffoldService, CatalogService)
//! - **Extension points**: `ProjectContributor`, `DependencyPostProcessor`
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BuildEditor, CatalogService, ContributionRegistry, DependencyPostProcessor,
    DependencyResolver, DependencySource, FacetInfo, GeneratedProject, PostProcessScope,
    ProjectContributor, ProjectGenerationContext, ProjectGenerator, ProjectScope,
    ResolvedDependencies, ScaffoldService, category,
};

pub use ports::{BuildSerializer, CatalogSource, Filesystem};

pub use error::ApplicationError;
