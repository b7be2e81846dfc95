//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "list facets".

pub mod catalog_service;
pub mod contributor;
pub mod generation;
pub mod registry;
pub mod resolver;
pub mod scaffold_service;

pub use catalog_service::{CatalogService, FacetInfo};
pub use contributor::{BuildEditor, ProjectContributor, ProjectScope, category};
pub use generation::{GeneratedProject, GenerationSummary, ProjectGenerationContext, ProjectGenerator};
pub use registry::{ContributionRegistry, ContributionRegistryBuilder};
pub use resolver::{
    DependencyPostProcessor, DependencyResolver, DependencyResolverBuilder, DependencySource,
    PostProcessScope, ResolvedDependencies, ResolvedDependency,
};
pub use scaffold_service::ScaffoldService;
