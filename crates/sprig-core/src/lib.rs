//! Sprig Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Sprig
//! project generation engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            sprig-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ProjectGenerator, ScaffoldService,     │
//! │  CatalogService                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports and extension points (traits)   │
//! │  Filesystem, BuildSerializer,           │
//! │  CatalogSource, ProjectContributor,     │
//! │  DependencyPostProcessor                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      sprig-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  ProjectDescriptor, Condition,          │
//! │  BuildModel, DependencyCatalog, FileTree│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sprig_core::prelude::*;
//!
//! let generator = ProjectGenerator::new(
//!     Arc::new(registry),   // ContributionRegistry
//!     Arc::new(resolver),   // DependencyResolver
//!     Arc::new(catalog),    // DependencyCatalog
//! );
//!
//! let descriptor = ProjectDescriptor::builder()
//!     .language(Language::of(LanguageId::Java))
//!     .facet("web")
//!     .build()?;
//!
//! let project = generator.generate(&descriptor)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildEditor, CatalogService, ContributionRegistry, DependencyPostProcessor,
        DependencyResolver, GeneratedProject, PostProcessScope, ProjectContributor,
        ProjectGenerator, ProjectScope, ResolvedDependencies, ScaffoldService, category,
        ports::{BuildSerializer, CatalogSource, Filesystem},
    };
    pub use crate::domain::{
        BuildModel, BuildSystem, CatalogEntry, Condition, Dependency, DependencyCatalog,
        DependencyId, DependencyScope, EffectiveBuild, FacetDefinition, FileTree, Language,
        LanguageId, Packaging, PlatformVersion, Plugin, Predicate, ProjectDescriptor, Repository,
        VersionRange,
    };
    pub use crate::error::{SprigError, SprigResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
