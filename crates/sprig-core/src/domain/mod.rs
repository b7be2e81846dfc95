// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Sprig.
//!
//! Pure values and rules: descriptors, conditions, the build model, the
//! dependency catalog and the virtual file tree. Nothing here does I/O or
//! emits logs; orchestration lives in `crate::application`.
//!
//! - **No I/O**: no filesystem, network or clock access
//! - **Immutable values**: everything is `Clone + PartialEq`
//! - **Validated construction**: builders reject invalid values

pub mod build;
pub mod catalog;
pub mod condition;
pub mod descriptor;
pub mod error;
pub mod file_tree;
pub mod naming;
pub mod path;
pub mod value_objects;
pub mod version;

mod validation;

pub use build::{
    BuildModel, Credentials, Dependency, DependencyId, DependencyScope, EffectiveBuild, Exclusion,
    Plugin, PluginSetting, Repository, RepositoryBuilder,
};
pub use catalog::{CatalogEntry, DependencyCatalog, FacetDefinition};
pub use condition::{Condition, ConditionBuilder, Predicate};
pub use descriptor::{HasLanguage, NoLanguage, ProjectDescriptor, ProjectDescriptorBuilder};
pub use error::{DomainError, ErrorCategory};
pub use file_tree::{FileTree, GeneratedFile};
pub use path::RelativePath;
pub use validation::DomainValidator;
pub use value_objects::{BuildSystem, DEFAULT_JVM_VERSION, Language, LanguageId, Packaging};
pub use version::{Bound, PlatformVersion, VersionRange};
