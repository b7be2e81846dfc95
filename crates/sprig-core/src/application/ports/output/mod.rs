//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprig-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{BuildSystem, DependencyCatalog, EffectiveBuild, ProjectDescriptor};
use crate::error::SprigResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprig_adapters::filesystem::LocalFilesystem` (production)
/// - `sprig_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SprigResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> SprigResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SprigResult<()>;
}

/// Port for rendering the effective build into a build descriptor.
///
/// One implementation per build system:
/// - `sprig_adapters::serializer::MavenPomSerializer` (`pom.xml`)
/// - `sprig_adapters::serializer::GradleSerializer` (`build.gradle`)
#[cfg_attr(test, mockall::automock)]
pub trait BuildSerializer: Send + Sync {
    /// The build system this serializer writes.
    fn build_system(&self) -> BuildSystem;

    /// Render the build descriptor text.
    fn serialize(&self, descriptor: &ProjectDescriptor, build: &EffectiveBuild)
    -> SprigResult<String>;
}

/// Port for obtaining a dependency catalog.
///
/// Implemented by:
/// - `sprig_adapters::catalog::BuiltinCatalog` (compiled in)
/// - `sprig_adapters::catalog::DirectoryCatalog` (TOML/JSON files on disk)
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin, used in errors and logs.
    fn describe(&self) -> String;

    /// Load the catalog.
    fn load(&self) -> SprigResult<DependencyCatalog>;
}
