//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business rules.
//! Business rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::BuildSystem;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A post-processor removed a dependency it did not add.
    #[error("Post-processor '{processor}' removed '{dependency}', which it did not add")]
    PostProcessorViolation {
        processor: String,
        dependency: String,
    },

    /// A contributor reported a failure of its own.
    #[error("Contributor '{contributor}' failed: {reason}")]
    ContributorFailed { contributor: String, reason: String },

    /// No serializer is registered for the descriptor's build system.
    #[error("No serializer registered for {build_system}")]
    SerializerMissing { build_system: BuildSystem },

    /// A serializer could not render the build.
    #[error("Failed to render the {build_system} build: {reason}")]
    SerializationFailed {
        build_system: BuildSystem,
        reason: String,
    },

    /// A catalog source could not be read.
    #[error("Failed to load catalog from {source_name}: {reason}")]
    CatalogLoad { source_name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PostProcessorViolation { processor, .. } => vec![
                format!("'{}' breaks the post-processing contract", processor),
                "A post-processor may only remove dependencies it added itself".into(),
            ],
            Self::ContributorFailed { contributor, .. } => vec![
                format!("Contributor '{}' could not produce its output", contributor),
                "Run with -vv to see which step failed".into(),
            ],
            Self::SerializerMissing { build_system } => vec![
                format!("{} builds cannot be written yet", build_system),
                "Try: --build maven or --build gradle".into(),
            ],
            Self::CatalogLoad { source_name, .. } => vec![
                format!("Check the catalog files under {}", source_name),
                "Catalog files must be valid TOML or JSON".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or output directory".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PostProcessorViolation { .. }
            | Self::ContributorFailed { .. }
            | Self::SerializationFailed { .. }
            | Self::FilesystemError { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::SerializerMissing { .. } | Self::CatalogLoad { .. } => {
                ErrorCategory::Configuration
            }
            Self::ValidationFailed(_) | Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
