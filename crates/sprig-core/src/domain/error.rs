// ============================================================================
// domain/error.rs - GENERATION ENGINE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so callers can report and keep them)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid version range '{input}': {reason}")]
    InvalidVersionRange { input: String, reason: String },

    #[error("Invalid repository: {0}")]
    InvalidRepository(String),

    #[error("Invalid dependency: {0}")]
    InvalidDependency(String),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Configuration Errors (the descriptor asks for something we cannot build)
    // ========================================================================
    #[error("Unknown facet '{facet}' for {descriptor}")]
    UnknownFacet { facet: String, descriptor: String },

    #[error(
        "Facet '{facet}' is ambiguous for {descriptor}: {} entries match equally",
        .candidates.len()
    )]
    AmbiguousFacet {
        facet: String,
        descriptor: String,
        candidates: Vec<String>,
    },

    #[error("No '{category}' contributor supports {descriptor}")]
    UnsupportedConfiguration { category: String, descriptor: String },

    // ========================================================================
    // Conflict Errors (409-level equivalent)
    // ========================================================================
    #[error(
        "Repository '{id}' registered with url '{existing_url}' by {existing_origin} \
         and with url '{incoming_url}' by {incoming_origin}"
    )]
    RepositoryConflict {
        id: String,
        existing_url: String,
        incoming_url: String,
        existing_origin: String,
        incoming_origin: String,
    },

    #[error(
        "Dependency '{identity}' declared as {existing} by {existing_origin} \
         and as {incoming} by {incoming_origin}"
    )]
    DependencyConflict {
        identity: String,
        existing: String,
        incoming: String,
        existing_origin: String,
        incoming_origin: String,
    },

    #[error(
        "Plugin '{identity}' declared as {existing} by {existing_origin} \
         and as {incoming} by {incoming_origin}"
    )]
    PluginConflict {
        identity: String,
        existing: String,
        incoming: String,
        existing_origin: String,
        incoming_origin: String,
    },

    #[error("File '{path}' written by both {existing} and {incoming}")]
    FileConflict {
        path: String,
        existing: String,
        incoming: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDescriptor(msg) => vec![
                "Check the project settings you supplied".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidVersion { input, .. } => vec![
                format!("'{}' is not a version", input),
                "Use MAJOR.MINOR.PATCH, optionally with a qualifier: 3.2.0, 2.7.0.RELEASE".into(),
            ],
            Self::UnknownFacet { facet, .. } => vec![
                format!("No catalog entry provides '{}' for this combination", facet),
                "Try: sprig facets to see what is available".into(),
                "The facet may require another language or platform version".into(),
            ],
            Self::AmbiguousFacet { candidates, .. } => vec![
                "The catalog has overlapping entries for this facet".into(),
                format!("Candidates: {}", candidates.join(", ")),
                "Narrow the entries' constraints so exactly one is most specific".into(),
            ],
            Self::UnsupportedConfiguration { category, .. } => vec![
                format!("Nothing can generate the '{}' part of this project", category),
                "Pick another language, build system or platform version".into(),
            ],
            Self::RepositoryConflict { id, .. } => vec![
                format!("Two sources disagree about the url of repository '{}'", id),
                "Give one of the repositories a distinct id".into(),
            ],
            Self::DependencyConflict { identity, .. } | Self::PluginConflict { identity, .. } => {
                vec![
                    format!("Two sources declare '{}' differently", identity),
                    "Align the declarations or declare one of them as an override".into(),
                ]
            }
            Self::FileConflict { path, .. } => vec![
                format!("Two contributors generate '{}'", path),
                "Tighten the activation condition of one of them".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDescriptor(_)
            | Self::InvalidVersion { .. }
            | Self::InvalidVersionRange { .. }
            | Self::InvalidRepository(_)
            | Self::InvalidDependency(_)
            | Self::InvalidPath { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownFacet { .. }
            | Self::AmbiguousFacet { .. }
            | Self::UnsupportedConfiguration { .. } => ErrorCategory::Configuration,
            Self::RepositoryConflict { .. }
            | Self::DependencyConflict { .. }
            | Self::PluginConflict { .. }
            | Self::FileConflict { .. } => ErrorCategory::Conflict,
            Self::InvalidCatalog(_) => ErrorCategory::Internal,
        }
    }

    /// Whether this is one of the conflict errors raised by merges.
    pub fn is_conflict(&self) -> bool {
        self.category() == ErrorCategory::Conflict
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Conflict,
    Internal,
}
