//! Filesystem-based catalog loader.
//!
//! Reads every `*.toml` and `*.json` file under a directory (recursively, in
//! path order) and merges their facets into one [`DependencyCatalog`].
//!
//! # File format
//!
//! ```toml
//! [[facet]]
//! id    = "kafka"
//! name  = "Spring for Apache Kafka"
//! group = "Messaging"
//!
//! [[facet.entry]]
//! condition    = { platform = "[3.0.0,4.0.0)" }
//! dependencies = [{ group_id = "org.springframework.kafka", artifact_id = "spring-kafka" }]
//!
//! [[facet.entry.repositories]]
//! id   = "spring-milestones"
//! name = "Spring Milestones"
//! url  = "https://repo.spring.io/milestone"
//! ```
//!
//! JSON files use the same shape: `{ "facets": [ ... ] }`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use sprig_core::{
    application::{ApplicationError, ports::CatalogSource},
    domain::{DependencyCatalog, DomainError, FacetDefinition},
    error::SprigResult,
};

/// Deserialised form of one catalog file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default, alias = "facet")]
    pub facets: Vec<FacetDefinition>,
}

/// A catalog file that could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid catalog in '{path}': {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

impl CatalogFileError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}

impl From<CatalogFileError> for sprig_core::error::SprigError {
    fn from(e: CatalogFileError) -> Self {
        ApplicationError::CatalogLoad {
            source_name: e.path().display().to_string(),
            reason: e.to_string(),
        }
        .into()
    }
}

/// [`CatalogSource`] reading catalog files from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Catalog files under the directory, sorted by path.
    fn catalog_files(&self) -> SprigResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::CatalogLoad {
                source_name: self.dir.display().to_string(),
                reason: format!("directory walk error: {e}"),
            })?;
            if entry.file_type().is_file() && is_catalog_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

impl CatalogSource for DirectoryCatalog {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load(&self) -> SprigResult<DependencyCatalog> {
        if !self.dir.is_dir() {
            return Err(ApplicationError::CatalogLoad {
                source_name: self.dir.display().to_string(),
                reason: "catalog directory not found".into(),
            }
            .into());
        }

        let mut catalog = DependencyCatalog::new();
        for path in self.catalog_files()? {
            let file = read_catalog_file(&path)?;
            debug!(path = %path.display(), facets = file.facets.len(), "Catalog file read");
            for facet in file.facets {
                catalog
                    .insert(facet)
                    .map_err(|source| CatalogFileError::Invalid {
                        path: path.clone(),
                        source,
                    })?;
            }
        }
        Ok(catalog)
    }
}

fn is_catalog_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("toml") | Some("json")
    )
}

/// Parse and validate a single catalog file.
pub fn read_catalog_file(path: &Path) -> Result<CatalogFile, CatalogFileError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: CatalogFile = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw).map_err(|e| e.to_string()),
        _ => toml::from_str(&raw).map_err(|e| e.to_string()),
    }
    .map_err(|message| CatalogFileError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    for facet in &file.facets {
        facet.validate().map_err(|source| CatalogFileError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{
        domain::{DependencyScope, Language, LanguageId, PlatformVersion, ProjectDescriptor},
        error::SprigError,
    };

    const KAFKA: &str = r#"
[[facet]]
id = "kafka"
name = "Spring for Apache Kafka"
group = "Messaging"

[[facet.entry]]
condition = { platform = "[3.0.0,4.0.0)" }
dependencies = [{ group_id = "org.springframework.kafka", artifact_id = "spring-kafka" }]

[[facet.entry.repositories]]
id = "spring-milestones"
name = "Spring Milestones"
url = "https://repo.spring.io/milestone"

[[facet.entry]]
id = "legacy"
condition = { platform = "[2.0.0,3.0.0)" }
dependencies = [{ group_id = "org.springframework.kafka", artifact_id = "spring-kafka", version = "2.9.13" }]
"#;

    const TESTCONTAINERS: &str = r#"{
  "facets": [
    {
      "id": "testcontainers",
      "entries": [
        {
          "dependencies": [
            { "group_id": "org.testcontainers", "artifact_id": "junit-jupiter", "scope": "test-compile" }
          ]
        }
      ]
    }
  ]
}"#;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_toml_and_json_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "kafka.toml", KAFKA);
        write(dir.path(), "nested/testing.json", TESTCONTAINERS);
        write(dir.path(), "README.md", "ignored");

        let catalog = DirectoryCatalog::new(dir.path()).load().unwrap();
        assert_eq!(catalog.len(), 2);

        let kafka = catalog.get("kafka").unwrap();
        assert_eq!(kafka.entries.len(), 2);
        assert_eq!(kafka.entries[0].repositories[0].id(), "spring-milestones");
        assert_eq!(kafka.entry_label(1), "legacy");

        let descriptor = ProjectDescriptor::builder()
            .language(Language::of(LanguageId::Java))
            .platform_version(PlatformVersion::new(2, 7, 0))
            .build()
            .unwrap();
        let valid: Vec<usize> = kafka.valid_entries(&descriptor).map(|(i, _)| i).collect();
        assert_eq!(valid, [1]);

        let junit = &catalog.get("testcontainers").unwrap().entries[0].dependencies[0];
        assert_eq!(junit.scope(), DependencyScope::TestCompile);
    }

    #[test]
    fn malformed_files_are_reported_with_their_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.toml", "[[facet]]\nid = ");

        let err = DirectoryCatalog::new(dir.path()).load().unwrap_err();
        match err {
            SprigError::Application(ApplicationError::CatalogLoad { source_name, .. }) => {
                assert!(source_name.ends_with("broken.toml"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn facets_without_entries_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty.json", r#"{ "facets": [ { "id": "x", "entries": [] } ] }"#);

        let err = read_catalog_file(&dir.path().join("empty.json")).unwrap_err();
        assert!(matches!(err, CatalogFileError::Invalid { .. }));
    }

    #[test]
    fn duplicate_facets_across_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.toml", KAFKA);
        write(dir.path(), "b.toml", KAFKA);

        let err = DirectoryCatalog::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("b.toml"));
    }

    #[test]
    fn missing_directory_is_a_load_error() {
        let err = DirectoryCatalog::new("/definitely/not/here").load().unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::CatalogLoad { .. })
        ));
    }
}
