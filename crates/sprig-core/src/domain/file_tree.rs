use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{error::DomainError, path::RelativePath};

/// A file produced by a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub content: String,
    /// Name of the contributor that wrote the file.
    pub contributor: String,
}

/// Virtual output of a generation, keyed by relative path.
///
/// Iteration order is the path order, so two trees with the same files
/// always list them identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTree {
    files: BTreeMap<RelativePath, GeneratedFile>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. A second write to the same path is a `FileConflict`.
    pub fn insert(
        &mut self,
        path: RelativePath,
        content: impl Into<String>,
        contributor: &str,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.files.get(&path) {
            return Err(DomainError::FileConflict {
                path: path.to_string(),
                existing: existing.contributor.clone(),
                incoming: contributor.to_string(),
            });
        }
        self.files.insert(
            path,
            GeneratedFile {
                content: content.into(),
                contributor: contributor.to_string(),
            },
        );
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        let path = RelativePath::try_new(path).ok()?;
        self.files.get(&path)
    }

    /// Content of the file at `path`, if present.
    pub fn content(&self, path: &str) -> Option<&str> {
        self.get(path).map(|f| f.content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &GeneratedFile)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for FileTree {
    type Item = (RelativePath, GeneratedFile);
    type IntoIter = std::collections::btree_map::IntoIter<RelativePath, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn second_write_conflicts() {
        let mut tree = FileTree::new();
        tree.insert(path("pom.xml"), "<project/>", "maven").unwrap();
        let err = tree.insert(path("pom.xml"), "", "other").unwrap_err();
        assert_eq!(
            err,
            DomainError::FileConflict {
                path: "pom.xml".into(),
                existing: "maven".into(),
                incoming: "other".into(),
            }
        );
        assert_eq!(tree.content("pom.xml"), Some("<project/>"));
    }

    #[test]
    fn paths_are_sorted() {
        let mut tree = FileTree::new();
        tree.insert(path("src/main/A.java"), "", "a").unwrap();
        tree.insert(path(".gitignore"), "", "b").unwrap();
        tree.insert(path("pom.xml"), "", "c").unwrap();
        let paths: Vec<&str> = tree.paths().map(RelativePath::as_str).collect();
        assert_eq!(paths, [".gitignore", "pom.xml", "src/main/A.java"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut tree = FileTree::new();
        tree.insert(path("README.md"), "x", "a").unwrap();
        assert!(tree.contains("README.md"));
        assert!(!tree.contains("readme.md"));
    }
}
