//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use sprig_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SprigError, SprigResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SprigResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SprigResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> SprigResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SprigError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_removes_a_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        let fs = LocalFilesystem::new();

        fs.create_dir_all(&root.join("src/main/java")).unwrap();
        fs.write_file(&root.join("src/main/java/App.java"), "class App {}")
            .unwrap();
        assert!(fs.exists(&root.join("src/main/java/App.java")));

        fs.remove_dir_all(&root).unwrap();
        assert!(!fs.exists(&root));
    }

    #[test]
    fn io_failures_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope/file.txt");
        let err = LocalFilesystem::new().write_file(&missing, "x").unwrap_err();
        match err {
            SprigError::Application(ApplicationError::FilesystemError { path, reason }) => {
                assert_eq!(path, missing);
                assert!(reason.starts_with("Failed to write file"));
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
