//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sprig_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SprigResult,
};

/// In-memory filesystem. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }

    fn read(&self, path: &Path) -> SprigResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned(path))
    }

    fn write(&self, path: &Path) -> SprigResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned(path))
    }
}

fn poisoned(path: &Path) -> sprig_core::error::SprigError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "in-memory filesystem lock poisoned".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SprigResult<()> {
        let mut inner = self.write(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SprigResult<()> {
        let mut inner = self.write(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read(path)
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> SprigResult<()> {
        let mut inner = self.write(path)?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/a.txt"), "a").is_err());

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_file(Path::new("/out/a.txt"), "a").unwrap();
        assert_eq!(fs.read_file(Path::new("/out/a.txt")).as_deref(), Some("a"));
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("/out")).unwrap();
        assert!(other.exists(Path::new("/out")));
    }

    #[test]
    fn remove_dir_all_drops_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/demo/src")).unwrap();
        fs.write_file(Path::new("/out/demo/src/a.txt"), "a").unwrap();
        fs.remove_dir_all(Path::new("/out/demo")).unwrap();

        assert!(!fs.exists(Path::new("/out/demo/src")));
        assert!(fs.list_files().is_empty());
        assert!(fs.exists(Path::new("/out")));
    }
}
