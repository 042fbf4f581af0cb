//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use platwiz_core::{application::ports::Filesystem, domain::DirectoryCleanupResult};

/// In-memory filesystem for testing.
///
/// Clones share the same tree. Individual paths can be made to fail
/// deletion with a chosen result via [`MemoryFilesystem::deny`].
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    entries: BTreeSet<PathBuf>,
    denied: HashMap<PathBuf, DirectoryCleanupResult>,
    deletions: Vec<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add `path` and all of its ancestors.
    pub fn add(&self, path: impl AsRef<Path>) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let mut current = PathBuf::new();
        for component in path.as_ref().components() {
            current.push(component);
            inner.entries.insert(current.clone());
        }
    }

    /// Make deletion of `path` fail with `result`.
    pub fn deny(&self, path: impl AsRef<Path>, result: DirectoryCleanupResult) {
        if let Ok(mut inner) = self.inner.write() {
            inner.denied.insert(path.as_ref().to_path_buf(), result);
        }
    }

    /// Roots passed to successful deletes, in order (testing helper).
    pub fn deletions(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.deletions.clone())
            .unwrap_or_default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.entries.contains(path))
            .unwrap_or(false)
    }

    fn safe_delete_dir(&self, path: &Path) -> DirectoryCleanupResult {
        let Ok(mut inner) = self.inner.write() else {
            return DirectoryCleanupResult::Failed;
        };

        if let Some(result) = inner.denied.get(path) {
            return *result;
        }
        if !inner.entries.contains(path) {
            return DirectoryCleanupResult::NotFound;
        }

        inner.entries.retain(|entry| !entry.starts_with(path));
        inner.deletions.push(path.to_path_buf());
        DirectoryCleanupResult::Succeeded
    }
}
