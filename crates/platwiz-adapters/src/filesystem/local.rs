//! Local filesystem adapter using std::fs and walkdir.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use platwiz_core::{application::ports::Filesystem, domain::DirectoryCleanupResult};

/// Production filesystem implementation.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
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
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn safe_delete_dir(&self, path: &Path) -> DirectoryCleanupResult {
        match fs::symlink_metadata(path) {
            Err(e) => return classify(path, &e),
            Ok(meta) if !meta.is_dir() => {
                return match fs::remove_file(path) {
                    Ok(()) => DirectoryCleanupResult::Succeeded,
                    Err(e) => classify(path, &e),
                };
            }
            Ok(_) => {}
        }

        // ── Children before parents, so every remove_dir sees an empty dir ──
        let mut removed = 0usize;
        for walk_entry in WalkDir::new(path).contents_first(true) {
            let walk_entry = match walk_entry {
                Ok(entry) => entry,
                Err(e) => {
                    let at = e.path().unwrap_or(path).to_path_buf();
                    match e.into_io_error() {
                        Some(io_err) if io_err.kind() == io::ErrorKind::NotFound => continue,
                        Some(io_err) => return classify(&at, &io_err),
                        None => {
                            warn!(path = %at.display(), "Filesystem loop while deleting");
                            return DirectoryCleanupResult::Failed;
                        }
                    }
                }
            };

            let entry_path = walk_entry.path();
            let result = if walk_entry.file_type().is_dir() {
                fs::remove_dir(entry_path)
            } else {
                fs::remove_file(entry_path)
            };

            match result {
                Ok(()) => removed += 1,
                // Raced with something else deleting it
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(removed, "Directory partially deleted");
                    return classify(entry_path, &e);
                }
            }
        }

        debug!(path = %path.display(), removed, "Directory deleted");
        DirectoryCleanupResult::Succeeded
    }
}

/// Map an I/O failure onto a cleanup result.
fn classify(path: &Path, e: &io::Error) -> DirectoryCleanupResult {
    let result = match e.kind() {
        io::ErrorKind::NotFound => DirectoryCleanupResult::NotFound,
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            DirectoryCleanupResult::AccessDenied
        }
        io::ErrorKind::ResourceBusy => DirectoryCleanupResult::InUse,
        _ if is_sharing_violation(e) => DirectoryCleanupResult::InUse,
        _ => DirectoryCleanupResult::Failed,
    };

    if result != DirectoryCleanupResult::NotFound {
        warn!(path = %path.display(), error = %e, result = %result, "Delete failed");
    }
    result
}

/// ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
#[cfg(windows)]
fn is_sharing_violation(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(32 | 33))
}

#[cfg(not(windows))]
fn is_sharing_violation(_e: &io::Error) -> bool {
    false
}
