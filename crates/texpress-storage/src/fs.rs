//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for looking up and reading template files on the
//! local filesystem.

use std::fs;
use std::path::{Component, Path};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Stateless: every call goes straight to `std::fs`, so edits on disk are
/// visible on the next request.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use texpress_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new();
/// let source = storage.read(Path::new("/srv/app/views/index.html.twig"))?;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate that a path doesn't walk up the directory tree.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal attacks (e.g., `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let has_parent_dir = path.components().any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        Self::validate_path(path).ok()?;
        let metadata = fs::metadata(path).ok()?;
        if metadata.is_dir() {
            Some(EntryKind::Dir)
        } else {
            Some(EntryKind::File)
        }
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        fs::read_to_string(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    fn list(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        Self::validate_path(path)?;
        let read_dir = fs::read_dir(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so linked template folders list as directories
            let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            entries.push(if is_dir {
                Entry::dir(name)
            } else {
                Entry::file(name)
            });
        }

        Ok(entries)
    }
}
