//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

#[derive(Debug)]
enum Node {
    Dir,
    /// File content, `None` for a file that exists but cannot be read.
    File(Option<String>),
}

/// Mock storage for testing.
///
/// Holds an in-memory tree. Adding a file or directory also adds all of its
/// ancestors as directories, so lookups behave like a real filesystem.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use texpress_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("/app/views/static/index.twig", "Hello")
///     .with_dir("/app/views/static/empty");
///
/// assert!(storage.is_dir(Path::new("/app/views/static")));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its ancestors).
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.nodes.insert(path, Node::Dir);
        self
    }

    /// Add a readable file with content (and its ancestor directories).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.nodes.insert(path, Node::File(Some(content.into())));
        self
    }

    /// Add a file that exists but fails to read.
    #[must_use]
    pub fn with_unreadable_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.nodes.insert(path, Node::File(None));
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

impl Storage for MockStorage {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        match self.nodes.get(path)? {
            Node::Dir => Some(EntryKind::Dir),
            Node::File(_) => Some(EntryKind::File),
        }
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        match self.nodes.get(path) {
            Some(Node::File(Some(content))) => Ok(content.clone()),
            Some(Node::File(None)) => Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND)),
            Some(Node::Dir) => Err(StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)),
            None => Err(StorageError::not_found(path).with_backend(BACKEND)),
        }
    }

    fn list(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        match self.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(StorageError::new(StorageErrorKind::NotADirectory)
                    .with_path(path)
                    .with_backend(BACKEND));
            }
            None => return Err(StorageError::not_found(path).with_backend(BACKEND)),
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_string_lossy().into_owned();
                Some(match node {
                    Node::Dir => Entry::dir(name),
                    Node::File(_) => Entry::file(name),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(!storage.exists(Path::new("/anything")));
    }

    #[test]
    fn test_with_file_adds_ancestors() {
        let storage = MockStorage::new().with_file("/app/views/static/a/page.twig", "x");

        assert!(storage.is_dir(Path::new("/app")));
        assert!(storage.is_dir(Path::new("/app/views/static/a")));
        assert_eq!(
            storage.entry_kind(Path::new("/app/views/static/a/page.twig")),
            Some(EntryKind::File)
        );
    }

    #[test]
    fn test_read() {
        let storage = MockStorage::new().with_file("/a/b.twig", "content");

        assert_eq!(storage.read(Path::new("/a/b.twig")).unwrap(), "content");
        assert_eq!(
            storage.read(Path::new("/a/missing")).unwrap_err().kind,
            StorageErrorKind::NotFound
        );
    }

    #[test]
    fn test_unreadable_file_exists_but_fails_to_read() {
        let storage = MockStorage::new().with_unreadable_file("/a/secret.twig");

        assert!(storage.exists(Path::new("/a/secret.twig")));
        assert_eq!(
            storage.read(Path::new("/a/secret.twig")).unwrap_err().kind,
            StorageErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_list_direct_children_only() {
        let storage = MockStorage::new()
            .with_file("/root/b.twig", "")
            .with_file("/root/sub/deep.twig", "")
            .with_dir("/root/empty");

        let entries = storage.list(Path::new("/root")).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::file("b.twig"),
                Entry::dir("empty"),
                Entry::dir("sub"),
            ]
        );
    }

    #[test]
    fn test_list_file_is_error() {
        let storage = MockStorage::new().with_file("/root/b.twig", "");

        assert_eq!(
            storage.list(Path::new("/root/b.twig")).unwrap_err().kind,
            StorageErrorKind::NotADirectory
        );
    }
}
