//! Directory listings.

use std::path::Path;

use serde::Serialize;
use texpress_storage::{Storage, StorageError};

use crate::path::TEMPLATE_SUFFIX;

/// One entry of a directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// File or folder name.
    pub name: String,
    /// Link target relative to the listed folder.
    pub url: String,
}

/// Sub-folders and templates of a folder, each sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    /// Sub-folders.
    pub directories: Vec<ListingEntry>,
    /// Template files; their url drops the `.twig` extension.
    pub files: Vec<ListingEntry>,
}

impl DirectoryListing {
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}

/// List a folder for browsing.
///
/// Hidden entries (leading `.`) and files that are not templates are skipped.
pub fn list_directory<S: Storage + ?Sized>(
    storage: &S,
    dir: &Path,
) -> Result<DirectoryListing, StorageError> {
    let mut entries = storage.list(dir)?;
    entries.retain(|entry| !entry.name.starts_with('.'));
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut listing = DirectoryListing::default();
    for entry in entries {
        if entry.is_dir() {
            listing.directories.push(ListingEntry {
                url: entry.name.clone(),
                name: entry.name,
            });
        } else if let Some(stem) = entry.name.strip_suffix(TEMPLATE_SUFFIX) {
            listing.files.push(ListingEntry {
                url: stem.to_owned(),
                name: entry.name,
            });
        }
    }

    Ok(listing)
}
