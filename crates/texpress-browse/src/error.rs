//! Browse error types.

use texpress_storage::StorageError;

/// Error returned by bundle lookups and listings.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// A configured bundle is not installed.
    #[error(
        "Unknown bundle '{0}'. Make sure this bundle is installed and your static site configuration is correct."
    )]
    UnknownBundle(String),
    /// Filesystem access failed.
    #[error("{0}")]
    Storage(#[from] StorageError),
}
