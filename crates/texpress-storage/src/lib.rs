//! Filesystem abstraction for the TExpress template browser.
//!
//! This crate provides a [`Storage`] trait covering the few filesystem
//! operations the browser needs: existence checks, directory listings and
//! reading small text files. This enables:
//!
//! - **Unit testing** of path resolution without touching the real filesystem
//! - **Clean separation** between resolution logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `entry_kind()`, `read()`, and `list()` methods
//! - [`FsStorage`] implementation backed by `std::fs`
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use texpress_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! if storage.is_dir(Path::new("src/AppBundle/Resources/views/static")) {
//!     for entry in storage.list(Path::new("src/AppBundle/Resources/views/static"))? {
//!         println!("{}", entry.name);
//!     }
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};
