//! Request resolution for the TExpress template browser.
//!
//! Maps a URL fragment under a bundle's static-views folder to something to
//! show, and builds the pieces the HTML layer needs around it:
//!
//! - [`normalize`]: canonical form of a URL fragment
//! - [`Resolver`]: decides between redirect, template, directory listing,
//!   raw source and not found ([`Resolution`])
//! - [`BreadcrumbBuilder`]: navigation trail for a path
//! - [`list_directory`]: directory listing of templates and sub-folders
//! - [`describe_error`]: readable report for a template engine failure,
//!   with an excerpt of the faulty source ([`format_code_block`])
//! - [`media_type_for`] and [`highlight_language_for`]: lookup tables
//! - [`BundleRegistry`]: installed bundles and template name aliases
//!
//! All filesystem access goes through [`texpress_storage::Storage`].
//!
//! # Example
//!
//! ```ignore
//! use texpress_browse::{DocumentRoot, Resolution, Resolver};
//! use texpress_storage::FsStorage;
//!
//! let root = DocumentRoot::new("AppBundle", "/srv/app/src/AppBundle", "Resources/views/static");
//! let storage = FsStorage::new();
//! let resolver = Resolver::new(&storage, &root, "/app").debug(true);
//!
//! let request = resolver.request("docs/intro");
//! match resolver.resolve(&request) {
//!     Resolution::RenderTemplate(name) => { /* render "@AppBundle/.../docs/intro.twig" */ }
//!     Resolution::RedirectTo(url) => { /* 302 */ }
//!     _ => {}
//! }
//! ```

mod breadcrumbs;
mod bundles;
mod error;
mod excerpt;
mod listing;
mod lookup;
mod path;
mod report;
mod resolve;
mod template_ref;

pub use breadcrumbs::{Breadcrumb, BreadcrumbBuilder, build_breadcrumbs};
pub use bundles::{BundleRegistry, STATIC_VIEWS_ROOT, VIEWS_ROOT, discovery_slug};
pub use error::BrowseError;
pub use excerpt::{DEFAULT_CONTEXT_LINES, escape_html, format_code_block};
pub use listing::{DirectoryListing, ListingEntry, list_directory};
pub use lookup::{highlight_language_for, media_type_for};
pub use path::{TEMPLATE_EXTENSION, TEMPLATE_SUFFIX, canonical_path, extension, normalize};
pub use report::{ERROR_CONTEXT_LINES, ErrorReport, TemplateFailure, describe_error};
pub use resolve::{DocumentRoot, INDEX_TEMPLATES, ResolvedRequest, Resolution, Resolver};
pub use template_ref::{TemplateLocation, locate_template_ref};
