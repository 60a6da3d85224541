//! Path resolution.
//!
//! Decides what a request path under a document root points at. The outcome
//! is a [`Resolution`]; acting on it (redirecting, rendering, listing) is left
//! to the caller.

use std::path::{Path, PathBuf};

use texpress_storage::Storage;

use crate::path::{
    TEMPLATE_EXTENSION, TEMPLATE_SUFFIX, canonical_path, extension, join, normalize,
};

/// Default documents looked up in a directory, in order.
pub const INDEX_TEMPLATES: [&str; 2] = ["index.html.twig", "index.twig"];

/// Browsable folder inside a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRoot {
    bundle_name: String,
    bundle_path: PathBuf,
    /// Normalized subpath relative to the bundle root.
    root: String,
}

impl DocumentRoot {
    /// Create a document root.
    ///
    /// # Arguments
    ///
    /// * `bundle_name` - Bundle name (e.g., "AppBundle")
    /// * `bundle_path` - System path of the bundle root
    /// * `root` - Subpath of the document root inside the bundle
    ///   (e.g., "Resources/views/static"); normalized here
    pub fn new(
        bundle_name: impl Into<String>,
        bundle_path: impl Into<PathBuf>,
        root: &str,
    ) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            bundle_path: bundle_path.into(),
            root: normalize(root),
        }
    }

    /// Bundle name.
    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// System path of the bundle root.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Template name prefix of the document root (e.g. `@AppBundle/Resources/views/static`).
    pub fn alias(&self) -> String {
        if self.root.is_empty() {
            format!("@{}", self.bundle_name)
        } else {
            format!("@{}/{}", self.bundle_name, self.root)
        }
    }

    /// System path of the document root.
    pub fn path(&self) -> PathBuf {
        if self.root.is_empty() {
            self.bundle_path.clone()
        } else {
            self.bundle_path.join(&self.root)
        }
    }

    /// System path of a normalized fragment inside the document root.
    pub fn system_path(&self, clean_path: &str) -> PathBuf {
        let root = self.path();
        if clean_path.is_empty() {
            root
        } else {
            root.join(clean_path)
        }
    }

    /// Template name of a normalized fragment inside the document root.
    pub fn template_ref(&self, clean_path: &str) -> String {
        format!("{}/{clean_path}", self.alias())
    }
}

/// A request path, normalized and annotated for one document root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Path as received, relative to the site base URL.
    pub raw_path: String,
    /// Normalized path.
    pub clean_path: String,
    /// Extension of the normalized path, if any.
    pub extension: Option<String>,
    /// Whether the raw template source was asked for (explicit `.twig`).
    pub is_source_view: bool,
    /// Whether the raw path ends with `/` (the empty path counts as one).
    pub has_trailing_slash: bool,
    /// Bundle name.
    pub bundle_name: String,
    /// Template name prefix of the document root.
    pub document_root_alias: String,
    /// System path of the document root.
    pub document_root_path: PathBuf,
}

impl ResolvedRequest {
    /// Annotate a raw request path for a document root.
    pub fn new(raw_path: &str, root: &DocumentRoot) -> Self {
        let clean_path = normalize(raw_path);
        let extension = extension(&clean_path).map(str::to_owned);
        let is_source_view = extension.as_deref() == Some(TEMPLATE_EXTENSION);

        Self {
            raw_path: raw_path.to_owned(),
            has_trailing_slash: raw_path.is_empty() || raw_path.ends_with('/'),
            clean_path,
            extension,
            is_source_view,
            bundle_name: root.bundle_name().to_owned(),
            document_root_alias: root.alias(),
            document_root_path: root.path(),
        }
    }

    /// Canonical spelling of the request path (see [`canonical_path`]).
    pub fn canonical_path(&self) -> String {
        canonical_path(&self.raw_path)
    }

    /// Whether the raw path is already in canonical form.
    pub fn is_canonical(&self) -> bool {
        self.raw_path == self.canonical_path()
    }
}

/// Outcome of resolving a request path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Send the client elsewhere (absolute URL path).
    RedirectTo(String),
    /// Render a template by name (e.g., `@AppBundle/Resources/views/static/page.html.twig`).
    RenderTemplate(String),
    /// List the contents of a directory (system path).
    ShowDirectory(PathBuf),
    /// Show the raw source of a template (system path).
    ShowSource(PathBuf),
    /// Nothing matches.
    NotFound,
}

/// Resolves request paths against one document root.
pub struct Resolver<'a, S: Storage + ?Sized> {
    storage: &'a S,
    root: &'a DocumentRoot,
    base_url: &'a str,
    debug: bool,
}

impl<'a, S: Storage + ?Sized> Resolver<'a, S> {
    /// Create a resolver.
    ///
    /// `base_url` is the URL of the document root without trailing slash
    /// (e.g., "/app"). Debug mode is off by default.
    pub fn new(storage: &'a S, root: &'a DocumentRoot, base_url: &'a str) -> Self {
        Self {
            storage,
            root,
            base_url: base_url.trim_end_matches('/'),
            debug: false,
        }
    }

    /// Enable or disable debug mode (raw source views).
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Annotate a raw request path for this resolver's document root.
    pub fn request(&self, raw_path: &str) -> ResolvedRequest {
        ResolvedRequest::new(raw_path, self.root)
    }

    /// Resolve a request. First match wins:
    ///
    /// 1. non-canonical spelling → redirect to the canonical one
    /// 2. explicit `.twig` outside debug mode → redirect without it
    /// 3. directory → trailing-slash redirect, index template, or listing
    /// 4. template file → slash-less redirect, raw source, or rendered template
    /// 5. not found
    pub fn resolve(&self, request: &ResolvedRequest) -> Resolution {
        let clean = request.clean_path.as_str();

        if !request.is_canonical() {
            return Resolution::RedirectTo(self.url(&request.canonical_path()));
        }

        if !self.debug
            && let Some(stripped) = clean.strip_suffix(TEMPLATE_SUFFIX)
        {
            return Resolution::RedirectTo(self.url(stripped));
        }

        let base_path = self.root.system_path(clean);

        if request.extension.is_none() && self.storage.is_dir(&base_path) {
            if !request.has_trailing_slash {
                return Resolution::RedirectTo(self.url(&format!("{clean}/")));
            }
            for index in INDEX_TEMPLATES {
                if self.storage.exists(&base_path.join(index)) {
                    return Resolution::RenderTemplate(self.root.template_ref(&join(clean, index)));
                }
            }
            return Resolution::ShowDirectory(base_path);
        }

        if clean.is_empty() {
            return Resolution::NotFound;
        }

        let file_path = if request.is_source_view {
            base_path
        } else {
            let mut with_suffix = base_path.into_os_string();
            with_suffix.push(TEMPLATE_SUFFIX);
            PathBuf::from(with_suffix)
        };

        if self.storage.exists(&file_path) {
            if request.has_trailing_slash {
                return Resolution::RedirectTo(self.url(clean));
            }
            if request.is_source_view {
                return Resolution::ShowSource(file_path);
            }
            return Resolution::RenderTemplate(
                self.root.template_ref(&format!("{clean}{TEMPLATE_SUFFIX}")),
            );
        }

        Resolution::NotFound
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}
