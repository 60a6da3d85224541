//! Static site browsing.
//!
//! Resolves `/{slug}/{path}` against the site's document root and acts on the
//! [`Resolution`]: redirect, render a template, list a folder, show a
//! template's source, or a not-found page.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use minijinja::context;
use texpress_browse::{
    Breadcrumb, BreadcrumbBuilder, DEFAULT_CONTEXT_LINES, DocumentRoot, ResolvedRequest,
    Resolution, Resolver, TEMPLATE_SUFFIX, canonical_path, describe_error, escape_html,
    format_code_block, highlight_language_for, list_directory,
};

use crate::error::ServerError;
use crate::handlers::pages::render_page;
use crate::handlers::{encode_path, found, root_url_with_hint};
use crate::state::AppState;
use crate::templates::{self, DIR_INDEX, LAYOUT};

/// Handle GET /{slug}.
pub(crate) async fn redirect_to_site(Path(slug): Path<String>) -> Response {
    found(&encode_path(&format!("/{slug}/")))
}

/// Handle GET /{slug}/.
pub(crate) async fn find_site_root(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    find_impl(&state, &slug, "")
}

/// Handle GET /{slug}/{path}.
pub(crate) async fn find(
    Path((slug, path)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    find_impl(&state, &slug, &path)
}

fn find_impl(state: &AppState, slug: &str, raw_path: &str) -> Result<Response, ServerError> {
    // Messy spellings are settled before the slug is looked up
    let canonical = canonical_path(raw_path);
    if canonical != raw_path {
        return Ok(found(&encode_path(&format!("/{slug}/{canonical}"))));
    }

    let Some(site) = state.site(slug) else {
        tracing::warn!(slug = %slug, "Unknown static site");
        return Ok(found(&root_url_with_hint(slug)));
    };

    let bundle_path = state.bundles.locate(&site.bundle)?;
    let root = DocumentRoot::new(site.bundle.as_str(), bundle_path, &site.root);
    let base_url = format!("/{slug}");

    let resolver = Resolver::new(state.storage.as_ref(), &root, &base_url).debug(state.debug);
    let request = resolver.request(raw_path);
    let resolution = resolver.resolve(&request);
    tracing::debug!(slug = %slug, path = %raw_path, ?resolution, "Resolved request");

    let page = SitePage {
        state,
        root: &root,
        base_url: &base_url,
        request: &request,
    };
    match resolution {
        Resolution::RedirectTo(url) => Ok(found(&encode_path(&url))),
        Resolution::RenderTemplate(name) => page.render_template(&name),
        Resolution::ShowDirectory(dir) => page.show_directory(&dir),
        Resolution::ShowSource(file) => page.show_source(&file),
        Resolution::NotFound => page.not_found(),
    }
}

/// A page of one static site.
struct SitePage<'a> {
    state: &'a AppState,
    root: &'a DocumentRoot,
    base_url: &'a str,
    request: &'a ResolvedRequest,
}

impl SitePage<'_> {
    fn breadcrumbs(&self, path: &str) -> Vec<Breadcrumb> {
        BreadcrumbBuilder::new(self.base_url, self.root.bundle_name())
            .requested_path(&self.request.clean_path)
            .build(path)
    }

    fn render_template(&self, name: &str) -> Result<Response, ServerError> {
        // Breadcrumbs are always passed, in case the template uses the built-in layout
        let alias = self.root.alias();
        let path = name
            .strip_prefix(alias.as_str())
            .unwrap_or(name)
            .trim_start_matches('/');
        let breadcrumbs = self.breadcrumbs(path);

        let env = self.state.environment();
        match templates::render(&env, name, context! { breadcrumbs => &breadcrumbs }) {
            Ok(body) => Ok(templates::with_content_type(&templates::content_type(name), body)),
            Err(err) if self.state.debug => {
                tracing::error!(template = %name, error = %err, "Template rendering failed");
                let report = describe_error(
                    &templates::failure_from(&err),
                    self.root.bundle_name(),
                    self.root.bundle_path(),
                    self.state.storage.as_ref(),
                );
                let ctx = context! {
                    breadcrumbs => breadcrumbs,
                    ..minijinja::Value::from_serialize(&report)
                };
                render_page(self.state, LAYOUT, ctx, StatusCode::INTERNAL_SERVER_ERROR)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn show_directory(&self, dir: &FsPath) -> Result<Response, ServerError> {
        let listing = list_directory(self.state.storage.as_ref(), dir)?;
        let clean = &self.request.clean_path;

        let ctx = context! {
            breadcrumbs => self.breadcrumbs(clean),
            metaTitle => format!("{}/{clean}", self.root.bundle_name()),
            empty => listing.is_empty(),
            listing => listing,
            navBorder => false,
        };
        render_page(self.state, DIR_INDEX, ctx, StatusCode::OK)
    }

    fn show_source(&self, file: &FsPath) -> Result<Response, ServerError> {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let code = match self.state.storage.read(file) {
            Ok(source) => Some(format_code_block(&source, true, 0, DEFAULT_CONTEXT_LINES)),
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "Template source not readable");
                None
            }
        };

        let ctx = context! {
            breadcrumbs => self.breadcrumbs(&self.request.clean_path),
            metaTitle => format!("Source: {file_name}"),
            code => code,
            highlightLanguage => highlight_language_for(&file_name),
            navBorder => false,
        };
        render_page(self.state, LAYOUT, ctx, StatusCode::OK)
    }

    fn not_found(&self) -> Result<Response, ServerError> {
        let clean = &self.request.clean_path;
        let canonical = self.request.canonical_path();
        let missing = if canonical.is_empty()
            || canonical.ends_with('/')
            || canonical.ends_with(TEMPLATE_SUFFIX)
        {
            canonical
        } else {
            format!("{canonical}{TEMPLATE_SUFFIX}")
        };
        let message = format!(
            "<p>Could not find: <code class=\"error\">{}</code><br>\nIn: <code>{}</code></p>",
            escape_html(&missing),
            escape_html(&self.root.alias()),
        );

        let ctx = context! {
            breadcrumbs => self.breadcrumbs(clean),
            metaTitle => format!("Not found: {clean}"),
            title => "File does not exist",
            message => message,
        };
        render_page(self.state, LAYOUT, ctx, StatusCode::NOT_FOUND)
    }
}
