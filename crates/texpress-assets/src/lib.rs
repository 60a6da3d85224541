//! Built-in assets of the TExpress template browser.
//!
//! Assets are compiled into the binary via `rust-embed` (in debug builds
//! `rust-embed` reads them from `assets/` at runtime instead):
//!
//! - `layout.html.twig`, `dirindex.html.twig`, `rootindex.html.twig`: page
//!   templates, available to the template engine as `@TExpress/{name}`
//! - `texpress.css`: stylesheet served under `/_assets/`

use std::borrow::Cow;

#[derive(rust_embed::RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Template namespace of the built-in templates.
pub const NAMESPACE: &str = "@TExpress";

/// Extension of built-in templates.
const TEMPLATE_SUFFIX: &str = ".twig";

/// Get an asset by path (relative to `assets/`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Get a built-in template source by name.
///
/// Accepts both `layout.html.twig` and `@TExpress/layout.html.twig`.
pub fn template(name: &str) -> Option<String> {
    let name = name
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name);
    if !name.ends_with(TEMPLATE_SUFFIX) {
        return None;
    }
    let data = get(name)?;
    String::from_utf8(data.into_owned()).ok()
}

/// Return the MIME type string for the given file path.
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}
