//! URL fragment normalization and extension helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Extension of template source files.
pub const TEMPLATE_EXTENSION: &str = "twig";

/// Template source extension with its leading dot.
pub const TEMPLATE_SUFFIX: &str = ".twig";

static SLASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/{2,}").expect("valid regex"));
static DOT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid regex"));
static EDGE_SLASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/|/$").expect("valid regex"));

/// Normalize a URL fragment.
///
/// Collapses runs of `/` and runs of `.` (so `..` can never climb out of the
/// document root), then strips one leading and one trailing `/`.
///
/// # Examples
///
/// ```
/// use texpress_browse::normalize;
///
/// assert_eq!(normalize("/a//b/"), "a/b");
/// assert_eq!(normalize("a/../b"), "a/./b");
/// assert_eq!(normalize(normalize("//x//").as_str()), normalize("//x//"));
/// ```
pub fn normalize(path: &str) -> String {
    let path = SLASH_RUNS.replace_all(path, "/");
    let path = DOT_RUNS.replace_all(&path, ".");
    EDGE_SLASHES.replace_all(&path, "").into_owned()
}

/// Canonical spelling of a raw request path.
///
/// The normalized path, keeping a single trailing slash when the raw path
/// had one: the slash distinguishes folder URLs from file URLs. The empty
/// path stays empty.
///
/// # Examples
///
/// ```
/// use texpress_browse::canonical_path;
///
/// assert_eq!(canonical_path("docs//intro"), "docs/intro");
/// assert_eq!(canonical_path("/docs//"), "docs/");
/// assert_eq!(canonical_path("/"), "");
/// ```
pub fn canonical_path(raw_path: &str) -> String {
    let clean = normalize(raw_path);
    if !clean.is_empty() && (raw_path.is_empty() || raw_path.ends_with('/')) {
        format!("{clean}/")
    } else {
        clean
    }
}

/// Extension of the last segment of a slash-delimited path.
///
/// Returns `None` when the last segment has no dot or ends with one, so that
/// "no extension" never compares equal to an empty extension.
///
/// # Examples
///
/// ```
/// use texpress_browse::extension;
///
/// assert_eq!(extension("docs/page.html.twig"), Some("twig"));
/// assert_eq!(extension("docs.d/readme"), None);
/// ```
pub fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Join two slash-delimited fragments, skipping an empty head.
pub(crate) fn join(head: &str, tail: &str) -> String {
    if head.is_empty() {
        tail.to_owned()
    } else {
        format!("{head}/{tail}")
    }
}
