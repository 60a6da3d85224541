//! Media type and syntax highlighting lookup tables.

use crate::path::{TEMPLATE_SUFFIX, extension};

/// Media types for the inner extension of rendered templates.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("htm", "text/html"),
    ("html", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("svg", "image/svg+xml"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
];

const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// highlight.js language names by file extension.
const HIGHLIGHT_LANGUAGES: &[(&str, &str)] = &[
    ("xml", "xml"),
    ("html", "xml"),
    ("htm", "xml"),
    ("svg", "xml"),
    ("json", "json"),
    ("js", "javascript"),
    ("css", "css"),
    ("md", "markdown"),
    ("mdown", "markdown"),
    ("markdown", "markdown"),
];

const DEFAULT_HIGHLIGHT_LANGUAGE: &str = "xml";

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|&(_, v)| v)
}

/// Media type for a file extension (without dot), `text/plain` if unknown.
///
/// # Examples
///
/// ```
/// use texpress_browse::media_type_for;
///
/// assert_eq!(media_type_for("json"), "application/json");
/// assert_eq!(media_type_for("unknown"), "text/plain");
/// ```
pub fn media_type_for(extension: &str) -> &'static str {
    lookup(MEDIA_TYPES, extension).unwrap_or(DEFAULT_MEDIA_TYPE)
}

/// Highlighting language for a file name, `xml` if unknown.
///
/// A trailing `.twig` is ignored, so `page.json.twig` highlights as JSON.
///
/// # Examples
///
/// ```
/// use texpress_browse::highlight_language_for;
///
/// assert_eq!(highlight_language_for("foo.html.twig"), "xml");
/// assert_eq!(highlight_language_for("foo.md"), "markdown");
/// ```
pub fn highlight_language_for(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    let name = lower.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&lower);
    extension(name)
        .and_then(|ext| lookup(HIGHLIGHT_LANGUAGES, ext))
        .unwrap_or(DEFAULT_HIGHLIGHT_LANGUAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known() {
        assert_eq!(media_type_for("htm"), "text/html");
        assert_eq!(media_type_for("html"), "text/html");
        assert_eq!(media_type_for("css"), "text/css");
        assert_eq!(media_type_for("js"), "text/javascript");
        assert_eq!(media_type_for("json"), "application/json");
        assert_eq!(media_type_for("svg"), "image/svg+xml");
        assert_eq!(media_type_for("xml"), "application/xml");
    }

    #[test]
    fn test_media_type_for_is_case_insensitive() {
        assert_eq!(media_type_for("JSON"), "application/json");
    }

    #[test]
    fn test_media_type_for_unknown() {
        assert_eq!(media_type_for("unknown"), "text/plain");
        assert_eq!(media_type_for(""), "text/plain");
    }

    #[test]
    fn test_highlight_language_for() {
        assert_eq!(highlight_language_for("foo.html.twig"), "xml");
        assert_eq!(highlight_language_for("foo.htm"), "xml");
        assert_eq!(highlight_language_for("data.json.twig"), "json");
        assert_eq!(highlight_language_for("app.js.twig"), "javascript");
        assert_eq!(highlight_language_for("site.css"), "css");
        assert_eq!(highlight_language_for("foo.md"), "markdown");
        assert_eq!(highlight_language_for("README.MDOWN"), "markdown");
        assert_eq!(highlight_language_for("notes.markdown.twig"), "markdown");
    }

    #[test]
    fn test_highlight_language_for_defaults_to_xml() {
        assert_eq!(highlight_language_for("page.twig"), "xml");
        assert_eq!(highlight_language_for("Makefile"), "xml");
        assert_eq!(highlight_language_for("/srv/app/views/a.rs.twig"), "xml");
    }
}
