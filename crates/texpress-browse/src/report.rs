//! Readable reports for template engine failures.

use std::path::{Path, PathBuf};

use serde::Serialize;
use texpress_storage::Storage;

use crate::excerpt::{escape_html, format_code_block};
use crate::lookup::highlight_language_for;
use crate::template_ref::locate_template_ref;

/// Lines of source shown around the failing line.
pub const ERROR_CONTEXT_LINES: usize = 5;

/// A failure reported by the template engine, stripped of engine types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateFailure {
    /// Error category (e.g., "`SyntaxError`").
    pub kind: String,
    /// Message without location details.
    pub message: String,
    /// Line of the failure in `template`, 1-based.
    pub line: Option<usize>,
    /// Reference of the template that failed, which may be an include of the
    /// template that was rendered.
    pub template: Option<String>,
}

/// Error page content for a [`TemplateFailure`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Page heading (the error kind).
    pub title: String,
    /// Document title (`Error: {file name}`).
    pub meta_title: String,
    /// HTML message with the location of the failure.
    pub message: String,
    /// System path of the failing template, when known.
    pub source_file_path: Option<PathBuf>,
    /// Bundle-relative name of the failing template.
    pub source_file_label: String,
    /// Highlighting language of the excerpt.
    pub highlight_language: Option<&'static str>,
    /// Formatted excerpt around the failing line.
    pub code: Option<Vec<String>>,
}

/// Describe a template failure for display.
///
/// The failing template reference is resolved against the bundle (see
/// [`locate_template_ref`]). When the file can be read, an excerpt around
/// the failing line is attached; otherwise the report only carries the
/// message and location.
pub fn describe_error<S: Storage + ?Sized>(
    failure: &TemplateFailure,
    bundle_name: &str,
    bundle_path: &Path,
    storage: &S,
) -> ErrorReport {
    let reference = failure.template.as_deref().unwrap_or_default();
    let location = locate_template_ref(reference, bundle_name, bundle_path);
    let file_name = location.label.rsplit('/').next().unwrap_or_default();

    let mut message = escape_html(&failure.message);
    if !reference.is_empty() {
        let label = escape_html(&location.label);
        match failure.line {
            Some(line) => message.push_str(&format!("<br>\nLine {line} of <code>{label}</code>")),
            None => message.push_str(&format!("<br>\nIn <code>{label}</code>")),
        }
    }

    let mut report = ErrorReport {
        title: failure.kind.clone(),
        meta_title: format!("Error: {file_name}"),
        message,
        source_file_path: None,
        source_file_label: location.label,
        highlight_language: None,
        code: None,
    };

    if reference.is_empty() || !storage.exists(&location.path) {
        return report;
    }

    match storage.read(&location.path) {
        Ok(code) => {
            let line = failure.line.unwrap_or(0);
            report.code = Some(format_code_block(&code, true, line, ERROR_CONTEXT_LINES));
            report.highlight_language = Some(highlight_language_for(reference));
        }
        Err(e) => {
            tracing::debug!(path = %location.path.display(), error = %e, "Template source not readable");
        }
    }
    report.source_file_path = Some(location.path);

    report
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use texpress_storage::MockStorage;

    use super::*;

    const BUNDLE: &str = "/srv/src/AppBundle";

    fn source() -> String {
        (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
    }

    fn failure(template: &str, line: Option<usize>) -> TemplateFailure {
        TemplateFailure {
            kind: "SyntaxError".to_owned(),
            message: "unexpected end of input, expected end of block".to_owned(),
            line,
            template: Some(template.to_owned()),
        }
    }

    #[test]
    fn test_report_with_excerpt() {
        let storage = MockStorage::new().with_file(
            format!("{BUNDLE}/Resources/views/static/page.html.twig"),
            source(),
        );
        let failure = failure("@AppBundle/Resources/views/static/page.html.twig", Some(10));

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &storage);

        assert_eq!(report.title, "SyntaxError");
        assert_eq!(report.meta_title, "Error: page.html.twig");
        assert_eq!(
            report.message,
            "unexpected end of input, expected end of block<br>\nLine 10 of \
             <code>@AppBundle/Resources/views/static/page.html.twig</code>"
        );
        assert_eq!(report.highlight_language, Some("xml"));
        assert_eq!(
            report.source_file_path,
            Some(PathBuf::from(format!(
                "{BUNDLE}/Resources/views/static/page.html.twig"
            )))
        );

        let code = report.code.unwrap();
        assert_eq!(code.len(), 11);
        assert_eq!(code[0], r#"<span data-num="5"></span>line 5"#);
        assert_eq!(code[5], r#"<span data-num="10"></span><mark>line 10</mark>"#);
        assert_eq!(code[10], r#"<span data-num="15"></span>line 15"#);
    }

    #[test]
    fn test_report_for_included_views_template() {
        let storage = MockStorage::new()
            .with_file(format!("{BUNDLE}/Resources/views/_menu.json.twig"), "{ }");
        let failure = failure("@App/_menu.json.twig", Some(1));

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &storage);

        assert_eq!(
            report.source_file_label,
            "@AppBundle/Resources/views/_menu.json.twig"
        );
        assert_eq!(report.highlight_language, Some("json"));
        assert_eq!(
            report.code,
            Some(vec![r#"<span data-num="1"></span><mark>{ }</mark>"#.to_owned()])
        );
    }

    #[test]
    fn test_report_for_system_path() {
        let path = format!("{BUNDLE}/Resources/views/static/a.twig");
        let storage = MockStorage::new().with_file(&path, "x");

        let report = describe_error(&failure(&path, Some(1)), "AppBundle", Path::new(BUNDLE), &storage);

        assert_eq!(
            report.source_file_label,
            "@AppBundle/Resources/views/static/a.twig"
        );
        assert!(report.code.is_some());
    }

    #[test]
    fn test_missing_file_omits_excerpt() {
        let storage = MockStorage::new();
        let failure = failure("@AppBundle/gone.twig", Some(3));

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &storage);

        assert!(report.code.is_none());
        assert!(report.highlight_language.is_none());
        assert!(report.source_file_path.is_none());
        assert!(report.message.contains("Line 3 of <code>@AppBundle/gone.twig</code>"));
    }

    #[test]
    fn test_unreadable_file_omits_excerpt() {
        let storage = MockStorage::new().with_unreadable_file(format!("{BUNDLE}/locked.twig"));
        let failure = failure("@AppBundle/locked.twig", Some(3));

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &storage);

        assert!(report.code.is_none());
        assert_eq!(
            report.source_file_path,
            Some(PathBuf::from(format!("{BUNDLE}/locked.twig")))
        );
    }

    #[test]
    fn test_failure_without_template() {
        let failure = TemplateFailure {
            kind: "UndefinedError".to_owned(),
            message: "value <x> is undefined".to_owned(),
            line: None,
            template: None,
        };

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &MockStorage::new());

        assert_eq!(report.message, "value &lt;x&gt; is undefined");
        assert_eq!(report.meta_title, "Error: ");
        assert!(report.code.is_none());
    }

    #[test]
    fn test_failure_without_line_shows_whole_file() {
        let storage = MockStorage::new().with_file(format!("{BUNDLE}/a.twig"), "one\ntwo");
        let failure = failure("@AppBundle/a.twig", None);

        let report = describe_error(&failure, "AppBundle", Path::new(BUNDLE), &storage);

        assert!(report.message.ends_with("In <code>@AppBundle/a.twig</code>"));
        assert_eq!(report.code.map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_serializes_camel_case() {
        let report = describe_error(
            &failure("@AppBundle/gone.twig", Some(1)),
            "AppBundle",
            Path::new(BUNDLE),
            &MockStorage::new(),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metaTitle"], "Error: gone.twig");
        assert_eq!(json["sourceFileLabel"], "@AppBundle/gone.twig");
        assert!(json["code"].is_null());
    }
}
