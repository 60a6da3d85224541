//! Template environment.
//!
//! Template names resolve as:
//! - `@TExpress/{name}`: built-in templates from `texpress-assets`
//! - `@{Bundle}/…` and `@{Short}/…`: files of installed bundles, read
//!   through [`Storage`]

use std::sync::Arc;

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use texpress_browse::{BundleRegistry, TEMPLATE_SUFFIX, TemplateFailure, extension, media_type_for};
use texpress_storage::{Storage, StorageErrorKind};

/// Built-in page layout (also used for not-found, source and error pages).
pub(crate) const LAYOUT: &str = "@TExpress/layout.html.twig";
/// Built-in directory listing page.
pub(crate) const DIR_INDEX: &str = "@TExpress/dirindex.html.twig";
/// Built-in root page.
pub(crate) const ROOT_INDEX: &str = "@TExpress/rootindex.html.twig";

/// Create a template environment over the installed bundles.
pub(crate) fn environment(bundles: BundleRegistry, storage: Arc<dyn Storage>) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(auto_escape);
    env.set_loader(move |name| load(&bundles, storage.as_ref(), name));
    env
}

fn load(
    bundles: &BundleRegistry,
    storage: &dyn Storage,
    name: &str,
) -> Result<Option<String>, minijinja::Error> {
    if name.starts_with(texpress_assets::NAMESPACE) {
        return Ok(texpress_assets::template(name));
    }

    let Some(path) = bundles.resolve_template(name) else {
        return Ok(None);
    };
    match storage.read(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind == StorageErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {name}"),
        )
        .with_source(e)),
    }
}

/// HTML escaping for `.html`, `.htm` and `.xml` templates.
pub(crate) fn auto_escape(name: &str) -> AutoEscape {
    let name = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
    match extension(name).map(str::to_ascii_lowercase).as_deref() {
        Some("html" | "htm" | "xml") => AutoEscape::Html,
        _ => AutoEscape::None,
    }
}

/// Render a template by name.
pub(crate) fn render(env: &Environment<'_>, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
    env.get_template(name)?.render(ctx)
}

/// Content type for a rendered template, from its inner extension.
///
/// `page.json.twig` is served as `application/json`; templates without an
/// inner extension are served as HTML.
pub(crate) fn content_type(name: &str) -> String {
    let inner = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
    match extension(inner) {
        Some(ext) => format!("{};charset=utf-8", media_type_for(ext)),
        None => "text/html;charset=utf-8".to_owned(),
    }
}

/// Response with an explicit content type.
pub(crate) fn with_content_type(content_type: &str, body: String) -> Response {
    match HeaderValue::from_str(content_type) {
        Ok(value) => ([(header::CONTENT_TYPE, value)], body).into_response(),
        Err(_) => body.into_response(),
    }
}

/// Describe a template engine error without engine types.
pub(crate) fn failure_from(err: &minijinja::Error) -> TemplateFailure {
    TemplateFailure {
        kind: format!("{:?}", err.kind()),
        message: err
            .detail()
            .map_or_else(|| err.kind().to_string(), str::to_owned),
        line: err.line(),
        template: err.name().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use minijinja::context;
    use pretty_assertions::assert_eq;
    use texpress_storage::FsStorage;

    use super::*;

    fn bundle_env(dir: &std::path::Path) -> Environment<'static> {
        let registry = BundleRegistry::new([("AppBundle".to_owned(), dir.join("AppBundle"))]);
        environment(registry, Arc::new(FsStorage::new()))
    }

    fn write(dir: &std::path::Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_auto_escape() {
        assert_eq!(auto_escape("page.html.twig"), AutoEscape::Html);
        assert_eq!(auto_escape("@App/page.HTM.twig"), AutoEscape::Html);
        assert_eq!(auto_escape("feed.xml.twig"), AutoEscape::Html);
        assert_eq!(auto_escape("data.json.twig"), AutoEscape::None);
        assert_eq!(auto_escape("page.twig"), AutoEscape::None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("@AppBundle/a.json.twig"), "application/json;charset=utf-8");
        assert_eq!(content_type("@AppBundle/a.html.twig"), "text/html;charset=utf-8");
        assert_eq!(content_type("@AppBundle/a.weird.twig"), "text/plain;charset=utf-8");
        assert_eq!(content_type("@AppBundle/a.twig"), "text/html;charset=utf-8");
    }

    #[test]
    fn test_render_bundle_template_with_views_alias_include() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "AppBundle/Resources/views/_hello.html.twig", "Hello {{ name }}");
        write(
            dir.path(),
            "AppBundle/Resources/views/static/page.html.twig",
            "{% include '@App/_hello.html.twig' %}!",
        );
        let env = bundle_env(dir.path());

        let html = render(
            &env,
            "@AppBundle/Resources/views/static/page.html.twig",
            context! { name => "<World>" },
        )
        .unwrap();

        assert_eq!(html, "Hello &lt;World&gt;!");
    }

    #[test]
    fn test_render_extends_builtin_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "AppBundle/Resources/views/static/page.html.twig",
            "{% extends '@TExpress/layout.html.twig' %}{% block content %}<p>Body</p>{% endblock %}",
        );
        let env = bundle_env(dir.path());

        let html = render(&env, "@AppBundle/Resources/views/static/page.html.twig", context! {}).unwrap();

        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("/_assets/texpress.css"));
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let env = bundle_env(dir.path());

        let err = render(&env, "@AppBundle/missing.twig", context! {}).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    }

    #[test]
    fn test_failure_from_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "AppBundle/Resources/views/static/broken.html.twig",
            "line one\n{% if %}\n",
        );
        let env = bundle_env(dir.path());

        let err = render(&env, "@AppBundle/Resources/views/static/broken.html.twig", context! {})
            .unwrap_err();
        let failure = failure_from(&err);

        assert_eq!(failure.kind, "SyntaxError");
        assert_eq!(failure.line, Some(2));
        assert_eq!(
            failure.template.as_deref(),
            Some("@AppBundle/Resources/views/static/broken.html.twig")
        );
        assert!(!failure.message.is_empty());
    }
}
