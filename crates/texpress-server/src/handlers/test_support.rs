//! Request helpers and bundle fixtures for handler tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use tempfile::TempDir;
use texpress_storage::FsStorage;
use tower::ServiceExt;

use crate::state::AppState;
use crate::{ServerConfig, StaticSite, app};

/// Bundles on disk:
///
/// - `AppBundle`, served as `app`, with pages, a JSON template, a folder with
///   an index, a folder without one and a broken template
/// - `ShopBundle`, not configured, reachable through discovery as `shop`
pub(crate) struct Fixture {
    _dir: TempDir,
    pub(crate) config: ServerConfig,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(root, "AppBundle/Resources/views/_greeting.html.twig", "Hello {{ name }}");
        write(
            root,
            "AppBundle/Resources/views/static/page.html.twig",
            "{% extends '@TExpress/layout.html.twig' %}\n\
             {% block content %}<p>{% with name = '<b>you</b>' %}{% include '@App/_greeting.html.twig' %}{% endwith %}</p>{% endblock %}\n",
        );
        write(root, "AppBundle/Resources/views/static/data.json.twig", r#"{"sum": {{ 1 + 1 }}}"#);
        write(root, "AppBundle/Resources/views/static/docs/index.html.twig", "Docs index");
        write(root, "AppBundle/Resources/views/static/docs/intro.twig", "Intro");
        write(root, "AppBundle/Resources/views/static/docs/notes.txt", "not a template");
        write(root, "AppBundle/Resources/views/static/empty/.keep", "");
        write(
            root,
            "AppBundle/Resources/views/static/broken.html.twig",
            "<h1>Broken</h1>\n{% if %}\n<p>after</p>\n",
        );
        write(root, "ShopBundle/Resources/views/static/cart.html.twig", "Cart");

        let config = ServerConfig {
            bundles: BTreeMap::from([
                ("AppBundle".to_owned(), root.join("AppBundle")),
                ("ShopBundle".to_owned(), root.join("ShopBundle")),
            ]),
            sites: BTreeMap::from([
                ("app".to_owned(), StaticSite::new("AppBundle")),
                ("ghost".to_owned(), StaticSite::new("GhostBundle")),
            ]),
            ..ServerConfig::default()
        };

        Self { _dir: dir, config }
    }

    /// Same bundles, debug mode off.
    pub(crate) fn production() -> Self {
        let mut fixture = Self::new();
        fixture.config.debug = false;
        fixture
    }

    pub(crate) fn router(&self) -> Router {
        let state = AppState::new(&self.config, Arc::new(FsStorage::new()));
        app::create_router(Arc::new(state))
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A buffered response.
pub(crate) struct TestResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

impl TestResponse {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub(crate) fn location(&self) -> Option<&str> {
        self.header("location")
    }
}

/// Send a GET request through the router.
pub(crate) async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
