//! Built-in asset serving.

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Handle GET /_assets/{path}.
pub(crate) async fn get_asset(Path(path): Path<String>) -> Response {
    match texpress_assets::get(&path) {
        Some(content) => (
            [(header::CONTENT_TYPE, texpress_assets::mime_for(&path))],
            content.into_owned(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handlers::test_support::{Fixture, get};

    #[tokio::test]
    async fn test_get_stylesheet() {
        let fixture = Fixture::new();

        let response = get(fixture.router(), "/_assets/texpress.css").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.header("content-type"), Some("text/css"));
        assert!(response.body.contains(".tx-main"));
    }

    #[tokio::test]
    async fn test_get_missing_asset() {
        let fixture = Fixture::new();

        let response = get(fixture.router(), "/_assets/missing.js").await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
