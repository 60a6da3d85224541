//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use texpress_browse::BrowseError;
use texpress_storage::{StorageError, StorageErrorKind};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Bundle lookup or listing failed.
    #[error(transparent)]
    Browse(#[from] BrowseError),

    /// Reading a file failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(e) if e.kind == StorageErrorKind::NotFound => StatusCode::NOT_FOUND,
            Self::Browse(_) | Self::Storage(_) | Self::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = match &self {
            // Configuration problems are for the operator in front of the browser
            Self::Browse(e) => e.to_string(),
            Self::Storage(_) if status == StatusCode::NOT_FOUND => "Not found".to_owned(),
            Self::Storage(_) | Self::Render(_) => "Internal server error".to_owned(),
        };

        (status, body).into_response()
    }
}
