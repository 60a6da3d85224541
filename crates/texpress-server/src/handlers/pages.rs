//! Built-in pages.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::Value;

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates;

/// Render one of the built-in page templates.
pub(crate) fn render_page(
    state: &AppState,
    template: &str,
    ctx: Value,
    status: StatusCode,
) -> Result<Response, ServerError> {
    let env = state.environment();
    let html = templates::render(&env, template, ctx)?;
    Ok((status, Html(html)).into_response())
}
