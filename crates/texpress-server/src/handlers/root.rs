//! Root page: the list of static sites.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use minijinja::context;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::pages::render_page;
use crate::state::AppState;
use crate::templates::ROOT_INDEX;

/// Query of GET /.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RootQuery {
    /// Slug that did not match any static site.
    was: Option<String>,
}

/// Handle GET /.
pub(crate) async fn get_root(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RootQuery>,
) -> Result<Response, ServerError> {
    let ctx = context! {
        sites => state.site_entries(),
        was => query.was,
    };
    render_page(&state, ROOT_INDEX, ctx, StatusCode::OK)
}
