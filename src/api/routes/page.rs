//! Page Route
//!
//! - GET / - The dashboard page, rendered once at startup

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_str().to_owned())
}
