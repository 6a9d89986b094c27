//! Country Routes
//!
//! - GET /api/v1/countries - Dropdown options, sorted by name

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::CountryListResponse;
use crate::api::state::AppState;
use crate::dataset::DatasetProvider;

/// GET /api/v1/countries
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<CountryListResponse> {
    let countries = state.dataset.list_countries().to_vec();

    Json(CountryListResponse {
        total: countries.len(),
        countries,
    })
}
