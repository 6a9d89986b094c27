//! Chart Routes
//!
//! - GET /api/v1/overview - Bubble map and global totals figures
//! - GET /api/v1/selection?country= - Time-series and totals figures for a selection

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{OverviewResponse, SelectionParams, SelectionResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::charts::PlotlyFigure;
use crate::selection::SelectionListener;

/// GET /api/v1/overview
pub async fn overview(State(state): State<Arc<AppState>>) -> Json<OverviewResponse> {
    Json(OverviewResponse {
        bubble_map: state.overview.bubble_map.to_figure(),
        totals: state.overview.totals.to_figure(),
    })
}

/// GET /api/v1/selection
///
/// An unknown country is answered with 404 and no figures, so the page
/// keeps showing the previous pair of charts.
pub async fn selection(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> ApiResult<Json<SelectionResponse>> {
    let pair = state
        .selection
        .on_selection_changed(params.country.as_deref())?;

    tracing::info!(selection = %pair.label, "Selection served");

    Ok(Json(SelectionResponse {
        time_series: pair.time_series.to_figure(),
        totals: pair.totals.to_figure(),
        summary: pair.summary,
        label: pair.label,
    }))
}
