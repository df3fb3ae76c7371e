//! Review count handlers

use axum::{extract::State, http::header, response::IntoResponse, Json};
use provenance_charts::ReviewStats;

use crate::AppState;

/// Headline counts as JSON
pub async fn stats(State(state): State<AppState>) -> Json<ReviewStats> {
    Json(ReviewStats::compute(&state.dataset))
}

/// Headline counts as the dashboard's markdown list
pub async fn stats_markdown(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        ReviewStats::compute(&state.dataset).to_markdown(),
    )
}
