//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: DatasetCheck,
}

#[derive(Serialize)]
pub struct DatasetCheck {
    pub estimates: usize,
    pub sources: usize,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - the dataset is loaded before the listener binds, so
/// this reports what was loaded
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready".to_string(),
        checks: DatasetCheck {
            estimates: state.dataset.estimates().len(),
            sources: state.dataset.sources().len(),
        },
    })
}
