//! Figure handlers
//!
//! Every request rebuilds its figure from the shared dataset; the
//! "exclude estimates >2000 TWh" checkbox arrives as `?exclude=`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::AppState;
use provenance_charts::{Figure, FigureKind, RenderedFigure};
use provenance_common::{
    errors::{AppError, Result},
    metrics,
};

/// Figure query parameters
#[derive(Debug, Deserialize)]
pub struct FigureQuery {
    /// Drop estimates at or above the outlier threshold
    #[serde(default = "default_exclude")]
    pub exclude: bool,
}

fn default_exclude() -> bool { true }

/// Figure listing entry
#[derive(Serialize)]
pub struct FigureSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: FigureKind,
    /// Whether the outlier checkbox applies
    pub toggle: bool,
}

#[derive(Serialize)]
pub struct FigureListResponse {
    pub figures: Vec<FigureSummary>,
}

/// List available figures
pub async fn list_figures() -> Json<FigureListResponse> {
    let figures = Figure::ALL
        .iter()
        .map(|f| FigureSummary {
            id: f.id(),
            title: f.title(),
            kind: f.kind(),
            toggle: f.kind() == FigureKind::Box,
        })
        .collect();

    Json(FigureListResponse { figures })
}

/// Build one figure for the current toggle state
pub async fn get_figure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<FigureQuery>, QueryRejection>,
) -> Result<Json<RenderedFigure>> {
    let Query(query) = query.map_err(|e| AppError::InvalidQuery {
        message: e.body_text(),
    })?;

    let figure: Figure = id
        .parse()
        .map_err(|id| AppError::FigureNotFound { id })?;

    let start = Instant::now();
    let rendered = figure.render(&state.dataset, &state.config.charts, query.exclude);
    let elapsed = start.elapsed();

    metrics::record_figure_build(
        elapsed.as_secs_f64(),
        figure.id(),
        figure.kind().as_str(),
        query.exclude,
    );

    tracing::debug!(
        figure = %figure,
        exclude = query.exclude,
        elapsed_us = elapsed.as_micros() as u64,
        "Figure built"
    );

    Ok(Json(rendered))
}

#[cfg(test)]
mod tests {
    use crate::test_support;
    use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}};
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_support::app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_list_figures() {
        let (status, body) = get_json("/v1/figures").await;
        assert_eq!(status, StatusCode::OK);

        let figures = body["figures"].as_array().unwrap();
        assert_eq!(figures.len(), 7);
        assert_eq!(figures[0]["id"], "fig-2");
        assert_eq!(figures[0]["toggle"], true);
        assert_eq!(figures[6]["kind"], "sankey");
        assert_eq!(figures[6]["toggle"], false);
    }

    #[tokio::test]
    async fn test_exclude_defaults_to_true() {
        let (status, body) = get_json("/v1/figures/fig-2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "box");

        let values = body["figure"]["y"].as_array().unwrap();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.as_f64().unwrap() < 2000.0));
    }

    #[tokio::test]
    async fn test_toggle_off_includes_outliers() {
        let (status, body) = get_json("/v1/figures/fig-2?exclude=false").await;
        assert_eq!(status, StatusCode::OK);

        let values = body["figure"]["y"].as_array().unwrap();
        assert_eq!(values.len(), 4);
        assert!(values.iter().any(|v| v.as_f64() == Some(8253.0)));
    }

    #[tokio::test]
    async fn test_sankey_figure() {
        let (status, body) = get_json("/v1/figures/fig-6").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "sankey");
        assert_eq!(body["figure"]["node"]["label"][1], "IDC");
        assert_eq!(body["figure"]["node"]["color"][1], "#f1a340");
        assert_eq!(body["figure"]["link"]["value"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_figure() {
        let (status, body) = get_json("/v1/figures/fig-99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "FIGURE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_bad_toggle_value() {
        let (status, body) = get_json("/v1/figures/fig-2?exclude=maybe").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
    }
}
