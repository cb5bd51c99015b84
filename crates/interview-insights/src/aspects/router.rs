use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AspectScore, AspectScoreInput, TimeRange};
use super::history::AspectScoreManager;
use super::repository::AspectScoreStore;
use crate::error::AppError;

type SharedManager<S> = Arc<AspectScoreManager<S>>;

/// Router exposing the aspect history and chart projections.
pub fn aspect_router<S>(manager: SharedManager<S>) -> Router
where
    S: AspectScoreStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/aspects",
            post(add_score_handler::<S>).delete(clear_handler::<S>),
        )
        .route(
            "/api/v1/interviews/:interview_id/aspects",
            post(add_interview_scores_handler::<S>).get(interview_scores_handler::<S>),
        )
        .route("/api/v1/aspects/latest", get(latest_handler::<S>))
        .route("/api/v1/aspects/histories", get(histories_handler::<S>))
        .route(
            "/api/v1/aspects/history/:aspect_name",
            get(history_handler::<S>),
        )
        .route("/api/v1/aspects/timeseries", get(time_series_handler::<S>))
        .route("/api/v1/aspects/radar", get(radar_handler::<S>))
        .route("/api/v1/aspects/categories", get(categories_handler::<S>))
        .route("/api/v1/aspects/statistics", get(statistics_handler::<S>))
        .route("/api/v1/aspects/export", get(export_handler::<S>))
        .route("/api/v1/aspects/import", post(import_handler::<S>))
        .with_state(manager)
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterviewScoresRequest {
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    aspects: BTreeMap<String, AspectScoreInput>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeSeriesQuery {
    aspects: String,
    #[serde(default)]
    range: TimeRange,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadarQuery {
    #[serde(default)]
    interview_id: Option<String>,
}

fn persistence_status<S>(manager: &AspectScoreManager<S>) -> &'static str
where
    S: AspectScoreStore + 'static,
{
    if manager.persistence_degraded() {
        "degraded"
    } else {
        "ok"
    }
}

pub(crate) async fn add_score_handler<S>(
    State(manager): State<SharedManager<S>>,
    Json(score): Json<AspectScore>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    manager.add_score(score);
    let payload = json!({
        "total_scores": manager.len(),
        "persistence": persistence_status(&manager),
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn add_interview_scores_handler<S>(
    State(manager): State<SharedManager<S>>,
    Path(interview_id): Path<String>,
    Json(request): Json<InterviewScoresRequest>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    let timestamp = request.timestamp.unwrap_or_else(Utc::now);
    let recorded = manager.add_scores_for_interview(&interview_id, timestamp, request.aspects);
    let payload = json!({
        "interview_id": interview_id,
        "recorded": recorded,
        "persistence": persistence_status(&manager),
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn interview_scores_handler<S>(
    State(manager): State<SharedManager<S>>,
    Path(interview_id): Path<String>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.scores_for_interview(&interview_id)).into_response()
}

pub(crate) async fn latest_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.latest_scores()).into_response()
}

pub(crate) async fn histories_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.all_aspect_histories()).into_response()
}

pub(crate) async fn history_handler<S>(
    State(manager): State<SharedManager<S>>,
    Path(aspect_name): Path<String>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.aspect_history(&aspect_name)).into_response()
}

pub(crate) async fn time_series_handler<S>(
    State(manager): State<SharedManager<S>>,
    Query(query): Query<TimeSeriesQuery>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    let names: Vec<String> = query
        .aspects
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        let payload = json!({ "error": "at least one aspect name is required" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }
    Json(manager.time_series(&names, query.range)).into_response()
}

pub(crate) async fn radar_handler<S>(
    State(manager): State<SharedManager<S>>,
    Query(query): Query<RadarQuery>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.radar_chart(query.interview_id.as_deref())).into_response()
}

pub(crate) async fn categories_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.category_comparison()).into_response()
}

pub(crate) async fn statistics_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    Json(manager.statistics()).into_response()
}

pub(crate) async fn export_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    match manager.export_scores() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn import_handler<S>(
    State(manager): State<SharedManager<S>>,
    body: String,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    match manager.import_scores(&body) {
        Ok(imported) => {
            let payload = json!({
                "imported": imported,
                "persistence": persistence_status(&manager),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn clear_handler<S>(State(manager): State<SharedManager<S>>) -> Response
where
    S: AspectScoreStore + 'static,
{
    manager.clear_scores();
    StatusCode::NO_CONTENT.into_response()
}
