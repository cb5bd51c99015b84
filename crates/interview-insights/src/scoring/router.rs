use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::InterviewPerformanceRecord;
use super::service::{InterviewScoringService, ScoreRequest};
use super::validation::RecordValidator;
use crate::aspects::AspectScoreStore;

/// Router builder exposing interview scoring and record validation.
pub fn scoring_router<S>(service: Arc<InterviewScoringService<S>>) -> Router
where
    S: AspectScoreStore + 'static,
{
    Router::new()
        .route("/api/v1/scores", post(score_handler::<S>))
        .route("/api/v1/scores/validate", post(validate_handler::<S>))
        .with_state(service)
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<InterviewScoringService<S>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    if request.interview_id.trim().is_empty() {
        let payload = json!({ "error": "interview_id is required" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let scorecard = service.evaluate(&request);
    let status = if request.record {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, axum::Json(scorecard)).into_response()
}

pub(crate) async fn validate_handler<S>(
    State(_service): State<Arc<InterviewScoringService<S>>>,
    axum::Json(record): axum::Json<InterviewPerformanceRecord>,
) -> Response
where
    S: AspectScoreStore + 'static,
{
    let validation = RecordValidator.validate(&record);
    (StatusCode::OK, axum::Json(validation)).into_response()
}
