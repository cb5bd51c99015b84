use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::aspects::{aspect_router, AspectCategory, AspectScoreManager};

#[tokio::test]
async fn add_route_records_score() {
    let (manager, store) = build_manager();
    let router = aspect_router(Arc::new(manager));
    let payload = json!({
        "aspectName": "Communication",
        "score": 72.0,
        "timestamp": "2025-06-02T09:00:00Z",
        "interviewId": "int-1",
        "category": "communication"
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/aspects")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["total_scores"], 1);
    assert_eq!(body["persistence"], "ok");
    assert_eq!(store.saved().len(), 1);
}

#[tokio::test]
async fn interview_route_records_bulk_scores() {
    let (manager, _) = build_manager();
    let manager = Arc::new(manager);
    let router = aspect_router(manager.clone());
    let payload = json!({
        "timestamp": "2025-06-02T09:00:00Z",
        "aspects": {
            "Communication": { "score": 70.0, "category": "communication" },
            "Posture": { "score": 55.0, "category": "behavioral" }
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/interviews/int-5/aspects")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["recorded"], 2);
    assert_eq!(manager.scores_for_interview("int-5").len(), 2);
}

#[tokio::test]
async fn history_route_returns_trend() {
    let manager = manager_with(vec![communication(60.0, 0), communication(70.0, 1)]);
    let router = aspect_router(Arc::new(manager));

    let response = router
        .oneshot(
            Request::get("/api/v1/aspects/history/Communication")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["aspectName"], "Communication");
    assert_eq!(body["trend"], "improving");
    assert_eq!(body["latestScore"], 70.0);
    assert_eq!(body["averageScore"], 65.0);
}

#[tokio::test]
async fn timeseries_route_requires_aspect_names() {
    let (manager, _) = build_manager();
    let router = aspect_router(Arc::new(manager));

    let response = router
        .oneshot(
            Request::get("/api/v1/aspects/timeseries?aspects=%20,&range=30")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn timeseries_route_returns_rows() {
    let manager = manager_with(vec![communication(60.0, 0)]);
    let router = aspect_router(Arc::new(manager));

    let response = router
        .oneshot(
            Request::get("/api/v1/aspects/timeseries?aspects=Communication,Posture&range=all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["date"], "2025-06-02");
    assert_eq!(body[0]["values"]["Communication"], 60.0);
    assert!(body[0]["values"]["Posture"].is_null());
}

#[tokio::test]
async fn statistics_route_reports_totals() {
    let manager = manager_with(vec![
        communication(60.0, 0),
        score_at("Posture", 80.0, days_after(1), "int-1", AspectCategory::Behavioral),
    ]);
    let router = aspect_router(Arc::new(manager));

    let response = router
        .oneshot(
            Request::get("/api/v1/aspects/statistics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = read_json_body(response).await;
    assert_eq!(body["totalScores"], 2);
    assert_eq!(body["bestAspect"], "Posture");
    assert_eq!(body["worstAspect"], "Communication");
}

#[tokio::test]
async fn import_handler_rejects_malformed_payload() {
    let manager = Arc::new(manager_with(vec![communication(60.0, 0)]));

    let response = crate::aspects::router::import_handler(
        State(manager.clone()),
        "not json at all".to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(manager.len(), 1);
}

#[tokio::test]
async fn export_route_serves_json_array() {
    let manager = manager_with(vec![communication(60.0, 0)]);
    let router = aspect_router(Arc::new(manager));

    let response = router
        .oneshot(
            Request::get("/api/v1/aspects/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["interviewId"], "int-0");
}

#[tokio::test]
async fn add_handler_reports_degraded_persistence() {
    let manager = Arc::new(AspectScoreManager::new(Arc::new(UnavailableStore)));

    let response = crate::aspects::router::add_score_handler(
        State(manager.clone()),
        axum::Json(communication(60.0, 0)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["persistence"], "degraded");
    assert_eq!(manager.len(), 1);
}

#[tokio::test]
async fn clear_route_empties_history() {
    let manager = Arc::new(manager_with(vec![communication(60.0, 0)]));
    let router = aspect_router(manager.clone());

    let response = router
        .oneshot(
            Request::delete("/api/v1/aspects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(manager.is_empty());
}
