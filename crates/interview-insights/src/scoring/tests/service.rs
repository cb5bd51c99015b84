use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::aspects::{AspectCategory, AspectScoreStore};
use crate::scoring::domain::{DataQuality, Difficulty};
use crate::scoring::scoring_router;
use crate::scoring::service::{
    BEHAVIORAL_ASPECT, COMMUNICATION_ASPECT, OVERALL_ASPECT, TECHNICAL_ASPECT,
};

#[test]
fn score_does_not_touch_history() {
    let (service, store) = build_service();

    let scorecard = service.score(&score_request("int-100", Some(strong_speech()), Some(strong_body())));

    assert_close(scorecard.technical.score, 91.45);
    assert_eq!(scorecard.data_quality, DataQuality::High);
    assert_eq!(scorecard.overall.difficulty, Difficulty::Medium);
    assert!(service.aspects().is_empty());
    assert!(store.saved().is_empty());
}

#[test]
fn evaluate_records_four_headline_aspects() {
    let (service, store) = build_service();
    let mut request = score_request("int-101", Some(poor_speech()), Some(poor_body()));
    request.record = true;

    let scorecard = service.evaluate(&request);
    let recorded = service.aspects().scores_for_interview("int-101");

    assert_eq!(recorded.len(), 4);
    assert_eq!(store.load().expect("store readable").len(), 4);

    let names: Vec<&str> = recorded.iter().map(|score| score.aspect_name.as_str()).collect();
    for expected in [
        TECHNICAL_ASPECT,
        COMMUNICATION_ASPECT,
        BEHAVIORAL_ASPECT,
        OVERALL_ASPECT,
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    let communication = recorded
        .iter()
        .find(|score| score.aspect_name == COMMUNICATION_ASPECT)
        .expect("communication recorded");
    assert_eq!(communication.category, AspectCategory::Communication);
    assert_close(communication.score, scorecard.communication.score);
    assert_eq!(communication.timestamp, request.timestamp.expect("timestamp set"));
    let metadata = communication.metadata.as_ref().expect("metadata attached");
    assert_eq!(metadata.analysis_quality, DataQuality::High);
    assert!(metadata
        .notes
        .as_deref()
        .is_some_and(|notes| notes.contains("speaking pace")));
    assert!(communication
        .sub_scores
        .as_ref()
        .is_some_and(|sub_scores| sub_scores.contains_key("pronunciation")));
}

#[test]
fn default_difficulty_applies_when_request_omits_it() {
    let (service, _) = build_service();
    let service = service.with_default_difficulty(Difficulty::Hard);
    let mut request = score_request("int-102", Some(strong_speech()), Some(strong_body()));
    request.difficulty = None;

    let scorecard = service.score(&request);

    assert_eq!(scorecard.overall.difficulty, Difficulty::Hard);
}

#[test]
fn rescore_record_fills_component_scores() {
    let (service, _) = build_service();
    let record = performance_record("int-103");

    let rescored = service.rescore_record(&record);

    assert_close(rescored.technical_score, 91.45);
    assert_close(rescored.communication_score, 91.1);
    assert_close(rescored.behavioral_score, 87.75);
    assert_close(rescored.overall_score, 90.4025);
    assert_eq!(rescored.strengths, record.strengths);
}

#[tokio::test]
async fn score_route_returns_scorecard() {
    let (service, _) = build_service();
    let router = scoring_router(Arc::new(service));
    let request = score_request("int-104", Some(strong_speech()), Some(strong_body()));

    let response = router
        .oneshot(
            Request::post("/api/v1/scores")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["interview_id"], "int-104");
    assert_eq!(body["data_quality"], "high");
    assert_eq!(body["overall"]["difficulty"], "medium");
}

#[tokio::test]
async fn score_route_records_when_requested() {
    let (service, store) = build_service();
    let router = scoring_router(Arc::new(service));
    let mut request = score_request("int-105", None, Some(strong_body()));
    request.record = true;

    let response = router
        .oneshot(
            Request::post("/api/v1/scores")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.saved().len(), 4);
}

#[tokio::test]
async fn score_route_rejects_blank_interview_id() {
    let (service, _) = build_service();
    let router = scoring_router(Arc::new(service));
    let request = score_request("  ", None, None);

    let response = router
        .oneshot(
            Request::post("/api/v1/scores")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn validate_route_reports_origin() {
    let (service, _) = build_service();
    let router = scoring_router(Arc::new(service));
    let mut record = performance_record("int-106");
    record.speech_analysis = Some(fallback_speech());

    let response = router
        .oneshot(
            Request::post("/api/v1/scores/validate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&record).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["origin"], "mixed");
    assert_eq!(body["is_valid"], true);
}
