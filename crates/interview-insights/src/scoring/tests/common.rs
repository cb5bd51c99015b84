use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::aspects::{AspectScoreManager, InMemoryAspectStore};
use crate::scoring::domain::{
    BodyLanguageSignalSummary, Difficulty, InterviewPerformanceRecord, Provenance,
    SpeechSignalSummary,
};
use crate::scoring::{InterviewScoringService, ScoreRequest, ScoringEngine};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// Weak candidate: mumbled, halting speech and disengaged body language.
pub(super) fn poor_speech() -> SpeechSignalSummary {
    SpeechSignalSummary {
        filler_word_count: Some(40),
        filler_word_percentage: Some(50.0),
        words_per_minute: Some(50.0),
        total_words: Some(80),
        clarity: Some(10.0),
        articulation: Some(10.0),
        fluency: Some(10.0),
        pronunciation: Some(10.0),
        confidence: Some(10.0),
        ..SpeechSignalSummary::default()
    }
}

pub(super) fn poor_body() -> BodyLanguageSignalSummary {
    BodyLanguageSignalSummary {
        posture_score: Some(5.0),
        eye_contact_percentage: Some(10.0),
        eye_contact_score: Some(10.0),
        gesture_score: Some(10.0),
        facial_confidence: Some(5.0),
        facial_engagement: Some(5.0),
        overall_score: Some(8.0),
        professionalism: Some(10.0),
        ..BodyLanguageSignalSummary::default()
    }
}

/// Strong candidate with steady pace and engaged posture.
pub(super) fn strong_speech() -> SpeechSignalSummary {
    SpeechSignalSummary {
        filler_word_count: Some(8),
        filler_word_percentage: Some(2.0),
        words_per_minute: Some(150.0),
        total_words: Some(900),
        clarity: Some(90.0),
        articulation: Some(88.0),
        fluency: Some(90.0),
        pronunciation: Some(92.0),
        confidence: Some(85.0),
        ..SpeechSignalSummary::default()
    }
}

pub(super) fn strong_body() -> BodyLanguageSignalSummary {
    BodyLanguageSignalSummary {
        posture_score: Some(90.0),
        eye_contact_percentage: Some(80.0),
        eye_contact_score: Some(88.0),
        gesture_score: Some(85.0),
        facial_confidence: Some(88.0),
        facial_engagement: Some(85.0),
        overall_score: Some(88.0),
        professionalism: Some(90.0),
        ..BodyLanguageSignalSummary::default()
    }
}

pub(super) fn fallback_speech() -> SpeechSignalSummary {
    SpeechSignalSummary {
        provenance: Provenance::Fallback,
        ..strong_speech()
    }
}

pub(super) fn fallback_body() -> BodyLanguageSignalSummary {
    BodyLanguageSignalSummary {
        provenance: Provenance::Fallback,
        ..strong_body()
    }
}

pub(super) fn score_request(
    interview_id: &str,
    speech: Option<SpeechSignalSummary>,
    body: Option<BodyLanguageSignalSummary>,
) -> ScoreRequest {
    ScoreRequest {
        interview_id: interview_id.to_string(),
        timestamp: Some(
            Utc.with_ymd_and_hms(2025, 5, 12, 14, 30, 0)
                .single()
                .expect("valid timestamp"),
        ),
        difficulty: Some(Difficulty::Medium),
        duration_seconds: 360.0,
        question_count: 3,
        speech,
        body_language: body,
        record: false,
    }
}

pub(super) fn performance_record(id: &str) -> InterviewPerformanceRecord {
    InterviewPerformanceRecord {
        id: id.to_string(),
        role: "Backend Engineer".to_string(),
        difficulty: Difficulty::Medium,
        timestamp: Utc
            .with_ymd_and_hms(2025, 5, 12, 14, 30, 0)
            .single()
            .expect("valid timestamp"),
        duration_seconds: 360.0,
        questions_answered: 3,
        overall_score: 0.0,
        technical_score: 0.0,
        communication_score: 0.0,
        behavioral_score: 0.0,
        speech_analysis: Some(strong_speech()),
        body_language_analysis: Some(strong_body()),
        strengths: vec!["Structured answers".to_string()],
        weaknesses: Vec::new(),
        recommendations: Vec::new(),
    }
}

pub(super) fn build_service() -> (
    InterviewScoringService<InMemoryAspectStore>,
    Arc<InMemoryAspectStore>,
) {
    let store = Arc::new(InMemoryAspectStore::default());
    let manager = Arc::new(AspectScoreManager::new(store.clone()));
    let service = InterviewScoringService::new(ScoringEngine::default(), manager);
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
