use std::sync::Arc;

use chrono::{TimeZone, Utc};
use interview_insights::aspects::{AspectCategory, AspectScoreManager, InMemoryAspectStore};
use interview_insights::scoring::domain::{
    BodyLanguageSignalSummary, DataQuality, Difficulty, SpeechSignalSummary,
};
use interview_insights::scoring::{InterviewScoringService, ScoreRequest, ScoringEngine};

fn request(interview_id: &str, day: u32, clarity: f64) -> ScoreRequest {
    ScoreRequest {
        interview_id: interview_id.to_string(),
        timestamp: Some(
            Utc.with_ymd_and_hms(2025, 7, day, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
        ),
        difficulty: Some(Difficulty::Hard),
        duration_seconds: 600.0,
        question_count: 5,
        speech: Some(SpeechSignalSummary {
            filler_word_percentage: Some(3.0),
            words_per_minute: Some(140.0),
            clarity: Some(clarity),
            articulation: Some(clarity),
            fluency: Some(clarity),
            pronunciation: Some(clarity),
            confidence: Some(clarity),
            ..SpeechSignalSummary::default()
        }),
        body_language: Some(BodyLanguageSignalSummary {
            posture_score: Some(75.0),
            eye_contact_percentage: Some(70.0),
            eye_contact_score: Some(72.0),
            gesture_score: Some(70.0),
            facial_confidence: Some(74.0),
            facial_engagement: Some(76.0),
            overall_score: Some(73.0),
            professionalism: Some(80.0),
            ..BodyLanguageSignalSummary::default()
        }),
        record: true,
    }
}

#[test]
fn repeated_interviews_build_an_improving_history() {
    let manager = Arc::new(AspectScoreManager::new(Arc::new(
        InMemoryAspectStore::default(),
    )));
    let service = InterviewScoringService::new(ScoringEngine::default(), manager.clone());

    let first = service.evaluate(&request("int-a", 1, 50.0));
    let second = service.evaluate(&request("int-b", 8, 85.0));

    assert_eq!(first.data_quality, DataQuality::High);
    assert!(second.communication.score > first.communication.score);
    assert_eq!(manager.len(), 8);

    let history = manager.aspect_history("Communication");
    assert_eq!(history.scores.len(), 2);
    assert_eq!(
        serde_json::to_value(history.trend).expect("trend serializes"),
        "improving"
    );

    let categories = manager.category_comparison();
    assert!(categories
        .iter()
        .any(|entry| entry.category == AspectCategory::Overall.display_label() && entry.count == 2));

    let radar = manager.radar_chart(Some("int-b"));
    assert_eq!(radar.len(), 4);
    assert!(radar.iter().all(|point| (0.0..=100.0).contains(&point.score)));
}

#[test]
fn scorecard_serializes_snake_case() {
    let manager = Arc::new(AspectScoreManager::new(Arc::new(
        InMemoryAspectStore::default(),
    )));
    let service = InterviewScoringService::new(ScoringEngine::default(), manager);

    let scorecard = service.score(&request("int-c", 2, 70.0));
    let value = serde_json::to_value(&scorecard).expect("scorecard serializes");

    assert_eq!(value["interview_id"], "int-c");
    assert_eq!(value["overall"]["difficulty"], "hard");
    assert_eq!(value["overall"]["weights"]["technical"], 0.5);
    assert!(value["technical"]["breakdown"]["time_efficiency"].is_number());
}
