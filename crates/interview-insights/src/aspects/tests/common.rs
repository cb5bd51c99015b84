use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::aspects::{
    AspectCategory, AspectScore, AspectScoreManager, AspectScoreStore, InMemoryAspectStore,
    StoreError,
};

/// Store whose backing medium is gone: every load and save fails.
#[derive(Debug, Default)]
pub(super) struct UnavailableStore;

impl AspectScoreStore for UnavailableStore {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError> {
        Err(StoreError::Unavailable("volume not mounted".to_string()))
    }

    fn save(&self, _scores: &[AspectScore]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("volume not mounted".to_string()))
    }
}

/// Loads cleanly but rejects writes.
#[derive(Debug, Default)]
pub(super) struct ReadOnlyStore;

impl AspectScoreStore for ReadOnlyStore {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError> {
        Ok(Vec::new())
    }

    fn save(&self, _scores: &[AspectScore]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only filesystem".to_string()))
    }
}

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn days_after(days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(days)
}

pub(super) fn score_at(
    aspect: &str,
    score: f64,
    timestamp: DateTime<Utc>,
    interview_id: &str,
    category: AspectCategory,
) -> AspectScore {
    AspectScore::new(aspect, score, timestamp, interview_id, category)
}

pub(super) fn communication(score: f64, day: i64) -> AspectScore {
    score_at(
        "Communication",
        score,
        days_after(day),
        &format!("int-{day}"),
        AspectCategory::Communication,
    )
}

pub(super) fn build_manager() -> (
    AspectScoreManager<InMemoryAspectStore>,
    Arc<InMemoryAspectStore>,
) {
    let store = Arc::new(InMemoryAspectStore::default());
    (AspectScoreManager::new(store.clone()), store)
}

pub(super) fn manager_with(scores: Vec<AspectScore>) -> AspectScoreManager<InMemoryAspectStore> {
    AspectScoreManager::new(Arc::new(InMemoryAspectStore::with_scores(scores)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
