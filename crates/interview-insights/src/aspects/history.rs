use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::charts;
use super::domain::{
    AspectCategory, AspectScore, AspectScoreHistory, AspectScoreInput, AspectStatistics,
    CategoryComparison, RadarPoint, TimeRange, TimeSeriesRow,
};
use super::repository::AspectScoreStore;

/// Rejected `import_scores` payload. Existing scores are left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("aspect score import is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("aspect score import must be a JSON array")]
    NotAnArray,
    #[error("aspect score import contains an invalid record: {0}")]
    InvalidRecord(#[source] serde_json::Error),
}

/// Append-only log of aspect scores with derived analytics views.
///
/// The in-memory log is the source of truth for the life of the process. Every
/// mutation is written through to the store; a failed load or save is logged,
/// flips [`AspectScoreManager::persistence_degraded`], and is otherwise ignored.
pub struct AspectScoreManager<S> {
    store: Arc<S>,
    scores: Mutex<Vec<AspectScore>>,
    degraded: AtomicBool,
}

impl<S> AspectScoreManager<S>
where
    S: AspectScoreStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let (scores, degraded) = match store.load() {
            Ok(scores) => {
                debug!(count = scores.len(), "loaded aspect scores");
                let scores = scores.into_iter().map(AspectScore::clamped).collect();
                (scores, false)
            }
            Err(err) => {
                warn!(error = %err, "failed to load aspect scores; starting empty");
                (Vec::new(), true)
            }
        };

        Self {
            store,
            scores: Mutex::new(scores),
            degraded: AtomicBool::new(degraded),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// True when the most recent load or save against the store failed.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AspectScore>> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Vec<AspectScore> {
        self.lock().clone()
    }

    fn persist(&self, scores: &[AspectScore]) {
        match self.store.save(scores) {
            Ok(()) => self.degraded.store(false, Ordering::Release),
            Err(err) => {
                warn!(error = %err, count = scores.len(), "failed to persist aspect scores; keeping in-memory state");
                self.degraded.store(true, Ordering::Release);
            }
        }
    }

    pub fn add_score(&self, score: AspectScore) {
        let mut guard = self.lock();
        guard.push(score.clamped());
        self.persist(&guard);
    }

    /// Records one score per entry, all sharing the interview id and timestamp.
    pub fn add_scores_for_interview<I>(
        &self,
        interview_id: &str,
        timestamp: DateTime<Utc>,
        aspect_scores: I,
    ) -> usize
    where
        I: IntoIterator<Item = (String, AspectScoreInput)>,
    {
        let entries: Vec<AspectScore> = aspect_scores
            .into_iter()
            .map(|(aspect_name, input)| {
                AspectScore {
                    aspect_name,
                    score: input.score,
                    timestamp,
                    interview_id: interview_id.to_string(),
                    category: input.category,
                    sub_scores: input.sub_scores,
                    metadata: input.metadata,
                }
                .clamped()
            })
            .collect();
        let recorded = entries.len();
        if recorded == 0 {
            return 0;
        }

        let mut guard = self.lock();
        guard.extend(entries);
        self.persist(&guard);
        debug!(interview_id, recorded, "recorded interview aspect scores");
        recorded
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn all_scores(&self) -> Vec<AspectScore> {
        self.snapshot()
    }

    pub fn scores_for_aspect(&self, aspect_name: &str) -> Vec<AspectScore> {
        charts::scores_for_aspect(&self.lock(), aspect_name)
    }

    pub fn scores_for_interview(&self, interview_id: &str) -> Vec<AspectScore> {
        self.lock()
            .iter()
            .filter(|score| score.interview_id == interview_id)
            .cloned()
            .collect()
    }

    pub fn scores_by_category(&self, category: AspectCategory) -> Vec<AspectScore> {
        let mut matching: Vec<AspectScore> = self
            .lock()
            .iter()
            .filter(|score| score.category == category)
            .cloned()
            .collect();
        matching.sort_by_key(|score| score.timestamp);
        matching
    }

    pub fn aspect_history(&self, aspect_name: &str) -> AspectScoreHistory {
        charts::aspect_history(&self.lock(), aspect_name)
    }

    pub fn all_aspect_histories(&self) -> Vec<AspectScoreHistory> {
        let scores = self.snapshot();
        charts::aspect_names(&scores)
            .iter()
            .map(|name| charts::aspect_history(&scores, name))
            .collect()
    }

    pub fn time_series(&self, aspect_names: &[String], range: TimeRange) -> Vec<TimeSeriesRow> {
        self.time_series_at(aspect_names, range, Utc::now())
    }

    /// Same as [`Self::time_series`] with an explicit reference instant for the window.
    pub fn time_series_at(
        &self,
        aspect_names: &[String],
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Vec<TimeSeriesRow> {
        charts::time_series(&self.lock(), aspect_names, range, now)
    }

    pub fn radar_chart(&self, interview_id: Option<&str>) -> Vec<RadarPoint> {
        charts::radar_chart(&self.lock(), interview_id)
    }

    pub fn category_comparison(&self) -> Vec<CategoryComparison> {
        charts::category_comparison(&self.lock())
    }

    pub fn latest_scores(&self) -> Vec<AspectScore> {
        charts::latest_scores(&self.lock())
    }

    pub fn statistics(&self) -> AspectStatistics {
        charts::statistics(&self.lock())
    }

    pub fn clear_scores(&self) {
        let mut guard = self.lock();
        guard.clear();
        self.persist(&guard);
    }

    pub fn export_scores(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// Replaces the whole collection. Nothing changes unless every record parses.
    pub fn import_scores(&self, data: &str) -> Result<usize, ImportError> {
        let parsed = parse_import(data).map_err(|err| {
            warn!(error = %err, "rejected aspect score import");
            err
        })?;
        let imported = parsed.len();

        let mut guard = self.lock();
        *guard = parsed;
        self.persist(&guard);
        debug!(imported, "imported aspect scores");
        Ok(imported)
    }
}

fn parse_import(data: &str) -> Result<Vec<AspectScore>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(data).map_err(ImportError::Malformed)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    let scores: Vec<AspectScore> =
        serde_json::from_value(value).map_err(ImportError::InvalidRecord)?;
    Ok(scores.into_iter().map(AspectScore::clamped).collect())
}
