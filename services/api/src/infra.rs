use interview_insights::aspects::{
    AspectScore, AspectScoreManager, AspectScoreStore, InMemoryAspectStore, JsonFileAspectStore,
    StoreError, TimeRange,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store selected at startup: a JSON file when a path is configured,
/// otherwise process memory.
#[derive(Debug)]
pub(crate) enum ConfiguredStore {
    File(JsonFileAspectStore),
    Memory(InMemoryAspectStore),
}

impl ConfiguredStore {
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => {
                info!(path = %path.display(), "using JSON aspect store");
                Self::File(JsonFileAspectStore::new(path))
            }
            None => {
                info!("no aspect store path configured; scores stay in memory");
                Self::Memory(InMemoryAspectStore::default())
            }
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConfiguredStore::File(store) => store.path().display().to_string(),
            ConfiguredStore::Memory(_) => "in-memory".to_string(),
        }
    }
}

impl AspectScoreStore for ConfiguredStore {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError> {
        match self {
            ConfiguredStore::File(store) => store.load(),
            ConfiguredStore::Memory(store) => store.load(),
        }
    }

    fn save(&self, scores: &[AspectScore]) -> Result<(), StoreError> {
        match self {
            ConfiguredStore::File(store) => store.save(scores),
            ConfiguredStore::Memory(store) => store.save(scores),
        }
    }
}

pub(crate) fn build_manager(path: Option<PathBuf>) -> Arc<AspectScoreManager<ConfiguredStore>> {
    Arc::new(AspectScoreManager::new(Arc::new(ConfiguredStore::from_path(
        path,
    ))))
}

pub(crate) fn parse_time_range(raw: &str) -> Result<TimeRange, String> {
    TimeRange::try_from(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use interview_insights::aspects::AspectCategory;

    #[test]
    fn memory_store_round_trips() {
        let store = ConfiguredStore::from_path(None);
        let score = AspectScore::new(
            "Communication",
            68.0,
            Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
            "int-1",
            AspectCategory::Communication,
        );

        store.save(&[score.clone()]).expect("save succeeds");

        assert_eq!(store.load().expect("load succeeds"), vec![score]);
        assert_eq!(store.describe(), "in-memory");
    }

    #[test]
    fn parses_cli_time_ranges() {
        assert_eq!(parse_time_range("60"), Ok(TimeRange::Last60Days));
        assert!(parse_time_range("weekly").is_err());
    }
}
