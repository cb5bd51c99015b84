use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::domain::AspectScore;

/// Durable home for the aspect score log. Implementations only need to store
/// and return the whole collection.
pub trait AspectScoreStore: Send + Sync {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError>;
    fn save(&self, scores: &[AspectScore]) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("aspect store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("aspect store payload invalid: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("aspect store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store, used when no file path is configured and in tests.
#[derive(Debug, Default)]
pub struct InMemoryAspectStore {
    scores: Mutex<Vec<AspectScore>>,
}

impl InMemoryAspectStore {
    pub fn with_scores(scores: Vec<AspectScore>) -> Self {
        Self {
            scores: Mutex::new(scores),
        }
    }

    /// Last collection handed to `save`.
    pub fn saved(&self) -> Vec<AspectScore> {
        self.scores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AspectScoreStore for InMemoryAspectStore {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, scores: &[AspectScore]) -> Result<(), StoreError> {
        let mut guard = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = scores.to_vec();
        Ok(())
    }
}

/// JSON array on disk. Writes go to a sibling temp file that is then renamed
/// over the target so readers never see a half-written collection.
#[derive(Debug, Clone)]
pub struct JsonFileAspectStore {
    path: PathBuf,
}

impl JsonFileAspectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl AspectScoreStore for JsonFileAspectStore {
    fn load(&self) -> Result<Vec<AspectScore>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, scores: &[AspectScore]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(scores)?;
        let staging = self.staging_path();
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
