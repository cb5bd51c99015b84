use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a signal summary came from. Fallback data is synthesized by the
/// analyzers when capture failed and is never trusted as a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    #[default]
    Measured,
    Fallback,
}

/// Aggregate speech metrics produced by the speech analyzer.
///
/// Every numeric field is optional so partially captured sessions can still
/// be scored. Sub-scores are already normalized to 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSignalSummary {
    pub filler_word_count: Option<u32>,
    pub filler_word_percentage: Option<f64>,
    pub words_per_minute: Option<f64>,
    pub total_words: Option<u32>,
    pub pause_count: Option<u32>,
    pub average_pause_seconds: Option<f64>,
    pub volume_variation: Option<f64>,
    pub clarity: Option<f64>,
    pub articulation: Option<f64>,
    pub fluency: Option<f64>,
    pub pronunciation: Option<f64>,
    pub confidence: Option<f64>,
    pub provenance: Provenance,
}

/// Aggregate posture, eye-contact, gesture and facial metrics from video analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyLanguageSignalSummary {
    pub posture_score: Option<f64>,
    pub eye_contact_percentage: Option<f64>,
    pub eye_contact_score: Option<f64>,
    pub gesture_frequency: Option<f64>,
    pub gesture_appropriateness: Option<f64>,
    pub gesture_score: Option<f64>,
    pub facial_confidence: Option<f64>,
    pub facial_engagement: Option<f64>,
    pub overall_score: Option<f64>,
    pub professionalism: Option<f64>,
    pub provenance: Provenance,
}

/// Coarse confidence label attached to every computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Low,
    Medium,
    High,
}

impl DataQuality {
    pub const fn label(self) -> &'static str {
        match self {
            DataQuality::Low => "low",
            DataQuality::Medium => "medium",
            DataQuality::High => "high",
        }
    }
}

/// Output of a single component calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScoreResult {
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub data_quality: DataQuality,
    pub issues: Vec<String>,
}

/// Interview difficulty tier; selects the overall weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse; unknown labels fall back to `Medium`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Self::Easy,
            "hard" | "advanced" => Self::Hard,
            _ => Self::Medium,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-interview record owned by the analytics storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPerformanceRecord {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    #[serde(default)]
    pub questions_answered: u32,
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub technical_score: f64,
    #[serde(default)]
    pub communication_score: f64,
    #[serde(default)]
    pub behavioral_score: f64,
    #[serde(default)]
    pub speech_analysis: Option<SpeechSignalSummary>,
    #[serde(default)]
    pub body_language_analysis: Option<BodyLanguageSignalSummary>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_loosely() {
        assert_eq!(Difficulty::from_label("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label(" HARD "), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("Demo"), Difficulty::Medium);
        let parsed: Difficulty = serde_json::from_str("\"Hard\"").expect("difficulty parses");
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn provenance_defaults_to_measured() {
        let summary: SpeechSignalSummary =
            serde_json::from_str(r#"{ "clarity": 80.0 }"#).expect("summary parses");
        assert_eq!(summary.provenance, Provenance::Measured);
        assert_eq!(summary.clarity, Some(80.0));
        assert!(summary.fluency.is_none());
    }
}
