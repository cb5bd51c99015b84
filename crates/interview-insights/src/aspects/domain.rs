use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{validate_score, DataQuality};

/// Grouping used by the category comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectCategory {
    Communication,
    Technical,
    Behavioral,
    Overall,
    Detailed,
}

impl AspectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            AspectCategory::Communication => "communication",
            AspectCategory::Technical => "technical",
            AspectCategory::Behavioral => "behavioral",
            AspectCategory::Overall => "overall",
            AspectCategory::Detailed => "detailed",
        }
    }

    /// Capitalized label shown on chart axes.
    pub const fn display_label(self) -> &'static str {
        match self {
            AspectCategory::Communication => "Communication",
            AspectCategory::Technical => "Technical",
            AspectCategory::Behavioral => "Behavioral",
            AspectCategory::Overall => "Overall",
            AspectCategory::Detailed => "Detailed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMetadata {
    pub confidence: f64,
    pub analysis_quality: DataQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One named score recorded for one interview. Corrections are new entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectScore {
    pub aspect_name: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
    pub interview_id: String,
    pub category: AspectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scores: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AspectMetadata>,
}

impl AspectScore {
    pub fn new(
        aspect_name: impl Into<String>,
        score: f64,
        timestamp: DateTime<Utc>,
        interview_id: impl Into<String>,
        category: AspectCategory,
    ) -> Self {
        Self {
            aspect_name: aspect_name.into(),
            score,
            timestamp,
            interview_id: interview_id.into(),
            category,
            sub_scores: None,
            metadata: None,
        }
    }

    pub(crate) fn clamped(mut self) -> Self {
        self.score = validate_score(self.score);
        self
    }
}

/// Per-aspect payload for bulk recording; interview id and timestamp are shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectScoreInput {
    pub score: f64,
    pub category: AspectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scores: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AspectMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectScoreHistory {
    pub aspect_name: String,
    pub scores: Vec<AspectScore>,
    pub average_score: f64,
    pub trend: Trend,
    pub latest_score: f64,
}

/// Trailing window applied to time-series charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeRange {
    Last30Days,
    Last60Days,
    Last90Days,
    #[default]
    All,
}

impl TimeRange {
    pub const fn days(self) -> Option<i64> {
        match self {
            TimeRange::Last30Days => Some(30),
            TimeRange::Last60Days => Some(60),
            TimeRange::Last90Days => Some(90),
            TimeRange::All => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeRange::Last30Days => "30",
            TimeRange::Last60Days => "60",
            TimeRange::Last90Days => "90",
            TimeRange::All => "all",
        }
    }
}

impl TryFrom<String> for TimeRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "30" => Ok(Self::Last30Days),
            "60" => Ok(Self::Last60Days),
            "90" => Ok(Self::Last90Days),
            "all" | "" => Ok(Self::All),
            other => Err(format!("unsupported time range '{other}' (expected 30, 60, 90 or all)")),
        }
    }
}

impl From<TimeRange> for String {
    fn from(value: TimeRange) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One calendar day of a line chart. Aspects without a score that day are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub aspect: String,
    pub score: f64,
    pub full_mark: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub category: String,
    pub average_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectStatistics {
    pub total_scores: usize,
    pub total_interviews: usize,
    pub aspects_tracked: usize,
    pub average_score: f64,
    pub best_aspect: Option<String>,
    pub worst_aspect: Option<String>,
}
