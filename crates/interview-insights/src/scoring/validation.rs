use serde::{Deserialize, Serialize};

use super::domain::{InterviewPerformanceRecord, Provenance};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Clamps a score into [0, 100]. Non-finite input becomes 0; there is no
/// minimum floor above zero.
pub fn validate_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MIN_SCORE
    }
}

/// Whether a stored record came from a real session or a demo/fallback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Real,
    Simulated,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValidation {
    pub is_valid: bool,
    pub origin: RecordOrigin,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks a performance record before it is trusted by analytics views.
///
/// Low scores are never treated as a sign of simulated data: origin is decided
/// purely by summary provenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn validate(&self, record: &InterviewPerformanceRecord) -> RecordValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if record.id.trim().is_empty() {
            errors.push("record id is empty".to_string());
        }

        for (label, score) in [
            ("overall_score", record.overall_score),
            ("technical_score", record.technical_score),
            ("communication_score", record.communication_score),
            ("behavioral_score", record.behavioral_score),
        ] {
            if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                errors.push(format!("{label} {score} is outside 0-100"));
            }
        }

        if !record.duration_seconds.is_finite() || record.duration_seconds <= 0.0 {
            warnings.push("interview duration is not positive".to_string());
        }
        if record.questions_answered == 0 {
            warnings.push("no questions answered".to_string());
        }
        if record.speech_analysis.is_none() {
            warnings.push("speech analysis missing".to_string());
        }
        if record.body_language_analysis.is_none() {
            warnings.push("body language analysis missing".to_string());
        }

        let provenances: Vec<Provenance> = [
            record
                .speech_analysis
                .as_ref()
                .map(|speech| speech.provenance),
            record
                .body_language_analysis
                .as_ref()
                .map(|body| body.provenance),
        ]
        .into_iter()
        .flatten()
        .collect();

        let fallback = provenances
            .iter()
            .filter(|provenance| **provenance == Provenance::Fallback)
            .count();
        let origin = if fallback == 0 {
            RecordOrigin::Real
        } else if fallback == provenances.len() {
            RecordOrigin::Simulated
        } else {
            RecordOrigin::Mixed
        };
        if origin != RecordOrigin::Real {
            warnings.push("record contains fallback signal data".to_string());
        }

        RecordValidation {
            is_valid: errors.is_empty(),
            origin,
            errors,
            warnings,
        }
    }
}
