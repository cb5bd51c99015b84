use serde::{Deserialize, Serialize};

use super::domain::Difficulty;

/// Substituted for a missing or non-numeric measurement.
pub const NEUTRAL_DEFAULT: f64 = 60.0;

/// Expected answer time per question for the technical time-efficiency term.
pub const EXPECTED_SECONDS_PER_QUESTION: f64 = 120.0;

/// Speaking pace that earns a full pace score.
pub const TARGET_WORDS_PER_MINUTE: f64 = 150.0;

/// Observation windows shorter than this cap data quality at medium.
pub const MIN_OBSERVATION_SECONDS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalWeights {
    pub clarity_articulation: f64,
    pub coherence: f64,
    pub professionalism: f64,
    pub confidence_engagement: f64,
    pub time_efficiency: f64,
}

impl TechnicalWeights {
    pub fn sum(&self) -> f64 {
        self.clarity_articulation
            + self.coherence
            + self.professionalism
            + self.confidence_engagement
            + self.time_efficiency
    }
}

impl Default for TechnicalWeights {
    fn default() -> Self {
        Self {
            clarity_articulation: 0.30,
            coherence: 0.25,
            professionalism: 0.20,
            confidence_engagement: 0.15,
            time_efficiency: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunicationWeights {
    pub pronunciation: f64,
    pub fluency: f64,
    pub confidence: f64,
    pub pace: f64,
    pub clarity: f64,
}

impl CommunicationWeights {
    pub fn sum(&self) -> f64 {
        self.pronunciation + self.fluency + self.confidence + self.pace + self.clarity
    }
}

impl Default for CommunicationWeights {
    fn default() -> Self {
        Self {
            pronunciation: 0.30,
            fluency: 0.25,
            confidence: 0.20,
            pace: 0.15,
            clarity: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehavioralWeights {
    pub eye_contact: f64,
    pub posture: f64,
    pub facial_expression: f64,
    pub gestures: f64,
    pub overall_body_language: f64,
}

impl BehavioralWeights {
    pub fn sum(&self) -> f64 {
        self.eye_contact
            + self.posture
            + self.facial_expression
            + self.gestures
            + self.overall_body_language
    }
}

impl Default for BehavioralWeights {
    fn default() -> Self {
        Self {
            eye_contact: 0.30,
            posture: 0.25,
            facial_expression: 0.20,
            gestures: 0.15,
            overall_body_language: 0.10,
        }
    }
}

/// Weight triple applied to the component scores for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyWeights {
    pub technical: f64,
    pub communication: f64,
    pub behavioral: f64,
}

impl DifficultyWeights {
    pub fn sum(&self) -> f64 {
        self.technical + self.communication + self.behavioral
    }

    /// Harder interviews reward technical depth, easier ones communication.
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                technical: 0.30,
                communication: 0.40,
                behavioral: 0.30,
            },
            Difficulty::Medium => Self {
                technical: 0.40,
                communication: 0.35,
                behavioral: 0.25,
            },
            Difficulty::Hard => Self {
                technical: 0.50,
                communication: 0.30,
                behavioral: 0.20,
            },
        }
    }
}

/// Rubric configuration for the component calculators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub technical: TechnicalWeights,
    pub communication: CommunicationWeights,
    pub behavioral: BehavioralWeights,
}

/// Tolerance allowed when checking that a weight set sums to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("{component} weights must sum to 1.0, got {sum}")]
    Unbalanced { component: &'static str, sum: f64 },
    #[error("{component} weights must be finite and non-negative")]
    Negative { component: &'static str },
}

fn check_weights(component: &'static str, sum: f64, values: &[f64]) -> Result<(), WeightError> {
    if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(WeightError::Negative { component });
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(WeightError::Unbalanced { component, sum });
    }
    Ok(())
}

impl ScoringConfig {
    /// Rejects any rubric whose weights are negative or do not sum to one.
    pub fn validate(&self) -> Result<(), WeightError> {
        let t = &self.technical;
        check_weights(
            "technical",
            t.sum(),
            &[
                t.clarity_articulation,
                t.coherence,
                t.professionalism,
                t.confidence_engagement,
                t.time_efficiency,
            ],
        )?;
        let c = &self.communication;
        check_weights(
            "communication",
            c.sum(),
            &[c.pronunciation, c.fluency, c.confidence, c.pace, c.clarity],
        )?;
        let b = &self.behavioral;
        check_weights(
            "behavioral",
            b.sum(),
            &[
                b.eye_contact,
                b.posture,
                b.facial_expression,
                b.gestures,
                b.overall_body_language,
            ],
        )
    }
}
