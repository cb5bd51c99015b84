//! Deterministic interview scoring: component calculators, the difficulty
//! weighted combiner, and the service that records results as aspect scores.

mod combiner;
mod config;
pub mod domain;
mod rules;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use combiner::{calculate_overall_score, OverallScore};
pub use config::{
    BehavioralWeights, CommunicationWeights, DifficultyWeights, ScoringConfig, TechnicalWeights,
    EXPECTED_SECONDS_PER_QUESTION, MIN_OBSERVATION_SECONDS, NEUTRAL_DEFAULT,
    TARGET_WORDS_PER_MINUTE, WeightError,
};
pub use domain::{
    BodyLanguageSignalSummary, ComponentScoreResult, DataQuality, Difficulty,
    InterviewPerformanceRecord, Provenance, SpeechSignalSummary,
};
pub use router::scoring_router;
pub use service::{InterviewScoringService, ScoreRequest, Scorecard};
pub use validation::{validate_score, RecordOrigin, RecordValidation, RecordValidator};

/// Stateless scorer applying a weight rubric to signal summaries.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, WeightError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn technical(
        &self,
        speech: Option<&SpeechSignalSummary>,
        body: Option<&BodyLanguageSignalSummary>,
        duration_seconds: f64,
        question_count: u32,
    ) -> ComponentScoreResult {
        rules::technical_score(
            speech,
            body,
            duration_seconds,
            question_count,
            &self.config.technical,
        )
    }

    pub fn communication(
        &self,
        speech: Option<&SpeechSignalSummary>,
        duration_seconds: f64,
    ) -> ComponentScoreResult {
        rules::communication_score(speech, duration_seconds, &self.config.communication)
    }

    pub fn behavioral(
        &self,
        body: Option<&BodyLanguageSignalSummary>,
        duration_seconds: f64,
    ) -> ComponentScoreResult {
        rules::behavioral_score(body, duration_seconds, &self.config.behavioral)
    }

    pub fn overall(
        &self,
        technical: &ComponentScoreResult,
        communication: &ComponentScoreResult,
        behavioral: &ComponentScoreResult,
        difficulty: Difficulty,
    ) -> OverallScore {
        combiner::combine(
            technical.score,
            communication.score,
            behavioral.score,
            difficulty,
        )
    }
}

pub fn calculate_technical_score(
    speech: Option<&SpeechSignalSummary>,
    body: Option<&BodyLanguageSignalSummary>,
    duration_seconds: f64,
    question_count: u32,
) -> ComponentScoreResult {
    ScoringEngine::default().technical(speech, body, duration_seconds, question_count)
}

pub fn calculate_communication_score(
    speech: Option<&SpeechSignalSummary>,
    duration_seconds: f64,
) -> ComponentScoreResult {
    ScoringEngine::default().communication(speech, duration_seconds)
}

pub fn calculate_behavioral_score(
    body: Option<&BodyLanguageSignalSummary>,
    duration_seconds: f64,
) -> ComponentScoreResult {
    ScoringEngine::default().behavioral(body, duration_seconds)
}
