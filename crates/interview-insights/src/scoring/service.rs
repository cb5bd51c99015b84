use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::combiner::OverallScore;
use super::domain::{
    BodyLanguageSignalSummary, ComponentScoreResult, DataQuality, Difficulty,
    InterviewPerformanceRecord, SpeechSignalSummary,
};
use super::ScoringEngine;
use crate::aspects::{
    AspectCategory, AspectMetadata, AspectScoreInput, AspectScoreManager, AspectScoreStore,
};

pub const TECHNICAL_ASPECT: &str = "Technical Skills";
pub const COMMUNICATION_ASPECT: &str = "Communication";
pub const BEHAVIORAL_ASPECT: &str = "Behavioral";
pub const OVERALL_ASPECT: &str = "Overall";

/// Signals for one completed interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub interview_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub duration_seconds: f64,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub speech: Option<SpeechSignalSummary>,
    #[serde(default)]
    pub body_language: Option<BodyLanguageSignalSummary>,
    #[serde(default)]
    pub record: bool,
}

impl From<&InterviewPerformanceRecord> for ScoreRequest {
    fn from(record: &InterviewPerformanceRecord) -> Self {
        Self {
            interview_id: record.id.clone(),
            timestamp: Some(record.timestamp),
            difficulty: Some(record.difficulty),
            duration_seconds: record.duration_seconds,
            question_count: record.questions_answered,
            speech: record.speech_analysis.clone(),
            body_language: record.body_language_analysis.clone(),
            record: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub interview_id: String,
    pub technical: ComponentScoreResult,
    pub communication: ComponentScoreResult,
    pub behavioral: ComponentScoreResult,
    pub overall: OverallScore,
    /// Weakest data quality among the three components.
    pub data_quality: DataQuality,
}

impl Scorecard {
    /// The four headline scores as aspect entries ready for the history log.
    pub fn aspect_inputs(&self) -> Vec<(String, AspectScoreInput)> {
        let component = |result: &ComponentScoreResult, category| AspectScoreInput {
            score: result.score,
            category,
            sub_scores: Some(result.breakdown.clone()),
            metadata: Some(metadata_for(result.data_quality, &result.issues)),
        };

        vec![
            (
                TECHNICAL_ASPECT.to_string(),
                component(&self.technical, AspectCategory::Technical),
            ),
            (
                COMMUNICATION_ASPECT.to_string(),
                component(&self.communication, AspectCategory::Communication),
            ),
            (
                BEHAVIORAL_ASPECT.to_string(),
                component(&self.behavioral, AspectCategory::Behavioral),
            ),
            (
                OVERALL_ASPECT.to_string(),
                AspectScoreInput {
                    score: self.overall.score,
                    category: AspectCategory::Overall,
                    sub_scores: None,
                    metadata: Some(metadata_for(self.data_quality, &[])),
                },
            ),
        ]
    }
}

fn quality_confidence(quality: DataQuality) -> f64 {
    match quality {
        DataQuality::High => 0.9,
        DataQuality::Medium => 0.6,
        DataQuality::Low => 0.3,
    }
}

fn metadata_for(quality: DataQuality, issues: &[String]) -> AspectMetadata {
    AspectMetadata {
        confidence: quality_confidence(quality),
        analysis_quality: quality,
        notes: if issues.is_empty() {
            None
        } else {
            Some(issues.join("; "))
        },
    }
}

/// Caller-side orchestration: scores signals and pushes the results into the
/// aspect history. The history never calls back into scoring.
pub struct InterviewScoringService<S> {
    engine: ScoringEngine,
    aspects: Arc<AspectScoreManager<S>>,
    default_difficulty: Difficulty,
}

impl<S> InterviewScoringService<S>
where
    S: AspectScoreStore + 'static,
{
    pub fn new(engine: ScoringEngine, aspects: Arc<AspectScoreManager<S>>) -> Self {
        Self {
            engine,
            aspects,
            default_difficulty: Difficulty::default(),
        }
    }

    pub fn with_default_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.default_difficulty = difficulty;
        self
    }

    pub fn aspects(&self) -> &Arc<AspectScoreManager<S>> {
        &self.aspects
    }

    pub fn score(&self, request: &ScoreRequest) -> Scorecard {
        let speech = request.speech.as_ref();
        let body = request.body_language.as_ref();
        let difficulty = request.difficulty.unwrap_or(self.default_difficulty);

        let technical = self.engine.technical(
            speech,
            body,
            request.duration_seconds,
            request.question_count,
        );
        let communication = self.engine.communication(speech, request.duration_seconds);
        let behavioral = self.engine.behavioral(body, request.duration_seconds);
        let overall = self
            .engine
            .overall(&technical, &communication, &behavioral, difficulty);
        let data_quality = technical
            .data_quality
            .min(communication.data_quality)
            .min(behavioral.data_quality);

        Scorecard {
            interview_id: request.interview_id.clone(),
            technical,
            communication,
            behavioral,
            overall,
            data_quality,
        }
    }

    /// Scores the request and, when `request.record` is set, appends the four
    /// headline scores to the aspect history.
    pub fn evaluate(&self, request: &ScoreRequest) -> Scorecard {
        let scorecard = self.score(request);
        if request.record {
            let timestamp = request.timestamp.unwrap_or_else(Utc::now);
            self.record(&scorecard, timestamp);
        }
        scorecard
    }

    pub fn record(&self, scorecard: &Scorecard, timestamp: DateTime<Utc>) -> usize {
        let recorded = self.aspects.add_scores_for_interview(
            &scorecard.interview_id,
            timestamp,
            scorecard.aspect_inputs(),
        );
        info!(
            interview_id = %scorecard.interview_id,
            overall = scorecard.overall.score,
            quality = scorecard.data_quality.label(),
            "recorded interview scorecard"
        );
        recorded
    }

    /// Returns a copy of the record with its four score fields recomputed from
    /// the attached signal summaries.
    pub fn rescore_record(&self, record: &InterviewPerformanceRecord) -> InterviewPerformanceRecord {
        let scorecard = self.score(&ScoreRequest::from(record));
        InterviewPerformanceRecord {
            overall_score: scorecard.overall.score,
            technical_score: scorecard.technical.score,
            communication_score: scorecard.communication.score,
            behavioral_score: scorecard.behavioral.score,
            ..record.clone()
        }
    }
}
