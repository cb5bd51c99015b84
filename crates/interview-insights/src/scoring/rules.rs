use std::collections::BTreeMap;

use super::config::{
    BehavioralWeights, CommunicationWeights, TechnicalWeights, EXPECTED_SECONDS_PER_QUESTION,
    MIN_OBSERVATION_SECONDS, NEUTRAL_DEFAULT, TARGET_WORDS_PER_MINUTE,
};
use super::domain::{
    BodyLanguageSignalSummary, ComponentScoreResult, DataQuality, Provenance, SpeechSignalSummary,
};
use super::validation::validate_score;

const FILLER_WARNING_PERCENT: f64 = 10.0;
const PACE_RANGE_WPM: (f64, f64) = (110.0, 180.0);
const EYE_CONTACT_WARNING_PERCENT: f64 = 50.0;
const POSTURE_WARNING_SCORE: f64 = 60.0;

/// Collects the measurements feeding one calculator so the breakdown, issues
/// and data quality stay consistent with what was actually used.
#[derive(Debug, Default)]
struct MeasurementSheet {
    breakdown: BTreeMap<String, f64>,
    issues: Vec<String>,
    present: usize,
    total: usize,
    fallback: bool,
    short_window: bool,
}

impl MeasurementSheet {
    fn note_source(&mut self, source: &str, provenance: Option<Provenance>) {
        match provenance {
            Some(Provenance::Measured) => {}
            Some(Provenance::Fallback) => {
                self.fallback = true;
                self.issues
                    .push(format!("{source} is fallback data, not a measurement"));
            }
            None => self.issues.push(format!("{source} unavailable")),
        }
    }

    fn take(&mut self, key: &str, value: Option<f64>) -> f64 {
        self.total += 1;
        let value = match finite(value) {
            Some(raw) => {
                self.present += 1;
                validate_score(raw)
            }
            None => {
                self.issues.push(format!(
                    "{key} unavailable; neutral default {NEUTRAL_DEFAULT} applied"
                ));
                NEUTRAL_DEFAULT
            }
        };
        self.breakdown.insert(key.to_string(), value);
        value
    }

    fn check_window(&mut self, duration_seconds: f64, what: &str) {
        if !duration_seconds.is_finite() || duration_seconds < MIN_OBSERVATION_SECONDS {
            self.short_window = true;
            self.issues.push(format!(
                "observation window too short for reliable {what} metrics"
            ));
        }
    }

    fn observe(&mut self, observation: String) {
        self.issues.push(observation);
    }

    fn finish(self, weighted: f64) -> ComponentScoreResult {
        let mut data_quality = if self.fallback {
            DataQuality::Low
        } else if self.present == self.total {
            DataQuality::High
        } else if self.present * 2 >= self.total {
            DataQuality::Medium
        } else {
            DataQuality::Low
        };
        if self.short_window {
            data_quality = data_quality.min(DataQuality::Medium);
        }

        ComponentScoreResult {
            score: validate_score(weighted),
            breakdown: self.breakdown,
            data_quality,
            issues: self.issues,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|raw| raw.is_finite())
}

/// Mean of whichever values are present; `None` when none are.
fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values
        .iter()
        .filter_map(|value| finite(*value))
        .map(validate_score)
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

fn coherence_from_filler(filler_percentage: f64) -> f64 {
    let filler_percentage = filler_percentage.clamp(0.0, 100.0);
    100.0 - (filler_percentage * 2.0).min(20.0)
}

fn time_efficiency(duration_seconds: f64, question_count: u32) -> Option<f64> {
    if question_count == 0 || !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return None;
    }
    let expected = f64::from(question_count) * EXPECTED_SECONDS_PER_QUESTION;
    Some((expected / duration_seconds * 100.0).min(100.0))
}

fn words_per_minute(speech: &SpeechSignalSummary, duration_seconds: f64) -> Option<f64> {
    finite(speech.words_per_minute).or_else(|| {
        let words = speech.total_words?;
        if duration_seconds.is_finite() && duration_seconds > 0.0 {
            Some(f64::from(words) / (duration_seconds / 60.0))
        } else {
            None
        }
    })
}

fn pace_score(wpm: f64) -> f64 {
    (wpm.max(0.0) / TARGET_WORDS_PER_MINUTE * 100.0).min(100.0)
}

fn filler_observation(sheet: &mut MeasurementSheet, speech: Option<&SpeechSignalSummary>) {
    if let Some(percentage) = speech.and_then(|speech| finite(speech.filler_word_percentage)) {
        if percentage > FILLER_WARNING_PERCENT {
            sheet.observe(format!(
                "filler words make up {percentage:.1}% of speech"
            ));
        }
    }
}

pub(crate) fn technical_score(
    speech: Option<&SpeechSignalSummary>,
    body: Option<&BodyLanguageSignalSummary>,
    duration_seconds: f64,
    question_count: u32,
    weights: &TechnicalWeights,
) -> ComponentScoreResult {
    let mut sheet = MeasurementSheet::default();
    sheet.note_source("speech analysis", speech.map(|speech| speech.provenance));
    sheet.note_source("body language analysis", body.map(|body| body.provenance));

    let clarity_articulation = sheet.take(
        "clarity_articulation",
        speech.and_then(|speech| mean_present(&[speech.clarity, speech.articulation])),
    );
    let coherence = sheet.take(
        "coherence",
        speech
            .and_then(|speech| finite(speech.filler_word_percentage))
            .map(coherence_from_filler),
    );
    let professionalism = sheet.take(
        "professionalism",
        body.and_then(|body| body.professionalism),
    );
    let confidence_engagement = sheet.take(
        "confidence_engagement",
        mean_present(&[
            speech.and_then(|speech| speech.confidence),
            body.and_then(|body| body.facial_engagement),
        ]),
    );
    let time_efficiency = sheet.take(
        "time_efficiency",
        time_efficiency(duration_seconds, question_count),
    );

    filler_observation(&mut sheet, speech);

    let weighted = clarity_articulation * weights.clarity_articulation
        + coherence * weights.coherence
        + professionalism * weights.professionalism
        + confidence_engagement * weights.confidence_engagement
        + time_efficiency * weights.time_efficiency;

    sheet.finish(weighted)
}

pub(crate) fn communication_score(
    speech: Option<&SpeechSignalSummary>,
    duration_seconds: f64,
    weights: &CommunicationWeights,
) -> ComponentScoreResult {
    let mut sheet = MeasurementSheet::default();
    sheet.note_source("speech analysis", speech.map(|speech| speech.provenance));
    sheet.check_window(duration_seconds, "speech");

    let wpm = speech.and_then(|speech| words_per_minute(speech, duration_seconds));

    let pronunciation = sheet.take(
        "pronunciation",
        speech.and_then(|speech| speech.pronunciation),
    );
    let fluency = sheet.take("fluency", speech.and_then(|speech| speech.fluency));
    let confidence = sheet.take("confidence", speech.and_then(|speech| speech.confidence));
    let pace = sheet.take("pace", wpm.map(pace_score));
    let clarity = sheet.take("clarity", speech.and_then(|speech| speech.clarity));

    if let Some(wpm) = wpm {
        let (slowest, fastest) = PACE_RANGE_WPM;
        if wpm < slowest || wpm > fastest {
            sheet.observe(format!(
                "speaking pace of {wpm:.0} wpm is outside the {slowest:.0}-{fastest:.0} wpm range"
            ));
        }
    }
    filler_observation(&mut sheet, speech);

    let weighted = pronunciation * weights.pronunciation
        + fluency * weights.fluency
        + confidence * weights.confidence
        + pace * weights.pace
        + clarity * weights.clarity;

    sheet.finish(weighted)
}

pub(crate) fn behavioral_score(
    body: Option<&BodyLanguageSignalSummary>,
    duration_seconds: f64,
    weights: &BehavioralWeights,
) -> ComponentScoreResult {
    let mut sheet = MeasurementSheet::default();
    sheet.note_source("body language analysis", body.map(|body| body.provenance));
    sheet.check_window(duration_seconds, "body language");

    let eye_contact = sheet.take(
        "eye_contact",
        body.and_then(|body| finite(body.eye_contact_score).or(body.eye_contact_percentage)),
    );
    let posture = sheet.take("posture", body.and_then(|body| body.posture_score));
    let facial_expression = sheet.take(
        "facial_expression",
        body.and_then(|body| mean_present(&[body.facial_confidence, body.facial_engagement])),
    );
    let gestures = sheet.take(
        "gestures",
        body.and_then(|body| finite(body.gesture_score).or(body.gesture_appropriateness)),
    );
    let overall_body_language = sheet.take(
        "overall_body_language",
        body.and_then(|body| body.overall_score),
    );

    if let Some(body) = body {
        if let Some(percentage) = finite(body.eye_contact_percentage) {
            if percentage < EYE_CONTACT_WARNING_PERCENT {
                sheet.observe(format!(
                    "eye contact held for only {percentage:.0}% of the interview"
                ));
            }
        }
        if let Some(posture) = finite(body.posture_score) {
            if posture < POSTURE_WARNING_SCORE {
                sheet.observe(format!("posture score {posture:.0} indicates slouching"));
            }
        }
    }

    let weighted = eye_contact * weights.eye_contact
        + posture * weights.posture
        + facial_expression * weights.facial_expression
        + gestures * weights.gestures
        + overall_body_language * weights.overall_body_language;

    sheet.finish(weighted)
}
