use serde::{Deserialize, Serialize};

use super::config::DifficultyWeights;
use super::domain::Difficulty;
use super::validation::validate_score;

/// Weighted overall score together with the weights that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: f64,
    pub difficulty: Difficulty,
    pub weights: DifficultyWeights,
}

pub fn calculate_overall_score(
    technical: f64,
    communication: f64,
    behavioral: f64,
    difficulty: Difficulty,
) -> f64 {
    combine(technical, communication, behavioral, difficulty).score
}

pub(crate) fn combine(
    technical: f64,
    communication: f64,
    behavioral: f64,
    difficulty: Difficulty,
) -> OverallScore {
    let weights = DifficultyWeights::for_difficulty(difficulty);
    let weighted = validate_score(technical) * weights.technical
        + validate_score(communication) * weights.communication
        + validate_score(behavioral) * weights.behavioral;

    OverallScore {
        score: validate_score(weighted),
        difficulty,
        weights,
    }
}
