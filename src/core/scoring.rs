use crate::models::{Breed, NumericTrait, PreferenceVector, ScoringMode, ScoringWeights};
use crate::core::filters::{calculate_categorical_score, calculate_temperament_score};

/// Independent similarity measures combined into the final match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub numeric: f64,
    pub temperament: f64,
    pub categorical: f64,
}

impl SubScores {
    /// Combine the sub-scores for the given mode
    ///
    /// Filtered mode drops the categorical term without renormalizing, so
    /// its ceiling is `weights.numeric + weights.temperament`.
    pub fn combine(&self, weights: &ScoringWeights, mode: ScoringMode) -> f64 {
        let base = self.numeric * weights.numeric + self.temperament * weights.temperament;
        match mode {
            ScoringMode::Weighted => base + self.categorical * weights.categorical,
            ScoringMode::Filtered => base,
        }
    }
}

/// Calculate a match score for a breed based on user preferences
///
/// Scoring formula (weighted mode, default weights):
/// score = (
///     numeric_score * 0.5 +       # Closeness across the five traits
///     temperament_score * 0.3 +   # Share of wanted tags present
///     categorical_score * 0.2     # Share of size/group constraints met
/// )
///
/// Filtered mode leaves out the categorical term. The result is not clamped.
pub fn calculate_match_score(
    breed: &Breed,
    preferences: &PreferenceVector,
    weights: &ScoringWeights,
    mode: ScoringMode,
) -> f64 {
    calculate_sub_scores(breed, preferences).combine(weights, mode)
}

pub fn calculate_sub_scores(breed: &Breed, preferences: &PreferenceVector) -> SubScores {
    SubScores {
        numeric: calculate_numeric_score(breed, preferences),
        temperament: calculate_temperament_score(breed, preferences),
        categorical: calculate_categorical_score(breed, preferences),
    }
}

/// Calculate numeric score (0-1)
/// Mean of `1 - |preference - breed|` over the five normalized traits
#[inline]
pub fn calculate_numeric_score(breed: &Breed, preferences: &PreferenceVector) -> f64 {
    let total: f64 = NumericTrait::ALL
        .iter()
        .map(|&which| 1.0 - (preferences.trait_value(which) - breed.trait_value(which)).abs())
        .sum();

    total / NumericTrait::ALL.len() as f64
}
