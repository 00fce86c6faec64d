use crate::models::{Breed, PreferenceVector, ScoredBreed, ScoringMode, ScoringWeights};
use crate::core::{filters::matches_categorical, scoring::calculate_match_score};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredBreed>,
    pub total_candidates: usize,
    /// Breeds that were scored (all of them in weighted mode)
    pub eligible: usize,
}

/// Main matching orchestrator
///
/// One scorer serves both call sites; the [`ScoringMode`] chosen per call
/// decides whether size/group filter the catalog or take part in the score.
///
/// # Pipeline Stages
/// 1. Size/group hard filter (filtered mode only)
/// 2. Sub-score calculation and weighting
/// 3. Stable ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank breeds against a preference vector
    ///
    /// Neither the breeds nor the preferences are modified; every call
    /// recomputes from scratch.
    ///
    /// # Arguments
    /// * `breeds` - The catalog, in its natural order
    /// * `preferences` - The complete preference vector
    /// * `mode` - Weight-then-score or filter-then-score
    /// * `limit` - Keep only the first `limit` results when set
    ///
    /// # Returns
    /// MatchResult with matches sorted by descending score. Equal scores keep
    /// catalog order. An empty filter result is an empty list, not an error.
    pub fn rank(
        &self,
        breeds: &[Breed],
        preferences: &PreferenceVector,
        mode: ScoringMode,
        limit: Option<usize>,
    ) -> MatchResult {
        let total_candidates = breeds.len();

        let mut scored: Vec<ScoredBreed> = breeds
            .iter()
            // Stage 1: hard filter
            .filter(|breed| mode == ScoringMode::Weighted || matches_categorical(breed, preferences))
            // Stage 2: score
            .map(|breed| ScoredBreed {
                match_score: calculate_match_score(breed, preferences, &self.weights, mode),
                breed: breed.clone(),
            })
            .collect();

        let eligible = scored.len();

        // Stage 3: stable sort keeps catalog order on ties
        scored.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(limit) = limit {
            scored.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} breeds in {} mode, returning {}",
            eligible,
            total_candidates,
            mode,
            scored.len()
        );

        MatchResult {
            matches: scored,
            total_candidates,
            eligible,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Score and rank breeds with the default weights
pub fn score(
    breeds: &[Breed],
    preferences: &PreferenceVector,
    mode: ScoringMode,
    top_n: Option<usize>,
) -> Vec<ScoredBreed> {
    Matcher::with_default_weights()
        .rank(breeds, preferences, mode, top_n)
        .matches
}
