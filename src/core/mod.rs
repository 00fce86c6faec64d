// Core algorithm exports
pub mod extractor;
pub mod filters;
pub mod matcher;
pub mod merge;
pub mod scoring;

pub use extractor::{extract, KeywordRule, PresetEffect, RULES};
pub use filters::{calculate_categorical_score, calculate_temperament_score, matches_categorical};
pub use matcher::{score, MatchResult, Matcher};
pub use merge::{merge_search_hits, BreedLookup, MergeOutcome};
pub use scoring::{calculate_match_score, calculate_numeric_score, calculate_sub_scores, SubScores};
