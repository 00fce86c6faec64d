//! Pawmatch - breed recommendation service
//!
//! This library ranks a static catalog of dog breeds against a user's
//! preferences. Preferences come either from a full preference vector or
//! from free text run through a keyword extractor.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract, merge_search_hits, score, Matcher, MatchResult};
pub use models::{Breed, PartialPreset, PreferenceVector, ScoredBreed, ScoringMode, ScoringWeights};
pub use services::BreedCatalog;
