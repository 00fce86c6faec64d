use serde::{Deserialize, Serialize};
use crate::models::domain::{PartialPreset, PreferenceVector, ScoredBreed, ScoringMode, Size};

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub matches: Vec<ScoredBreed>,
    pub mode: ScoringMode,
    pub total_candidates: usize,
    pub eligible: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<PartialPreset>,
}

/// Response for the extract endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    pub preset: PartialPreset,
    pub preferences: PreferenceVector,
}

/// Response for the semantic search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<ScoredBreed>,
    /// Breed names returned by the search service but absent from the catalog
    pub skipped: Vec<String>,
}

/// Choices a client needs to build its preference form
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub sizes: Vec<Size>,
    pub groups: Vec<String>,
    pub temperaments: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub breeds: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
