// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Breed, BreedRecord, Constraint, ConstraintError, NumericTrait, PartialPreset, PreferenceVector,
    RecordError, ScoredBreed, ScoringMode, ScoringWeights, SearchHit, Size, ANY, NEUTRAL_TRAIT,
};
pub use requests::{ExtractRequest, RecommendRequest, SearchRequest, TextRecommendRequest};
pub use responses::{
    ErrorResponse, ExtractResponse, HealthResponse, OptionsResponse, RecommendResponse,
    SearchResponse,
};
