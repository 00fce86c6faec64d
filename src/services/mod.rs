// Service exports
pub mod cache;
pub mod dataset;
pub mod search;

pub use cache::{CacheKey, SearchCache};
pub use dataset::{BreedCatalog, DatasetError};
pub use search::{normalize_query, SearchError, SemanticSearchClient};
