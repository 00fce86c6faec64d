use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{extract, merge_search_hits, Matcher};
use crate::models::{
    ErrorResponse, ExtractRequest, ExtractResponse, HealthResponse, OptionsResponse,
    PreferenceVector, RecommendRequest, RecommendResponse, ScoringMode, SearchRequest,
    PartialPreset, SearchResponse, Size, TextRecommendRequest,
};
use crate::services::{BreedCatalog, SearchCache, SearchError, SemanticSearchClient};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<BreedCatalog>,
    pub matcher: Matcher,
    pub search: Option<Arc<SemanticSearchClient>>,
    pub cache: SearchCache,
    pub default_limit: u16,
    pub max_limit: u16,
}

impl AppState {
    /// State with no semantic search and the stock limits
    pub fn new(catalog: Arc<BreedCatalog>, matcher: Matcher) -> Self {
        Self {
            catalog,
            matcher,
            search: None,
            cache: SearchCache::new(1000, 300),
            default_limit: 10,
            max_limit: 100,
        }
    }

    pub fn with_search(mut self, client: SemanticSearchClient, cache: SearchCache) -> Self {
        self.search = Some(Arc::new(client));
        self.cache = cache;
        self
    }

    pub fn with_limits(mut self, default_limit: u16, max_limit: u16) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }

    fn resolve_limit(&self, requested: Option<u16>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit) as usize
    }

    fn recommend(
        &self,
        preferences: &PreferenceVector,
        mode: ScoringMode,
        limit: Option<u16>,
        preset: Option<PartialPreset>,
    ) -> RecommendResponse {
        let limit = self.resolve_limit(limit);
        let result = self
            .matcher
            .rank(self.catalog.breeds(), preferences, mode, Some(limit));

        if result.matches.is_empty() {
            tracing::info!("No breed passed the {} filter", mode);
        }

        RecommendResponse {
            matches: result.matches,
            mode,
            total_candidates: result.total_candidates,
            eligible: result.eligible,
            preset,
        }
    }
}

/// Configure all breed-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/breeds", web::get().to(list_breeds))
        .route("/breeds/options", web::get().to(breed_options))
        .route("/extract", web::post().to(extract_preset))
        .route("/recommend", web::post().to(recommend))
        .route("/recommend/text", web::post().to(recommend_from_text))
        .route("/search", web::post().to(search));
}

fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        breeds: state.catalog.len(),
    })
}

/// GET /api/v1/breeds
async fn list_breeds(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.breeds())
}

/// GET /api/v1/breeds/options
///
/// Sizes, groups and temperament tags available for the preference form.
async fn breed_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(OptionsResponse {
        sizes: Size::ALL.to_vec(),
        groups: state.catalog.groups(),
        temperaments: state.catalog.temperaments(),
    })
}

/// Extract a preset from free text
///
/// POST /api/v1/extract
///
/// Request body:
/// ```json
/// { "text": "a calm and loyal companion for a small apartment" }
/// ```
async fn extract_preset(req: web::Json<ExtractRequest>) -> impl Responder {
    let preset = extract(&req.text);
    let preferences = preset.clone().into_preferences();

    HttpResponse::Ok().json(ExtractResponse { preset, preferences })
}

/// Rank breeds against a preference vector
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// {
///   "preferences": {
///     "grooming": 0.5, "shedding": 0.5, "energy": 0.5,
///     "trainability": 0.5, "lifetime_cost": 0.5,
///     "temperament": ["Loyal"], "size": "Any", "group": "Any"
///   },
///   "mode": "weighted|filtered",
///   "limit": 10
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let response = state.recommend(&req.preferences, req.mode, req.limit, None);

    tracing::info!(
        "Returning {} of {} eligible breeds ({} mode)",
        response.matches.len(),
        response.eligible,
        response.mode
    );

    HttpResponse::Ok().json(response)
}

/// Extract a preset from text, then rank with it
///
/// POST /api/v1/recommend/text
async fn recommend_from_text(
    state: web::Data<AppState>,
    req: web::Json<TextRecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let preset = extract(&req.text);
    let preferences = preset.clone().into_preferences();
    let response = state.recommend(&preferences, req.mode, Some(req.limit), Some(preset));

    tracing::info!(
        "Returning {} breeds for text recommendation ({} mode)",
        response.matches.len(),
        response.mode
    );

    HttpResponse::Ok().json(response)
}

/// Semantic search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// { "query": "a calm and loyal companion", "limit": 10 }
/// ```
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let Some(client) = state.search.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Search unavailable",
            "Semantic search is not configured",
        );
    };

    let limit = state.resolve_limit(req.limit);

    let hits = match state.cache.get(&req.query).await {
        Some(hits) => hits,
        // Cached hit lists are shared across limits, so fetch up to max_limit
        None => match client.search(&req.query, state.max_limit as usize).await {
            Ok(hits) => state.cache.insert(&req.query, hits).await,
            Err(SearchError::EmptyQuery) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "Validation failed",
                    SearchError::EmptyQuery.to_string(),
                );
            }
            Err(e) => {
                tracing::error!("Semantic search failed: {}", e);
                return error_response(StatusCode::BAD_GATEWAY, "Search failed", e.to_string());
            }
        },
    };

    let hits = hits.iter().take(limit).cloned().collect();
    let outcome = merge_search_hits(state.catalog.as_ref(), hits);

    tracing::info!(
        "Returning {} search matches ({} skipped)",
        outcome.matches.len(),
        outcome.unknown.len()
    );

    HttpResponse::Ok().json(SearchResponse {
        matches: outcome.matches,
        skipped: outcome.unknown,
    })
}
