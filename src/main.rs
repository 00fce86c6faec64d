use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use pawmatch::config::Settings;
use pawmatch::core::Matcher;
use pawmatch::models::ScoringWeights;
use pawmatch::routes::{self, AppState};
use pawmatch::services::{BreedCatalog, SearchCache, SemanticSearchClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::other(message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()
        .and_then(|settings| settings.validate().map(|_| settings))
        .map_err(|e| io_error(format!("Configuration error: {}", e)))?;

    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&log_level, &log_format);

    info!("Starting Pawmatch breed recommendation service...");

    let catalog = BreedCatalog::load(&settings.dataset.path).map_err(|e| {
        error!("Failed to load breed dataset: {}", e);
        io_error(e.to_string())
    })?;
    let catalog = Arc::new(catalog);

    // Initialize matcher with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let mut app_state = AppState::new(catalog, matcher)
        .with_limits(settings.scoring.default_limit, settings.scoring.max_limit);

    // Semantic search is optional - the app works without it
    match settings.search.endpoint.as_deref() {
        Some(endpoint) => {
            let timeout = Duration::from_secs(settings.search.timeout_secs.unwrap_or(30));
            let cache_size = settings.search.cache_size.unwrap_or(1000);
            let cache_ttl = settings.search.cache_ttl_secs.unwrap_or(300);

            let client = SemanticSearchClient::new(endpoint, timeout)
                .map_err(|e| io_error(format!("Search client error: {}", e)))?;
            app_state = app_state.with_search(client, SearchCache::new(cache_size, cache_ttl));

            info!(
                "Semantic search enabled at {} (cache: {} entries, TTL: {}s)",
                endpoint, cache_size, cache_ttl
            );
        }
        None => warn!("No search endpoint configured, /search will answer 503"),
    }

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
