use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use care_finder::config::Settings;
use care_finder::core::{HashEmbedder, Ranker};
use care_finder::models::ScoringWeights;
use care_finder::routes::{self, care::AppState};
use care_finder::services::{
    CandidateSearch, CareRecommender, GeocodingClient, PlacesClient, RecommendationCache,
};
use std::sync::Arc;
use tracing::{info, error};
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
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // LOG_LEVEL / LOG_FORMAT win over the logging section
    let (default_level, default_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(default_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(default_format);
    init_logging(&log_level, &log_format);

    info!("Starting care-finder recommendation service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io_error(format!("Configuration error: {}", e))
    })?;

    info!("Configuration loaded successfully");

    if settings.google.api_key.trim().is_empty() {
        tracing::warn!("No Google API key configured; place searches will return no results");
    }

    let timeout = settings.google.request_timeout();

    let places = PlacesClient::new(
        settings.google.places_base_url.clone(),
        settings.google.api_key.clone(),
        settings.search.max_results_per_call,
        timeout,
    )
    .map_err(|e| {
        error!("Failed to build places client: {}", e);
        io_error(e)
    })?;

    let geocoder = GeocodingClient::new(
        settings.google.geocode_url.clone(),
        settings.google.api_key.clone(),
        settings.location.fallback(),
        timeout,
    )
    .map_err(|e| {
        error!("Failed to build geocoding client: {}", e);
        io_error(e)
    })?;

    info!("Google clients initialized (timeout: {:?})", timeout);

    let embedder = Arc::new(HashEmbedder::new(settings.ranking.embedding_dimension));
    let weights = ScoringWeights::from(&settings.ranking.weights);
    let ranker = Ranker::new(weights, settings.ranking.to_options(), embedder);

    info!("Ranker initialized: {:?}", ranker);

    let search = CandidateSearch::new(Arc::new(places), settings.search.to_options());

    let recommender = CareRecommender::new(search, ranker, Arc::new(geocoder))
        .with_default_radius(settings.search.default_radius_meters);

    let cache = if settings.cache.enabled {
        info!(
            "Recommendation cache enabled ({} entries, TTL: {}s)",
            settings.cache.capacity, settings.cache.ttl_secs
        );
        Some(Arc::new(RecommendationCache::new(
            settings.cache.capacity,
            settings.cache.ttl_secs,
        )))
    } else {
        info!("Recommendation cache disabled");
        None
    };

    // Build application state
    let app_state = AppState {
        recommender: Arc::new(recommender),
        cache,
    };

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
