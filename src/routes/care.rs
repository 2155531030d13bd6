use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ErrorResponse, HealthResponse, RecommendCareRequest, RecommendCareResponse};
use crate::services::{CacheKey, CareQuery, CareRecommender, RecommendationCache};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<CareRecommender>,
    /// `None` when caching is disabled in configuration
    pub cache: Option<Arc<RecommendationCache>>,
}

/// Configure all care-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/care/recommend", web::post().to(recommend_care));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

impl From<RecommendCareRequest> for CareQuery {
    fn from(req: RecommendCareRequest) -> Self {
        CareQuery {
            symptoms: req.symptoms,
            medical_keywords: req.medical_keywords,
            lat: req.lat,
            lng: req.lng,
            address: req.address,
            radius_meters: req.radius_meters,
        }
    }
}

/// Recommend care endpoint
///
/// POST /api/v1/care/recommend
///
/// Request body:
/// ```json
/// {
///   "symptoms": ["chest pain"],
///   "medicalKeywords": ["cardiologist"],
///   "lat": 23.5224,
///   "lng": 87.3233,
///   "address": "Durgapur",
///   "radiusMeters": 5000
/// }
/// ```
///
/// Provider failures degrade to fewer (or zero) places; this endpoint only
/// fails on invalid input.
async fn recommend_care(
    state: web::Data<AppState>,
    req: web::Json<RecommendCareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend_care request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let query = CareQuery::from(req.into_inner());
    let cache_key = CacheKey::recommendation(&query);

    if let Some(cache) = &state.cache {
        if let Some(recommendation) = cache.get(&cache_key).await {
            tracing::info!("[{}] Serving {} cached places", request_id, recommendation.places.len());
            return HttpResponse::Ok().json(RecommendCareResponse::new(
                request_id,
                recommendation,
                true,
            ));
        }
    }

    let recommendation = state.recommender.recommend_care(&query).await;

    if let Some(cache) = &state.cache {
        cache.set(&cache_key, &recommendation).await;
    }

    tracing::info!("[{}] Returning {} places", request_id, recommendation.places.len());

    HttpResponse::Ok().json(RecommendCareResponse::new(request_id, recommendation, false))
}
