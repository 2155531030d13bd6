use serde::{Deserialize, Serialize};
use crate::models::domain::{CarePlace, LocationSource};
use crate::services::Recommendation;

/// Response for the recommend care endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendCareResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub places: Vec<CarePlace>,
    /// Coordinates the search was centred on
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "locationSource")]
    pub location_source: LocationSource,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub cached: bool,
}

impl RecommendCareResponse {
    pub fn new(request_id: String, recommendation: Recommendation, cached: bool) -> Self {
        Self {
            request_id,
            total_results: recommendation.places.len(),
            latitude: recommendation.location.lat,
            longitude: recommendation.location.lng,
            location_source: recommendation.location_source,
            places: recommendation.places,
            cached,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
