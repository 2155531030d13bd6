use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to recommend nearby care for a set of symptoms
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendCareRequest {
    #[validate(length(min = 1))]
    pub symptoms: Vec<String>,
    #[serde(alias = "medical_keywords", rename = "medicalKeywords", default)]
    pub medical_keywords: Vec<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[validate(range(min = 1, max = 50000))]
    #[serde(alias = "radius_meters", rename = "radiusMeters")]
    pub radius_meters: Option<u32>,
}
