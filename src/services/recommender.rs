use crate::core::{filters::normalize_keywords, Ranker};
use crate::models::{CarePlace, Coordinates, LocationSource, DEFAULT_RADIUS_METERS};
use crate::services::{geocoder::Geocoder, search::CandidateSearch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inputs of one recommendation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareQuery {
    pub symptoms: Vec<String>,
    pub medical_keywords: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub radius_meters: Option<u32>,
}

impl CareQuery {
    pub fn new(symptoms: Vec<String>, medical_keywords: Vec<String>) -> Self {
        Self {
            symptoms,
            medical_keywords,
            ..Self::default()
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = Some(radius_meters);
        self
    }

    /// Symptoms joined into the text that gets embedded
    pub fn symptom_text(&self) -> String {
        self.symptoms.join(" ")
    }
}

/// Ranked places plus the coordinates they were ranked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub places: Vec<CarePlace>,
    pub location: Coordinates,
    pub location_source: LocationSource,
    pub total_candidates: usize,
}

/// Care recommendation orchestrator
///
/// Resolves the query location, runs candidate search and ranks the result.
/// Every failure inside degrades to a smaller or empty list.
#[derive(Clone)]
pub struct CareRecommender {
    search: CandidateSearch,
    ranker: Ranker,
    geocoder: Arc<dyn Geocoder>,
    default_radius_meters: u32,
}

impl CareRecommender {
    pub fn new(
        search: CandidateSearch,
        ranker: Ranker,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            search,
            ranker,
            geocoder,
            default_radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    pub fn with_default_radius(mut self, radius_meters: u32) -> Self {
        if radius_meters > 0 {
            self.default_radius_meters = radius_meters;
        }
        self
    }

    /// Coordinates for the query and where they came from
    ///
    /// Explicit coordinates win; otherwise a non-blank address is geocoded;
    /// otherwise (or if geocoding fails) the geocoder's fallback is used.
    pub async fn resolve_location(&self, query: &CareQuery) -> (Coordinates, LocationSource) {
        if let (Some(lat), Some(lng)) = (query.lat, query.lng) {
            return (Coordinates::new(lat, lng), LocationSource::Provided);
        }

        if let Some(address) = query.address.as_deref().filter(|a| !a.trim().is_empty()) {
            match self.geocoder.try_geocode(address).await {
                Ok(coordinates) => return (coordinates, LocationSource::Geocoded),
                Err(e) => {
                    tracing::warn!("Could not geocode {:?}, using fallback location: {}", address, e);
                }
            }
        }

        (self.geocoder.fallback(), LocationSource::Fallback)
    }

    /// Recommend nearby care for the query
    pub async fn recommend_care(&self, query: &CareQuery) -> Recommendation {
        let (location, location_source) = self.resolve_location(query).await;

        let radius_meters = query
            .radius_meters
            .filter(|r| *r > 0)
            .unwrap_or(self.default_radius_meters);

        let keywords = normalize_keywords(&query.medical_keywords);
        let symptom_text = query.symptom_text();

        tracing::info!(
            "Recommending care for '{}' with keywords {:?} at ({}, {}) [{:?}], radius {}m",
            symptom_text,
            keywords,
            location.lat,
            location.lng,
            location_source,
            radius_meters
        );

        let candidates = self
            .search
            .search_candidates(location, &keywords, radius_meters)
            .await;

        let result = self.ranker.rank(candidates, &symptom_text, location, &keywords);

        tracing::info!(
            "Found {} scored recommendations (from {} candidates)",
            result.places.len(),
            result.total_candidates
        );

        Recommendation {
            places: result.places,
            location,
            location_source,
            total_candidates: result.total_candidates,
        }
    }
}
