use crate::models::{Coordinates, RawPlaceCandidate, SearchCircle};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Fields requested from the places provider
pub const PLACES_FIELD_MASK: &str = "places.id,places.displayName,places.location,places.types,places.rating,places.userRatingCount,places.formattedAddress";

/// Errors that can occur when querying the places provider
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Places-search provider boundary
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Free-text search biased toward `circle`
    async fn text_search(
        &self,
        query: &str,
        circle: SearchCircle,
    ) -> Result<Vec<RawPlaceCandidate>, PlacesError>;

    /// Search for places of the given types restricted to `circle`
    async fn nearby_search(
        &self,
        included_types: &[String],
        circle: SearchCircle,
    ) -> Result<Vec<RawPlaceCandidate>, PlacesError>;
}

/// Google Places API (New) client
///
/// Handles the two search calls used by candidate search:
/// - `places:searchText` with a location bias circle
/// - `places:searchNearby` with a location restriction circle
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    max_result_count: u32,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

/// Place entry as returned by the provider
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    id: String,
    #[serde(rename = "displayName")]
    display_name: Option<LocalizedText>,
    location: Option<LatLng>,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    #[serde(rename = "userRatingCount")]
    user_rating_count: Option<u32>,
    #[serde(rename = "formattedAddress")]
    formatted_address: Option<String>,
}

impl From<PlaceRecord> for RawPlaceCandidate {
    fn from(record: PlaceRecord) -> Self {
        RawPlaceCandidate {
            place_id: record.id,
            name: record
                .display_name
                .map(|n| n.text)
                .unwrap_or_else(|| "Unknown".to_string()),
            location: record
                .location
                .map(|l| Coordinates::new(l.latitude, l.longitude)),
            types: record.types,
            rating: record.rating.unwrap_or(0.0),
            user_ratings_total: record.user_rating_count.unwrap_or(0),
            address: record.formatted_address.unwrap_or_default(),
        }
    }
}

fn circle_json(circle: SearchCircle) -> Value {
    json!({
        "circle": {
            "center": {
                "latitude": circle.center.lat,
                "longitude": circle.center.lng,
            },
            "radius": circle.radius_meters,
        }
    })
}

/// Extract candidates from a search response body
///
/// A body without a `places` key means no results. Individual entries that
/// cannot be parsed (e.g. missing `id`) are skipped.
pub fn parse_places(json: &Value) -> Result<Vec<RawPlaceCandidate>, PlacesError> {
    if !json.is_object() {
        return Err(PlacesError::InvalidResponse("Expected a JSON object".into()));
    }

    let places = match json.get("places") {
        None => return Ok(Vec::new()),
        Some(places) => places
            .as_array()
            .ok_or_else(|| PlacesError::InvalidResponse("places is not an array".into()))?,
    };

    let candidates = places
        .iter()
        .filter_map(|place| match serde_json::from_value::<PlaceRecord>(place.clone()) {
            Ok(record) => Some(RawPlaceCandidate::from(record)),
            Err(e) => {
                tracing::debug!("Skipping malformed place entry: {}", e);
                None
            }
        })
        .collect();

    Ok(candidates)
}

impl PlacesClient {
    /// Create a new places client
    pub fn new(
        base_url: String,
        api_key: String,
        max_result_count: u32,
        timeout: Duration,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            max_result_count,
            client,
        })
    }

    async fn post_search(
        &self,
        endpoint: &str,
        payload: Value,
    ) -> Result<Vec<RawPlaceCandidate>, PlacesError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        tracing::debug!("Querying places provider: {}", url);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PLACES_FIELD_MASK)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(PlacesError::ApiError(format!("{} returned {}: {}", endpoint, status, body)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        parse_places(&json)
    }
}

#[async_trait]
impl PlacesProvider for PlacesClient {
    async fn text_search(
        &self,
        query: &str,
        circle: SearchCircle,
    ) -> Result<Vec<RawPlaceCandidate>, PlacesError> {
        let payload = json!({
            "textQuery": query,
            "locationBias": circle_json(circle),
            "maxResultCount": self.max_result_count,
        });

        self.post_search("places:searchText", payload).await
    }

    async fn nearby_search(
        &self,
        included_types: &[String],
        circle: SearchCircle,
    ) -> Result<Vec<RawPlaceCandidate>, PlacesError> {
        let payload = json!({
            "includedTypes": included_types,
            "maxResultCount": self.max_result_count,
            "locationRestriction": circle_json(circle),
        });

        self.post_search("places:searchNearby", payload).await
    }
}
