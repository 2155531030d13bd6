use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while resolving an address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("No results for address: {0}")]
    NoResults(String),

    #[error("Address is empty")]
    EmptyAddress,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Address-to-coordinates resolution
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve an address, reporting why resolution failed
    async fn try_geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;

    /// Location returned when resolution fails
    fn fallback(&self) -> Coordinates;

    /// Resolve an address, degrading to [`Geocoder::fallback`] on any failure
    async fn geocode(&self, address: &str) -> Coordinates {
        match self.try_geocode(address).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!("Geocoding failed for {:?}, using fallback: {}", address, e);
                self.fallback()
            }
        }
    }
}

/// Google Geocoding API client
pub struct GeocodingClient {
    base_url: String,
    api_key: String,
    fallback: Coordinates,
    client: Client,
}

impl GeocodingClient {
    /// Create a new geocoding client
    pub fn new(
        base_url: String,
        api_key: String,
        fallback: Coordinates,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            fallback,
            client,
        })
    }
}

/// Extract the first result's location from a geocoding response body
pub fn parse_geocode_response(json: &Value, address: &str) -> Result<Coordinates, GeocodeError> {
    let status = json
        .get("status")
        .and_then(|s| s.as_str())
        .ok_or_else(|| GeocodeError::InvalidResponse("Missing status".into()))?;

    match status {
        "OK" => {}
        "ZERO_RESULTS" => return Err(GeocodeError::NoResults(address.to_string())),
        other => return Err(GeocodeError::ApiError(other.to_string())),
    }

    let location = json
        .get("results")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .ok_or_else(|| GeocodeError::NoResults(address.to_string()))?
        .pointer("/geometry/location")
        .ok_or_else(|| GeocodeError::InvalidResponse("Missing geometry.location".into()))?;

    let lat = location.get("lat").and_then(|v| v.as_f64());
    let lng = location.get("lng").and_then(|v| v.as_f64());

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
        _ => Err(GeocodeError::InvalidResponse("Location is not numeric".into())),
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn try_geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let url = format!(
            "{}?address={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        );

        tracing::debug!("Geocoding address: {}", address);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Geocoding returned {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        parse_geocode_response(&json, address)
    }

    fn fallback(&self) -> Coordinates {
        self.fallback
    }
}
