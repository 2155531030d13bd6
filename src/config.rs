use crate::models::{
    Coordinates, RankingOptions, ScoringWeights, TieBreak, DEFAULT_FALLBACK_LOCATION,
    DEFAULT_RADIUS_METERS, MAX_RECOMMENDATIONS, MIN_RATING_FLOOR,
};
use crate::services::SearchOptions;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub google: GoogleSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    pub api_key: String,
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GoogleSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_places_base_url() -> String { "https://places.googleapis.com/v1".to_string() }
fn default_geocode_url() -> String { "https://maps.googleapis.com/maps/api/geocode/json".to_string() }
fn default_request_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_keyword_query_limit")]
    pub keyword_query_limit: usize,
    #[serde(default = "default_max_results_per_call")]
    pub max_results_per_call: u32,
    #[serde(default = "default_facility_types")]
    pub facility_types: Vec<String>,
    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: u32,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default = "default_max_results")]
    pub max_candidates: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            keyword_query_limit: default_keyword_query_limit(),
            max_results_per_call: default_max_results_per_call(),
            facility_types: default_facility_types(),
            default_radius_meters: default_radius_meters(),
            min_rating: default_min_rating(),
            max_candidates: default_max_results(),
        }
    }
}

impl SearchSettings {
    /// Configured values may tighten the result cap and rating floor, never loosen them
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            keyword_query_limit: self.keyword_query_limit,
            facility_types: self.facility_types.clone(),
            min_rating: self.min_rating.max(MIN_RATING_FLOOR),
            max_candidates: self.max_candidates.min(MAX_RECOMMENDATIONS),
        }
    }
}

fn default_keyword_query_limit() -> usize { 3 }
fn default_max_results_per_call() -> u32 { 10 }
fn default_facility_types() -> Vec<String> {
    vec!["hospital".to_string(), "doctor".to_string(), "pharmacy".to_string()]
}
fn default_radius_meters() -> u32 { DEFAULT_RADIUS_METERS }
fn default_min_rating() -> f64 { MIN_RATING_FLOOR }
fn default_max_results() -> usize { MAX_RECOMMENDATIONS }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            min_rating: default_min_rating(),
            tie_break: TieBreak::default(),
            embedding_dimension: default_embedding_dimension(),
            weights: WeightsConfig::default(),
        }
    }
}

impl RankingSettings {
    /// Configured values may tighten the result cap and rating floor, never loosen them
    pub fn to_options(&self) -> RankingOptions {
        RankingOptions {
            max_results: self.max_results.min(MAX_RECOMMENDATIONS),
            min_rating: self.min_rating.max(MIN_RATING_FLOOR),
            tie_break: self.tie_break,
        }
    }
}

fn default_embedding_dimension() -> usize { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_similarity_weight")]
    pub similarity: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            similarity: default_similarity_weight(),
            rating: default_rating_weight(),
            keyword: default_keyword_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            similarity: config.similarity,
            rating: config.rating,
            keyword: config.keyword,
        }
    }
}

fn default_similarity_weight() -> f64 { 50.0 }
fn default_rating_weight() -> f64 { 30.0 }
fn default_keyword_weight() -> f64 { 20.0 }

/// Location used when the request has no coordinates and geocoding fails
#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_fallback_lat")]
    pub fallback_lat: f64,
    #[serde(default = "default_fallback_lng")]
    pub fallback_lng: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            fallback_lat: default_fallback_lat(),
            fallback_lng: default_fallback_lng(),
        }
    }
}

impl LocationSettings {
    pub fn fallback(&self) -> Coordinates {
        Coordinates::new(self.fallback_lat, self.fallback_lng)
    }
}

fn default_fallback_lat() -> f64 { DEFAULT_FALLBACK_LOCATION.lat }
fn default_fallback_lng() -> f64 { DEFAULT_FALLBACK_LOCATION.lng }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_true() -> bool { true }
fn default_cache_ttl_secs() -> u64 { 300 }
fn default_cache_capacity() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARE_)
    /// 5. GOOGLE_API_KEY, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

}

/// Apply well-known environment variables that do not follow the CARE__ scheme
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("GOOGLE_API_KEY") {
        builder = builder.set_override("google.api_key", api_key)?;
    }

    builder.build()
}
