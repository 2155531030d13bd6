use serde::{Deserialize, Serialize};

/// Map deep-link prefix; the place id is appended verbatim
pub const MAPS_PLACE_URL_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

/// Location used when none is supplied and geocoding fails (Durgapur, India)
pub const DEFAULT_FALLBACK_LOCATION: Coordinates = Coordinates {
    lat: 23.5224,
    lng: 87.3233,
};

/// Search radius used when the caller does not supply one
pub const DEFAULT_RADIUS_METERS: u32 = 50_000;

/// Upper bound on the number of places returned
pub const MAX_RECOMMENDATIONS: usize = 15;

/// Places rated below this are never returned
pub const MIN_RATING_FLOOR: f64 = 2.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Circle used as a location bias (text search) or restriction (nearby search)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCircle {
    pub center: Coordinates,
    pub radius_meters: u32,
}

/// Facility record as returned by the places provider, before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlaceCandidate {
    pub place_id: String,
    pub name: String,
    /// Missing when the provider omitted coordinates; such candidates are never ranked
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub user_ratings_total: u32,
    #[serde(default)]
    pub address: String,
}

impl RawPlaceCandidate {
    /// Text used for keyword matching and semantic similarity: name followed by type tags
    pub fn place_text(&self) -> String {
        let mut text = self.name.clone();
        text.push(' ');
        text.push_str(&self.types.join(" "));
        text
    }
}

/// Scored, ranked care recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarePlace {
    pub name: String,
    pub address: String,
    pub rating: f64,
    #[serde(rename = "userRatingsTotal")]
    pub user_ratings_total: u32,
    #[serde(rename = "distanceMeters")]
    pub distance_meters: f64,
    #[serde(rename = "matchPercent")]
    pub match_percent: f64,
    #[serde(rename = "placeId")]
    pub place_id: String,
    pub url: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "matchedKeywords")]
    pub matched_keywords: Vec<String>,
}

/// Build the map deep link for a place id
pub fn place_url(place_id: &str) -> String {
    format!("{}{}", MAPS_PLACE_URL_PREFIX, place_id)
}

/// How the query coordinates of a recommendation were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Provided,
    Geocoded,
    Fallback,
}

/// Ordering applied among places at exactly the same distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lower match percent first (historical behaviour)
    #[default]
    LowerMatchFirst,
    HigherMatchFirst,
}

/// Scoring weights, in match-percent points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub rating: f64,
    /// Points per matched keyword, uncapped before clamping
    pub keyword: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 50.0,
            rating: 30.0,
            keyword: 20.0,
        }
    }
}

/// Ranking limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    pub max_results: usize,
    pub min_rating: f64,
    pub tie_break: TieBreak,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            max_results: MAX_RECOMMENDATIONS,
            min_rating: MIN_RATING_FLOOR,
            tie_break: TieBreak::LowerMatchFirst,
        }
    }
}
