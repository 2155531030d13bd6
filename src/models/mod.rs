// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    place_url, CarePlace, Coordinates, LocationSource, RankingOptions, RawPlaceCandidate,
    ScoringWeights, SearchCircle, TieBreak, DEFAULT_FALLBACK_LOCATION, DEFAULT_RADIUS_METERS,
    MAPS_PLACE_URL_PREFIX, MAX_RECOMMENDATIONS, MIN_RATING_FLOOR,
};
pub use requests::RecommendCareRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendCareResponse};
