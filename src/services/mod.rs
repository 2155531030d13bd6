// Service exports
pub mod cache;
pub mod geocoder;
pub mod places;
pub mod recommender;
pub mod search;

pub use cache::{CacheKey, RecommendationCache};
pub use geocoder::{GeocodeError, Geocoder, GeocodingClient};
pub use places::{PlacesClient, PlacesError, PlacesProvider};
pub use recommender::{CareQuery, CareRecommender, Recommendation};
pub use search::{CandidateSearch, SearchOptions, SearchOutcome};
