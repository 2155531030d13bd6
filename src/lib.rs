//! Care Finder - nearby medical care recommendations
//!
//! Given a symptom description, extracted medical keywords and a location, this
//! library searches nearby care facilities and ranks them by distance with an
//! explainable match score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{haversine_distance, Embedder, HashEmbedder, Ranker};
pub use models::{CarePlace, Coordinates, LocationSource, RawPlaceCandidate, RecommendCareRequest, RecommendCareResponse};
pub use services::{CareQuery, CareRecommender, Recommendation};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let ranked = Ranker::with_defaults().rank(
            vec![],
            "fever",
            Coordinates::new(23.5224, 87.3233),
            &[],
        );
        assert!(ranked.places.is_empty());
        assert_eq!(haversine_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }
}
