use crate::models::{CarePlace, Coordinates, RankingOptions, RawPlaceCandidate, ScoringWeights, TieBreak};
use crate::core::{
    embedding::{Embedder, HashEmbedder},
    filters::dedup_and_filter,
    scoring::score_candidate,
};
use std::cmp::Ordering;
use std::sync::Arc;

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub places: Vec<CarePlace>,
    pub total_candidates: usize,
}

/// Scoring and ranking engine
///
/// # Pipeline Stages
/// 1. Rating floor and dedup by place id
/// 2. Distance, keyword and semantic scoring (candidates without coordinates dropped)
/// 3. Sort by distance, ties broken by match percent
/// 4. Truncate to `max_results`
#[derive(Clone)]
pub struct Ranker {
    weights: ScoringWeights,
    options: RankingOptions,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field("weights", &self.weights)
            .field("options", &self.options)
            .field("embedder", &self.embedder.id())
            .finish()
    }
}

impl Ranker {
    pub fn new(weights: ScoringWeights, options: RankingOptions, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            weights,
            options,
            embedder,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            ScoringWeights::default(),
            RankingOptions::default(),
            Arc::new(HashEmbedder::default()),
        )
    }

    /// Score and rank candidates for a symptom description
    ///
    /// # Arguments
    /// * `candidates` - Places returned by the search adapter
    /// * `symptom_text` - Symptoms joined into one string
    /// * `origin` - Query location
    /// * `keywords` - Extracted medical keywords, in priority order
    ///
    /// # Returns
    /// RankResult with at most `max_results` places
    pub fn rank(
        &self,
        candidates: Vec<RawPlaceCandidate>,
        symptom_text: &str,
        origin: Coordinates,
        keywords: &[String],
    ) -> RankResult {
        let total_candidates = candidates.len();

        if candidates.is_empty() {
            return RankResult {
                places: Vec::new(),
                total_candidates,
            };
        }

        let symptom_embedding = self.embedder.embed(symptom_text);

        // Stage 1: Rating floor and duplicate place ids
        let mut places: Vec<CarePlace> = dedup_and_filter(candidates, self.options.min_rating)
            .into_iter()
            // Stage 2: Scoring
            .filter_map(|candidate| {
                score_candidate(
                    candidate,
                    origin,
                    &symptom_embedding,
                    keywords,
                    self.embedder.as_ref(),
                    &self.weights,
                )
            })
            .collect();

        // Stage 3: Sort by distance (ascending), then by match percent
        let tie_break = self.options.tie_break;
        places.sort_by(|a, b| compare_places(a, b, tie_break));

        // Stage 4: Limit results
        places.truncate(self.options.max_results);

        RankResult {
            places,
            total_candidates,
        }
    }
}

/// Distance ascending; equal distances ordered by match percent per `tie_break`
pub fn compare_places(a: &CarePlace, b: &CarePlace, tie_break: TieBreak) -> Ordering {
    a.distance_meters
        .partial_cmp(&b.distance_meters)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            let by_match = a
                .match_percent
                .partial_cmp(&b.match_percent)
                .unwrap_or(Ordering::Equal);
            match tie_break {
                TieBreak::LowerMatchFirst => by_match,
                TieBreak::HigherMatchFirst => by_match.reverse(),
            }
        })
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: &str, lat: f64, lng: f64, rating: f64) -> RawPlaceCandidate {
        RawPlaceCandidate {
            place_id: id.to_string(),
            name: "General Clinic".to_string(),
            location: Some(Coordinates::new(lat, lng)),
            types: vec!["doctor".to_string()],
            rating,
            user_ratings_total: 10,
            address: String::new(),
        }
    }

    fn origin() -> Coordinates {
        Coordinates::new(23.5224, 87.3233)
    }

    #[test]
    fn test_rank_sorted_by_distance() {
        let ranker = Ranker::with_defaults();

        let candidates = vec![
            create_candidate("far", 23.60, 87.3233, 5.0),
            create_candidate("near", 23.53, 87.3233, 3.0),
            create_candidate("mid", 23.55, 87.3233, 4.0),
        ];

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        let ids: Vec<_> = result.places.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_equal_distance_lower_match_first() {
        let ranker = Ranker::with_defaults();

        // Same coordinates, only rating differs
        let candidates = vec![
            create_candidate("high", 23.53, 87.3233, 5.0),
            create_candidate("low", 23.53, 87.3233, 2.5),
        ];

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        assert_eq!(result.places[0].place_id, "low");
        assert!(result.places[0].match_percent <= result.places[1].match_percent);
    }

    #[test]
    fn test_equal_distance_higher_match_first_when_configured() {
        let options = RankingOptions {
            tie_break: TieBreak::HigherMatchFirst,
            ..RankingOptions::default()
        };
        let ranker = Ranker::new(
            ScoringWeights::default(),
            options,
            Arc::new(HashEmbedder::default()),
        );

        let candidates = vec![
            create_candidate("low", 23.53, 87.3233, 2.5),
            create_candidate("high", 23.53, 87.3233, 5.0),
        ];

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        assert_eq!(result.places[0].place_id, "high");
    }

    #[test]
    fn test_respects_limit() {
        let ranker = Ranker::with_defaults();

        let candidates: Vec<RawPlaceCandidate> = (0..40)
            .map(|i| create_candidate(&i.to_string(), 23.5224 + i as f64 * 0.001, 87.3233, 4.0))
            .collect();

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        assert_eq!(result.places.len(), 15);
        assert_eq!(result.total_candidates, 40);
    }

    #[test]
    fn test_low_rating_excluded() {
        let ranker = Ranker::with_defaults();

        let candidates = vec![
            create_candidate("bad", 23.53, 87.3233, 1.5),
            create_candidate("good", 23.54, 87.3233, 4.0),
        ];

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        assert_eq!(result.places.len(), 1);
        assert_eq!(result.places[0].place_id, "good");
    }

    #[test]
    fn test_duplicate_place_ids_ranked_once() {
        let ranker = Ranker::with_defaults();

        let candidates = vec![
            create_candidate("same", 23.53, 87.3233, 4.0),
            create_candidate("same", 23.525, 87.3233, 5.0),
        ];

        let result = ranker.rank(candidates, "fever", origin(), &[]);

        assert_eq!(result.places.len(), 1);
        assert_eq!(result.places[0].rating, 4.0);
    }

    #[test]
    fn test_empty_candidates() {
        let ranker = Ranker::with_defaults();
        let result = ranker.rank(vec![], "fever", origin(), &["doctor".to_string()]);

        assert!(result.places.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_missing_location_skipped() {
        let ranker = Ranker::with_defaults();
        let mut candidate = create_candidate("nowhere", 0.0, 0.0, 4.0);
        candidate.location = None;

        let result = ranker.rank(vec![candidate], "fever", origin(), &[]);

        assert!(result.places.is_empty());
    }
}
