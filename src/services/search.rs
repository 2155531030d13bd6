use crate::core::filters::dedup_and_filter;
use crate::models::{Coordinates, RawPlaceCandidate, SearchCircle};
use crate::services::places::PlacesProvider;
use std::sync::Arc;

/// Candidate search limits
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Keywords beyond this many are not searched
    pub keyword_query_limit: usize,
    /// Place types requested by the generic nearby search
    pub facility_types: Vec<String>,
    pub min_rating: f64,
    /// Cap applied after dedup and rating filter
    pub max_candidates: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keyword_query_limit: 3,
            facility_types: vec![
                "hospital".to_string(),
                "doctor".to_string(),
                "pharmacy".to_string(),
            ],
            min_rating: 2.0,
            max_candidates: 15,
        }
    }
}

/// Outcome of a single provider call
#[derive(Debug)]
pub enum SearchOutcome {
    Success {
        source: String,
        places: Vec<RawPlaceCandidate>,
    },
    Failure {
        source: String,
        reason: String,
    },
}

impl SearchOutcome {
    /// Places from a successful call; a failed call contributes nothing
    pub fn into_places(self) -> Vec<RawPlaceCandidate> {
        match self {
            SearchOutcome::Success { places, .. } => places,
            SearchOutcome::Failure { .. } => Vec::new(),
        }
    }

    /// `(source, reason)` of a failed call
    pub fn failure(&self) -> Option<(&str, &str)> {
        match self {
            SearchOutcome::Failure { source, reason } => Some((source.as_str(), reason.as_str())),
            SearchOutcome::Success { .. } => None,
        }
    }
}

/// Keyword-driven plus generic facility search over a places provider
///
/// Issues one text search per keyword (up to `keyword_query_limit`) and one
/// nearby search for `facility_types`, sequentially, then merges, filters by
/// rating and dedups by place id. Provider failures never abort the search.
#[derive(Clone)]
pub struct CandidateSearch {
    provider: Arc<dyn PlacesProvider>,
    options: SearchOptions,
}

impl CandidateSearch {
    pub fn new(provider: Arc<dyn PlacesProvider>, options: SearchOptions) -> Self {
        Self { provider, options }
    }

    /// Run every provider call and report each outcome, in merge order
    pub async fn run_searches(
        &self,
        origin: Coordinates,
        keywords: &[String],
        radius_meters: u32,
    ) -> Vec<SearchOutcome> {
        let circle = SearchCircle {
            center: origin,
            radius_meters,
        };

        let mut outcomes = Vec::new();

        for keyword in keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .take(self.options.keyword_query_limit)
        {
            let source = format!("text:{}", keyword);
            let outcome = match self.provider.text_search(keyword, circle).await {
                Ok(places) => {
                    tracing::debug!("Text search returned {} places for '{}'", places.len(), keyword);
                    SearchOutcome::Success { source, places }
                }
                Err(e) => SearchOutcome::Failure {
                    source,
                    reason: e.to_string(),
                },
            };
            outcomes.push(outcome);
        }

        let source = "nearby".to_string();
        let outcome = match self
            .provider
            .nearby_search(&self.options.facility_types, circle)
            .await
        {
            Ok(places) => {
                tracing::debug!("Nearby search returned {} places", places.len());
                SearchOutcome::Success { source, places }
            }
            Err(e) => SearchOutcome::Failure {
                source,
                reason: e.to_string(),
            },
        };
        outcomes.push(outcome);

        outcomes
    }

    /// Search candidates around `origin`
    ///
    /// # Returns
    /// Deduplicated candidates rated at least `min_rating`, at most `max_candidates`
    pub async fn search_candidates(
        &self,
        origin: Coordinates,
        keywords: &[String],
        radius_meters: u32,
    ) -> Vec<RawPlaceCandidate> {
        let outcomes = self.run_searches(origin, keywords, radius_meters).await;

        let mut failures = 0;
        for (source, reason) in outcomes.iter().filter_map(SearchOutcome::failure) {
            failures += 1;
            tracing::warn!("Place search {} failed: {}", source, reason);
        }
        if failures > 0 {
            tracing::warn!("{} of {} place searches failed", failures, outcomes.len());
        }

        let merged = outcomes.into_iter().flat_map(SearchOutcome::into_places);

        let mut candidates = dedup_and_filter(merged, self.options.min_rating);
        candidates.truncate(self.options.max_candidates);

        tracing::debug!("Kept {} candidates after filtering", candidates.len());

        candidates
    }
}
