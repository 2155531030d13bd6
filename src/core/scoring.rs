use crate::models::{place_url, CarePlace, Coordinates, RawPlaceCandidate, ScoringWeights};
use crate::core::{
    distance::haversine_distance,
    embedding::{cosine_similarity, Embedder},
    filters::keyword_boost,
};

/// Intermediate scoring terms, kept for explainability and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub similarity: f64,
    pub rating_norm: f64,
    pub keyword_boost: usize,
    pub relevance: f64,
    pub match_percent: f64,
}

/// Calculate the match percent (0-100) from the individual scoring terms
///
/// Scoring formula:
/// relevance = (
///     similarity * 50 +       # cosine(symptom text, place text)
///     rating_norm * 30 +      # rating / 5, capped at 1
///     keyword_boost * 20      # one step per matched keyword, uncapped
/// )
/// match_percent = clamp(relevance, 0, 100), rounded to one decimal
pub fn calculate_match_score(
    similarity: f64,
    rating: f64,
    keyword_boost: usize,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let rating_norm = normalize_rating(rating);

    let relevance = similarity * weights.similarity
        + rating_norm * weights.rating
        + keyword_boost as f64 * weights.keyword;

    ScoreBreakdown {
        similarity,
        rating_norm,
        keyword_boost,
        relevance,
        match_percent: round_one_decimal(relevance.clamp(0.0, 100.0)),
    }
}

/// Rating normalised to 0-1
#[inline]
pub fn normalize_rating(rating: f64) -> f64 {
    (rating / 5.0).min(1.0)
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score a single candidate against the query
///
/// Returns `None` when the candidate has no coordinates.
pub fn score_candidate(
    candidate: RawPlaceCandidate,
    origin: Coordinates,
    symptom_embedding: &[f32],
    keywords: &[String],
    embedder: &dyn Embedder,
    weights: &ScoringWeights,
) -> Option<CarePlace> {
    let location = candidate.location?;

    let distance_meters = haversine_distance(origin.lat, origin.lng, location.lat, location.lng);

    let place_text = candidate.place_text();
    let (boost, matched_keywords) = keyword_boost(keywords, &place_text);
    let similarity = cosine_similarity(symptom_embedding, &embedder.embed(&place_text));

    let score = calculate_match_score(similarity, candidate.rating, boost, weights);

    tracing::trace!(
        "Scored {}: sim={:.3} rating={:.2} boost={} -> {}",
        candidate.place_id,
        score.similarity,
        score.rating_norm,
        score.keyword_boost,
        score.match_percent
    );

    Some(CarePlace {
        url: place_url(&candidate.place_id),
        name: candidate.name,
        address: candidate.address,
        rating: candidate.rating,
        user_ratings_total: candidate.user_ratings_total,
        distance_meters,
        match_percent: score.match_percent,
        place_id: candidate.place_id,
        lat: location.lat,
        lng: location.lng,
        matched_keywords,
    })
}
