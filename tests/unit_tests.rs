// Unit tests for Care Finder

use care_finder::core::{
    distance::{haversine_distance, EARTH_RADIUS_M},
    embedding::{cosine_similarity, Embedder, HashEmbedder},
    filters::{dedup_and_filter, keyword_boost, normalize_keywords},
    ranker::{compare_places, Ranker},
    scoring::calculate_match_score,
};
use care_finder::models::{
    Coordinates, RankingOptions, RawPlaceCandidate, ScoringWeights, TieBreak,
};
use std::sync::Arc;

fn origin() -> Coordinates {
    Coordinates::new(23.5224, 87.3233)
}

/// Candidate `meters` due north of the origin
fn candidate_north(id: &str, name: &str, meters: f64, rating: f64) -> RawPlaceCandidate {
    let origin = origin();
    RawPlaceCandidate {
        place_id: id.to_string(),
        name: name.to_string(),
        location: Some(Coordinates::new(
            origin.lat + (meters / EARTH_RADIUS_M).to_degrees(),
            origin.lng,
        )),
        types: vec!["doctor".to_string()],
        rating,
        user_ratings_total: 10,
        address: String::new(),
    }
}

fn keywords(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(23.5224, 87.3233, 23.5224, 87.3233);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_kolkata_to_durgapur() {
    // Roughly 160 km by air
    let distance = haversine_distance(22.5726, 88.3639, 23.5204, 87.3119);
    assert!(distance > 140_000.0 && distance < 160_000.0, "got {}", distance);
}

#[test]
fn test_haversine_is_symmetric() {
    let a = haversine_distance(10.0, 20.0, -5.0, 40.0);
    let b = haversine_distance(-5.0, 40.0, 10.0, 20.0);
    assert!((a - b).abs() < 1e-6);
}

#[test]
fn test_match_score_bounds() {
    let weights = ScoringWeights::default();

    let max = calculate_match_score(1.0, 5.0, 10, &weights);
    assert_eq!(max.match_percent, 100.0);

    let min = calculate_match_score(-1.0, 0.0, 0, &weights);
    assert_eq!(min.match_percent, 0.0);
}

#[test]
fn test_match_score_rating_term_capped() {
    let weights = ScoringWeights::default();
    let five = calculate_match_score(0.0, 5.0, 0, &weights);
    let ten = calculate_match_score(0.0, 10.0, 0, &weights);
    assert_eq!(five.match_percent, 30.0);
    assert_eq!(ten.match_percent, 30.0);
}

#[test]
fn test_match_score_keyword_steps() {
    let weights = ScoringWeights::default();
    let score = calculate_match_score(0.0, 2.5, 2, &weights);
    // 0.5 * 30 + 2 * 20
    assert_eq!(score.match_percent, 55.0);
}

#[test]
fn test_keyword_boost_case_insensitive() {
    let (boost, matched) = keyword_boost(
        &keywords(&["HOSPITAL", "dentist"]),
        "Durgapur Mission Hospital hospital health",
    );
    assert_eq!(boost, 1);
    assert_eq!(matched, vec!["HOSPITAL"]);
}

#[test]
fn test_keyword_boost_matches_specialty_stem() {
    let (boost, matched) = keyword_boost(&keywords(&["cardiologist"]), "City Cardiology Clinic doctor");
    assert_eq!(boost, 1);
    assert_eq!(matched, vec!["cardiologist"]);
}

#[test]
fn test_normalize_keywords_drops_blanks() {
    let normalized = normalize_keywords(&keywords(&["  cardiologist ", "", "   "]));
    assert_eq!(normalized, vec!["cardiologist"]);
}

#[test]
fn test_dedup_keeps_first_and_applies_floor() {
    let candidates = vec![
        candidate_north("a", "First", 100.0, 4.0),
        candidate_north("a", "Second", 200.0, 4.5),
        candidate_north("low", "Low", 300.0, 1.5),
        candidate_north("floor", "Floor", 400.0, 2.0),
    ];

    let kept = dedup_and_filter(candidates, 2.0);

    let names: Vec<_> = kept.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Floor"]);
}

#[test]
fn test_embedder_is_deterministic_and_normalized() {
    let embedder = HashEmbedder::new(128);
    let a = embedder.embed("severe chest pain");
    let b = embedder.embed("severe chest pain");

    assert_eq!(a.len(), 128);
    assert_eq!(a, b);
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&a, &embedder.embed("")), 0.0);
}

#[test]
fn test_rank_sorted_by_distance() {
    let ranker = Ranker::with_defaults();
    let candidates = vec![
        candidate_north("far", "Far Clinic", 3000.0, 4.0),
        candidate_north("near", "Near Clinic", 200.0, 3.0),
        candidate_north("mid", "Mid Clinic", 1200.0, 5.0),
    ];

    let result = ranker.rank(candidates, "fever", origin(), &[]);

    let ids: Vec<_> = result.places.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, vec!["near", "mid", "far"]);
    for pair in result.places.windows(2) {
        assert!(pair[0].distance_meters <= pair[1].distance_meters);
    }
}

#[test]
fn test_rank_distance_matches_meridian_arc() {
    let ranker = Ranker::with_defaults();
    let result = ranker.rank(
        vec![candidate_north("p", "Clinic", 750.0, 4.0)],
        "fever",
        origin(),
        &[],
    );

    // Due north, so the great-circle distance is the meridian arc
    let place = &result.places[0];
    let expected = EARTH_RADIUS_M * (place.lat - origin().lat).to_radians();
    assert!((place.distance_meters - expected).abs() <= expected * 1e-3);
    assert!((place.distance_meters - 750.0).abs() < 1.0);
}

#[test]
fn test_rank_equal_distance_tie_break() {
    let candidates = vec![
        candidate_north("high", "General Clinic", 500.0, 5.0),
        candidate_north("low", "General Clinic", 500.0, 2.5),
    ];

    let default_ranker = Ranker::with_defaults();
    let result = default_ranker.rank(candidates.clone(), "fever", origin(), &[]);
    assert_eq!(result.places[0].place_id, "low");

    let options = RankingOptions {
        tie_break: TieBreak::HigherMatchFirst,
        ..RankingOptions::default()
    };
    let ranker = Ranker::new(
        ScoringWeights::default(),
        options,
        Arc::new(HashEmbedder::default()),
    );
    let result = ranker.rank(candidates, "fever", origin(), &[]);
    assert_eq!(result.places[0].place_id, "high");

    assert_eq!(
        compare_places(&result.places[0], &result.places[1], TieBreak::HigherMatchFirst),
        std::cmp::Ordering::Less
    );
}

#[test]
fn test_rank_caps_results() {
    let ranker = Ranker::with_defaults();
    let candidates = (0..40)
        .map(|i| candidate_north(&i.to_string(), "Clinic", 100.0 * (i + 1) as f64, 4.0))
        .collect();

    let result = ranker.rank(candidates, "fever", origin(), &[]);

    assert_eq!(result.places.len(), 15);
    assert_eq!(result.places[0].place_id, "0");
}

#[test]
fn test_rank_skips_candidates_without_location() {
    let mut missing = candidate_north("missing", "Clinic", 100.0, 4.0);
    missing.location = None;

    let result = Ranker::with_defaults().rank(vec![missing], "fever", origin(), &[]);

    assert!(result.places.is_empty());
}
