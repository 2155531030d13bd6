// Core algorithm exports
pub mod distance;
pub mod embedding;
pub mod filters;
pub mod ranker;
pub mod scoring;

pub use distance::{haversine_distance, EARTH_RADIUS_M};
pub use embedding::{cosine_similarity, Embedder, HashEmbedder};
pub use filters::{dedup_and_filter, keyword_boost, keyword_matches, meets_rating_floor, normalize_keywords};
pub use ranker::{compare_places, RankResult, Ranker};
pub use scoring::{calculate_match_score, score_candidate, ScoreBreakdown};
