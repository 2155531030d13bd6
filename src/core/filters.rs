use crate::models::RawPlaceCandidate;
use std::collections::HashSet;

/// Maximum number of matched keywords reported per place
pub const MAX_MATCHED_KEYWORDS: usize = 3;

/// Suffixes stripped from a keyword to find its stem, longest first
const STEM_SUFFIXES: &[&str] = &["ists", "ist", "ians", "ian", "ics", "ic", "ies", "y", "s"];

/// Stems shorter than this are too ambiguous to match on
const MIN_STEM_LEN: usize = 4;

/// Check if a candidate clears the rating floor
///
/// Missing ratings are stored as 0 and therefore never pass a positive floor.
#[inline]
pub fn meets_rating_floor(candidate: &RawPlaceCandidate, min_rating: f64) -> bool {
    candidate.rating >= min_rating
}

/// Drop candidates below the rating floor and repeated place ids, keeping the first occurrence
pub fn dedup_and_filter(
    candidates: impl IntoIterator<Item = RawPlaceCandidate>,
    min_rating: f64,
) -> Vec<RawPlaceCandidate> {
    let mut seen_ids = HashSet::new();

    candidates
        .into_iter()
        .filter(|candidate| {
            if meets_rating_floor(candidate, min_rating) {
                true
            } else {
                tracing::debug!(
                    "Skipped {}: rating {} below {}",
                    candidate.name,
                    candidate.rating,
                    min_rating
                );
                false
            }
        })
        .filter(|candidate| seen_ids.insert(candidate.place_id.clone()))
        .collect()
}

/// Stem of a keyword used as a fallback match
fn keyword_stem(keyword: &str) -> Option<&str> {
    STEM_SUFFIXES
        .iter()
        .find_map(|suffix| keyword.strip_suffix(*suffix))
        .filter(|stem| stem.chars().count() >= MIN_STEM_LEN)
}

/// Check if a keyword matches the place text (both compared lowercase)
///
/// The keyword matches when it is a substring of the place text, or when its
/// stem starts a word of the place text, so "cardiologist" matches
/// "City Cardiology Clinic" but "urologist" does not match "Neurology".
#[inline]
pub fn keyword_matches(keyword: &str, place_text_lower: &str) -> bool {
    let keyword = keyword.to_lowercase();
    if place_text_lower.contains(&keyword) {
        return true;
    }

    keyword_stem(&keyword).is_some_and(|stem| {
        place_text_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.starts_with(stem))
    })
}

/// Keywords that match the place text, in keyword-list order
pub fn matching_keywords<'a>(keywords: &'a [String], place_text: &str) -> Vec<&'a String> {
    let place_text_lower = place_text.to_lowercase();

    keywords
        .iter()
        .filter(|keyword| keyword_matches(keyword, &place_text_lower))
        .collect()
}

/// Count keyword matches and report the first [`MAX_MATCHED_KEYWORDS`] of them
pub fn keyword_boost(keywords: &[String], place_text: &str) -> (usize, Vec<String>) {
    let matches = matching_keywords(keywords, place_text);
    let boost = matches.len();
    let reported = matches
        .into_iter()
        .take(MAX_MATCHED_KEYWORDS)
        .cloned()
        .collect();

    (boost, reported)
}

/// Trim keywords and drop blank ones; an empty keyword would match every place
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
