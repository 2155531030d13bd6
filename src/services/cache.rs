use crate::services::recommender::{CareQuery, Recommendation};
use std::time::Duration;

/// In-process recommendation cache
///
/// Keyed by a query fingerprint; a changed query is a different key, so stale
/// entries only live until their TTL. Owned by the HTTP layer, never by the
/// ranking engine.
pub struct RecommendationCache {
    entries: moka::future::Cache<String, Recommendation>,
}

impl RecommendationCache {
    /// Create a new cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    /// Get a cached recommendation
    pub async fn get(&self, key: &str) -> Option<Recommendation> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    /// Store a recommendation
    ///
    /// Empty results are not stored: they usually mean the provider was down,
    /// and caching them would hide recovery for the whole TTL.
    pub async fn set(&self, key: &str, recommendation: &Recommendation) {
        if recommendation.places.is_empty() {
            tracing::trace!("Not caching empty recommendation: {}", key);
            return;
        }

        self.entries
            .insert(key.to_string(), recommendation.clone())
            .await;
        tracing::trace!("Cache set: {}", key);
    }

    /// Drop a single entry
    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Fingerprint of a recommendation query: symptoms, keywords, location and radius
    ///
    /// Text parts are trimmed and lowercased so cosmetic differences share an entry.
    pub fn recommendation(query: &CareQuery) -> String {
        let normalize = |items: &[String]| {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        };

        let location = match (query.lat, query.lng) {
            (Some(lat), Some(lng)) => format!("{:.5},{:.5}", lat, lng),
            _ => format!(
                "addr:{}",
                query
                    .address
                    .as_deref()
                    .map(|a| a.trim().to_lowercase())
                    .unwrap_or_default()
            ),
        };

        let radius = query
            .radius_meters
            .map(|r| r.to_string())
            .unwrap_or_else(|| "default".to_string());

        format!(
            "care:{}|{}|{}|{}",
            normalize(&query.symptoms),
            normalize(&query.medical_keywords),
            location,
            radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{place_url, CarePlace, Coordinates, LocationSource};

    fn recommendation(places: usize) -> Recommendation {
        Recommendation {
            places: (0..places)
                .map(|i| CarePlace {
                    name: format!("Place {}", i),
                    address: String::new(),
                    rating: 4.0,
                    user_ratings_total: 1,
                    distance_meters: 100.0 * i as f64,
                    match_percent: 50.0,
                    place_id: i.to_string(),
                    url: place_url(&i.to_string()),
                    lat: 0.0,
                    lng: 0.0,
                    matched_keywords: vec![],
                })
                .collect(),
            location: Coordinates::new(23.5224, 87.3233),
            location_source: LocationSource::Provided,
            total_candidates: places,
        }
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = RecommendationCache::new(100, 60);
        let value = recommendation(2);

        cache.set("key", &value).await;
        assert_eq!(cache.get("key").await, Some(value));

        cache.invalidate("key").await;
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_results_not_cached() {
        let cache = RecommendationCache::new(100, 60);

        cache.set("key", &recommendation(0)).await;
        assert!(cache.get("key").await.is_none());
    }

    #[test]
    fn test_cache_key_normalizes_text() {
        let a = CareQuery::new(vec![" Chest Pain ".to_string()], vec!["Cardiologist".to_string()])
            .at(23.52241, 87.32331);
        let b = CareQuery::new(vec!["chest pain".to_string()], vec!["cardiologist ".to_string()])
            .at(23.522411, 87.323312);

        assert_eq!(CacheKey::recommendation(&a), CacheKey::recommendation(&b));
        assert_eq!(
            CacheKey::recommendation(&a),
            "care:chest pain|cardiologist|23.52241,87.32331|default"
        );
    }

    #[test]
    fn test_cache_key_changes_with_radius_and_address() {
        let base = CareQuery::new(vec!["fever".to_string()], vec![]).with_address("Durgapur");

        assert_ne!(
            CacheKey::recommendation(&base),
            CacheKey::recommendation(&base.clone().with_radius(5000))
        );
        assert_ne!(
            CacheKey::recommendation(&base),
            CacheKey::recommendation(&base.clone().with_address("Asansol"))
        );
    }
}
