/// Earth's radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the Haversine (great-circle) distance between two points in meters
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in meters, never negative
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!(
            (distance - 344_000.0).abs() < 10_000.0,
            "Distance should be ~344km, got {}",
            distance
        );
    }

    #[test]
    fn test_same_point_is_zero() {
        let distance = haversine_distance(23.5224, 87.3233, 23.5224, 87.3233);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_meridian_offset_is_exact() {
        // Along a meridian the great-circle distance is R * delta_lat
        let delta = (500.0 / EARTH_RADIUS_M).to_degrees();
        let distance = haversine_distance(23.5224, 87.3233, 23.5224 + delta, 87.3233);
        assert!((distance - 500.0).abs() < 1e-6, "got {}", distance);
    }

    #[test]
    fn test_antipodal_points() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((distance - half_circumference).abs() < 1.0);
    }
}
