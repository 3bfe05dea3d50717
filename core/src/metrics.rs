/// Pace (min/km) = duration / distance
pub fn pace(duration_min: f64, distance_km: f64) -> f64 {
    duration_min / distance_km
}

/// Speed (km/h) = distance / (duration / 60)
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// Strictly positive and finite.
pub fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pace_is_minutes_per_km() {
        assert!((pace(24.0, 5.2) - 4.615).abs() < 1e-3);
    }

    #[test]
    fn speed_is_km_per_hour() {
        assert!((speed(34.0, 78.0) - 26.15).abs() < 1e-2);
        assert_eq!(speed(30.0, 60.0), 30.0);
    }

    #[test]
    fn positivity_rejects_zero_nan_and_infinity() {
        assert!(is_positive(0.1));
        assert!(!is_positive(0.0));
        assert!(!is_positive(-1.0));
        assert!(!is_positive(f64::NAN));
        assert!(!is_positive(f64::INFINITY));
    }
}
