//! Geographic coordinate primitives.
//!
//! Provides the `LatLng` position type shared by the planner, engine, and
//! controller, plus great-circle distance used for route length estimates.
//! Coordinates arriving from external sources (search widget, map shortcut
//! clicks) are validated here before they enter the control layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometers, used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LNG: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LNG: f64 = 180.0;

/// Errors produced when validating externally sourced coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum CoordError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Create a position without validation.
    ///
    /// Use [`LatLng::checked`] for coordinates crossing a trust boundary.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a position, validating ranges and finiteness.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// Great-circle distance between two positions in kilometers (haversine).
#[inline]
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_valid_coordinates() {
        let pos = LatLng::checked(48.8584, 2.2945).unwrap();
        assert!((pos.lat - 48.8584).abs() < 1e-9);
        assert!((pos.lng - 2.2945).abs() < 1e-9);
    }

    #[test]
    fn test_checked_rejects_out_of_range_latitude() {
        let result = LatLng::checked(90.5, 0.0);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLatitude(90.5));
    }

    #[test]
    fn test_checked_rejects_out_of_range_longitude() {
        let result = LatLng::checked(0.0, -181.0);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLongitude(-181.0));
    }

    #[test]
    fn test_checked_rejects_non_finite() {
        assert!(LatLng::checked(f64::NAN, 0.0).is_err());
        assert!(LatLng::checked(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_distance_paris_to_london() {
        // Eiffel Tower to Big Ben, roughly 340 km
        let paris = LatLng::new(48.8584, 2.2945);
        let london = LatLng::new(51.5007, -0.1246);
        let d = distance_km(paris, london);
        assert!((d - 340.0).abs() < 5.0, "expected ~340 km, got {}", d);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = LatLng::new(35.6586, 139.7454);
        assert!(distance_km(p, p) < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLng::new(40.7128, -74.0060);
        let b = LatLng::new(34.0522, -118.2437);
        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }
}
