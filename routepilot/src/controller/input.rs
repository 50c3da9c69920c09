//! External input boundaries.
//!
//! The destination search widget and the map shortcut source live outside
//! this crate. The widget is reached only through [`DestinationInput`]
//! (the controller clears its value on failure, cancel, and confirm
//! paths). Shortcut clicks arrive with their own field naming (`long`
//! rather than `lng`) and are normalized to [`LatLng`] here, at the
//! boundary.

use crate::coord::{CoordError, LatLng};

/// Handle to the destination search widget.
pub trait DestinationInput: Send {
    /// Clear the widget's current text value.
    fn clear_value(&mut self);
}

/// A no-op widget handle for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDestinationInput;

impl DestinationInput for NullDestinationInput {
    fn clear_value(&mut self) {}
}

/// Raw coordinates as delivered by the shortcut source.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees (shortcut sources name this `long`).
    pub long: f64,
}

impl ShortcutPoint {
    /// Normalize to a validated [`LatLng`].
    pub fn to_lat_lng(self) -> Result<LatLng, CoordError> {
        LatLng::checked(self.lat, self.long)
    }
}

/// A quick-trip request from the map shortcut source.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutEvent {
    /// Whether the secondary activation modifier (shift) was held.
    pub secondary_modifier: bool,
    /// Where the shortcut was triggered.
    pub point: ShortcutPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_point_normalizes_to_lat_lng() {
        let point = ShortcutPoint {
            lat: 51.5,
            long: -0.12,
        };
        let coords = point.to_lat_lng().unwrap();
        assert!((coords.lat - 51.5).abs() < 1e-9);
        assert!((coords.lng + 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_shortcut_point_rejects_invalid_longitude() {
        let point = ShortcutPoint {
            lat: 0.0,
            long: 400.0,
        };
        assert!(point.to_lat_lng().is_err());
    }
}
