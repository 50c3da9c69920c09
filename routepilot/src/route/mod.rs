//! Route step sequences.
//!
//! A trip exists in two forms: the *accurate* sequence just produced by the
//! planner (source of truth, not yet committed) and the *working* sequence
//! the engine's progression actually consumes. Committing a trip copies
//! accurate into working via [`Route::deep_clone`], after which mutating
//! either never affects the other. The clone is structural, not a
//! serialize/parse round trip, so step fields beyond plain JSON values
//! survive it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coord::{distance_km, LatLng};
use crate::travel_mode::TripSpeed;

/// A single step along a planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Position of this step.
    pub position: LatLng,
}

impl RouteStep {
    /// Create a step at the given position.
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

/// An ordered sequence of route steps from origin to destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    steps: Vec<RouteStep>,
}

impl Route {
    /// Create a route from an ordered step sequence.
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }

    /// An empty route.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the route has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in order.
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Mutable access to the steps (consumed by the progression loop).
    pub fn steps_mut(&mut self) -> &mut Vec<RouteStep> {
        &mut self.steps
    }

    /// Remove all steps.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Produce a fully independent copy of this route.
    ///
    /// Each step record is cloned structurally; no storage is shared with
    /// the source, so later mutation of one side never shows through on
    /// the other.
    pub fn deep_clone(&self) -> Self {
        Self {
            steps: self.steps.iter().cloned().collect(),
        }
    }

    /// Total route length in kilometers (sum of segment great-circle
    /// distances).
    pub fn total_distance_km(&self) -> f64 {
        self.steps
            .windows(2)
            .map(|pair| distance_km(pair[0].position, pair[1].position))
            .sum()
    }

    /// Estimated travel time at the given speed.
    ///
    /// Returns `None` for an empty route or an unbounded speed; the time
    /// display is suppressed in both cases.
    pub fn travel_time(&self, speed: TripSpeed) -> Option<Duration> {
        if self.steps.len() < 2 {
            return None;
        }
        match speed {
            TripSpeed::KmPerSec(kmps) if kmps > 0.0 => {
                Some(Duration::from_secs_f64(self.total_distance_km() / kmps))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_route() -> Route {
        Route::new(vec![
            RouteStep::new(LatLng::new(48.0, 2.0)),
            RouteStep::new(LatLng::new(48.5, 2.0)),
            RouteStep::new(LatLng::new(49.0, 2.0)),
        ])
    }

    #[test]
    fn test_deep_clone_is_equal_by_value() {
        let route = straight_route();
        let copy = route.deep_clone();
        assert_eq!(route, copy);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let route = straight_route();
        let mut copy = route.deep_clone();

        copy.steps_mut().remove(0);
        copy.steps_mut()[0].position.lat = 0.0;

        assert_eq!(route.len(), 3);
        assert!((route.steps()[1].position.lat - 48.5).abs() < 1e-9);
    }

    #[test]
    fn test_total_distance_sums_segments() {
        let route = straight_route();
        // One degree of latitude is ~111 km
        let d = route.total_distance_km();
        assert!((d - 111.0).abs() < 2.0, "expected ~111 km, got {}", d);
    }

    #[test]
    fn test_travel_time_at_concrete_speed() {
        let route = straight_route();
        let kmps = 111.0;
        let time = route.travel_time(TripSpeed::KmPerSec(kmps)).unwrap();
        // ~111 km at 111 km/s is about one second
        assert!((time.as_secs_f64() - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_travel_time_suppressed_for_unbounded_speed() {
        let route = straight_route();
        assert!(route.travel_time(TripSpeed::Unbounded).is_none());
    }

    #[test]
    fn test_travel_time_suppressed_for_empty_route() {
        let route = Route::empty();
        assert!(route.travel_time(TripSpeed::KmPerSec(1.0)).is_none());
    }
}
