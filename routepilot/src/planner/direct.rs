//! Straight-segment planner.

use futures::future::BoxFuture;

use crate::coord::LatLng;
use crate::route::RouteStep;

use super::{RouteError, TripPlanner};

/// Default number of interpolated steps (including both endpoints).
const DEFAULT_STEP_COUNT: usize = 64;

/// Planner that interpolates evenly spaced steps along the straight
/// lat/lng segment between origin and destination.
///
/// Good enough for demos and tests; a production deployment replaces this
/// with a directions-provider-backed [`TripPlanner`].
#[derive(Debug, Clone)]
pub struct DirectPlanner {
    step_count: usize,
}

impl Default for DirectPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectPlanner {
    /// Create a planner with the default step count.
    pub fn new() -> Self {
        Self {
            step_count: DEFAULT_STEP_COUNT,
        }
    }

    /// Set the number of steps per route (minimum 2, both endpoints).
    pub fn with_step_count(mut self, step_count: usize) -> Self {
        self.step_count = step_count.max(2);
        self
    }
}

impl TripPlanner for DirectPlanner {
    fn plan_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> BoxFuture<'static, Result<Vec<RouteStep>, RouteError>> {
        let step_count = self.step_count;
        Box::pin(async move {
            let origin = LatLng::checked(origin.lat, origin.lng)?;
            let destination = LatLng::checked(destination.lat, destination.lng)?;

            let last = (step_count - 1) as f64;
            let steps = (0..step_count)
                .map(|i| {
                    let t = i as f64 / last;
                    RouteStep::new(LatLng::new(
                        origin.lat + (destination.lat - origin.lat) * t,
                        origin.lng + (destination.lng - origin.lng) * t,
                    ))
                })
                .collect();

            Ok(steps)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_route_includes_both_endpoints() {
        let planner = DirectPlanner::new().with_step_count(10);
        let origin = LatLng::new(48.0, 2.0);
        let destination = LatLng::new(49.0, 3.0);

        let steps = planner.plan_route(origin, destination).await.unwrap();

        assert_eq!(steps.len(), 10);
        assert_eq!(steps.first().unwrap().position, origin);
        assert_eq!(steps.last().unwrap().position, destination);
    }

    #[tokio::test]
    async fn test_steps_are_evenly_spaced() {
        let planner = DirectPlanner::new().with_step_count(5);
        let steps = planner
            .plan_route(LatLng::new(0.0, 0.0), LatLng::new(4.0, 0.0))
            .await
            .unwrap();

        for (i, step) in steps.iter().enumerate() {
            assert!((step.position.lat - i as f64).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_invalid_destination_is_rejected() {
        let planner = DirectPlanner::new();
        let result = planner
            .plan_route(LatLng::new(0.0, 0.0), LatLng::new(95.0, 0.0))
            .await;

        assert!(matches!(result, Err(RouteError::InvalidCoordinate(_))));
    }

    #[tokio::test]
    async fn test_step_count_floor_is_two() {
        let planner = DirectPlanner::new().with_step_count(0);
        let steps = planner
            .plan_route(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0))
            .await
            .unwrap();
        assert_eq!(steps.len(), 2);
    }
}
