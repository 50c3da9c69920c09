//! The real trip engine implementation.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info};

use crate::coord::LatLng;
use crate::planner::{RouteError, TripPlanner};
use crate::route::Route;
use crate::travel_mode::TripSpeed;

use super::Engine;

/// Default speed until a travel mode is applied (cycling, 13 km/h).
const DEFAULT_SPEED_KMPS: f64 = 13.0 / 3600.0;

/// Stateful trip owner: run flags, destination, speed, and the two route
/// sequences. Route resolution is delegated to the configured planner.
pub struct AutopilotEngine {
    planner: Arc<dyn TripPlanner>,
    position: LatLng,
    destination: Option<LatLng>,
    speed: TripSpeed,
    running: bool,
    paused: bool,
    clean: bool,
    accurate_route: Route,
    working_route: Route,
}

impl AutopilotEngine {
    /// Create an idle engine at the given starting position.
    pub fn new(planner: Arc<dyn TripPlanner>, position: LatLng) -> Self {
        Self {
            planner,
            position,
            destination: None,
            speed: TripSpeed::KmPerSec(DEFAULT_SPEED_KMPS),
            running: false,
            paused: false,
            clean: true,
            accurate_route: Route::empty(),
            working_route: Route::empty(),
        }
    }

    /// Update the simulated position (called by the progression loop).
    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }
}

impl Engine for AutopilotEngine {
    fn start(&mut self) {
        if self.paused {
            // Resume, never restart: the working route is already committed.
            self.paused = false;
            info!("trip resumed");
        } else if !self.running {
            self.running = true;
            self.clean = false;
            info!(destination = ?self.destination, "trip started");
        } else {
            debug!("start ignored: already running");
        }
    }

    fn stop(&mut self) {
        if self.running {
            info!("trip stopped");
        }
        self.running = false;
        self.paused = false;
        self.destination = None;
        self.accurate_route.clear();
        self.working_route.clear();
    }

    fn pause(&mut self) {
        if self.running && !self.paused {
            self.paused = true;
            info!("trip paused");
        } else {
            debug!("pause ignored: not running or already paused");
        }
    }

    fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            info!("trip resumed");
        } else {
            debug!("resume ignored: not paused");
        }
    }

    fn schedule_trip(
        &mut self,
        destination: LatLng,
    ) -> BoxFuture<'_, Result<(), RouteError>> {
        let planner = Arc::clone(&self.planner);
        let origin = self.position;
        Box::pin(async move {
            debug!(%origin, %destination, "scheduling trip");
            let steps = planner.plan_route(origin, destination).await?;
            self.accurate_route = Route::new(steps);
            self.destination = Some(destination);
            debug!(
                steps = self.accurate_route.len(),
                distance_km = self.accurate_route.total_distance_km(),
                "trip scheduled"
            );
            Ok(())
        })
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_clean(&self) -> bool {
        self.clean
    }

    fn destination(&self) -> Option<LatLng> {
        self.destination
    }

    fn position(&self) -> LatLng {
        self.position
    }

    fn speed(&self) -> TripSpeed {
        self.speed
    }

    fn set_speed(&mut self, speed: TripSpeed) {
        self.speed = speed;
    }

    fn accurate_route(&self) -> &Route {
        &self.accurate_route
    }

    fn working_route(&self) -> &Route {
        &self.working_route
    }

    fn set_working_route(&mut self, route: Route) {
        self.working_route = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::DirectPlanner;

    fn engine() -> AutopilotEngine {
        AutopilotEngine::new(
            Arc::new(DirectPlanner::new().with_step_count(4)),
            LatLng::new(48.0, 2.0),
        )
    }

    #[test]
    fn test_new_engine_is_idle_and_clean() {
        let engine = engine();
        assert!(!engine.is_running());
        assert!(!engine.is_paused());
        assert!(engine.is_clean());
        assert!(engine.destination().is_none());
        assert!(engine.accurate_route().is_empty());
    }

    #[test]
    fn test_start_transitions_idle_to_running() {
        let mut engine = engine();
        engine.start();
        assert!(engine.is_running());
        assert!(!engine.is_paused());
        assert!(!engine.is_clean());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = engine();
        engine.start();
        engine.pause();
        assert!(engine.is_running());
        assert!(engine.is_paused());

        engine.resume();
        assert!(engine.is_running());
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_start_while_paused_resumes() {
        let mut engine = engine();
        engine.start();
        engine.pause();

        engine.start();
        assert!(engine.is_running());
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_pause_while_idle_is_ignored() {
        let mut engine = engine();
        engine.pause();
        assert!(!engine.is_paused());
    }

    #[tokio::test]
    async fn test_stop_clears_destination_and_routes() {
        let mut engine = engine();
        engine
            .schedule_trip(LatLng::new(48.5, 2.5))
            .await
            .unwrap();
        let committed = engine.accurate_route().deep_clone();
        engine.set_working_route(committed);
        engine.start();
        engine.pause();

        engine.stop();

        assert!(!engine.is_running());
        assert!(!engine.is_paused());
        assert!(engine.destination().is_none());
        assert!(engine.accurate_route().is_empty());
        assert!(engine.working_route().is_empty());
    }

    #[test]
    fn test_clean_never_reverts_after_first_start() {
        let mut engine = engine();
        engine.start();
        engine.stop();
        assert!(!engine.is_clean());
    }

    #[tokio::test]
    async fn test_schedule_trip_does_not_change_run_state() {
        let mut engine = engine();
        engine.start();
        engine.pause();

        engine
            .schedule_trip(LatLng::new(48.5, 2.5))
            .await
            .unwrap();

        assert!(engine.is_running());
        assert!(engine.is_paused());
        assert_eq!(engine.destination(), Some(LatLng::new(48.5, 2.5)));
        assert_eq!(engine.accurate_route().len(), 4);
        // Scheduling alone never touches the working route.
        assert!(engine.working_route().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_trip_failure_leaves_state_untouched() {
        let mut engine = engine();
        let result = engine.schedule_trip(LatLng::new(95.0, 0.0)).await;
        assert!(result.is_err());
        assert!(engine.destination().is_none());
        assert!(engine.accurate_route().is_empty());
    }

    #[test]
    fn test_default_speed_is_cycling() {
        let engine = engine();
        match engine.speed() {
            TripSpeed::KmPerSec(v) => assert!((v - 13.0 / 3600.0).abs() < 1e-12),
            TripSpeed::Unbounded => panic!("default speed must be concrete"),
        }
    }
}
