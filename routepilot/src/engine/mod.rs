//! Trip engine: the stateful owner of the active trip.
//!
//! # Architecture
//!
//! ```text
//! Commands (controller) ────► Engine trait ────► AutopilotEngine
//!                                                 ├── run flags (running/paused/clean)
//!                                                 ├── destination + speed
//!                                                 ├── accurate route (planner output)
//!                                                 └── working route (committed copy)
//! ```
//!
//! The engine is a three-state machine: idle → running → paused, with
//! `stop` returning to idle from either active state. `schedule_trip`
//! never changes run state; it only resolves and stores the accurate
//! route, and is safe to call in any state. Tick-by-tick advancement of
//! the position along the working route belongs to an external
//! progression loop, not this crate.
//!
//! The [`Engine`] trait exists so the controller can be exercised against
//! a recording mock in tests.

mod autopilot;

pub use autopilot::AutopilotEngine;

use futures::future::BoxFuture;

use crate::coord::LatLng;
use crate::planner::RouteError;
use crate::route::Route;
use crate::travel_mode::TripSpeed;

/// Command and state surface of a trip engine.
pub trait Engine: Send {
    /// Start progression, or resume it when paused.
    ///
    /// Calling this while paused must resume the existing trip, never
    /// restart it: the working route already reflects the committed
    /// sequence.
    fn start(&mut self);

    /// Abort the trip and return to idle, clearing destination and routes.
    fn stop(&mut self);

    /// Suspend progression. Only meaningful while running and not paused.
    fn pause(&mut self);

    /// Resume a paused trip. Only meaningful while paused.
    fn resume(&mut self);

    /// Resolve a route to `destination` and store it as the accurate
    /// sequence. Does not change run state; concurrent calls cannot
    /// interleave because scheduling borrows the engine exclusively.
    fn schedule_trip(&mut self, destination: LatLng)
        -> BoxFuture<'_, Result<(), RouteError>>;

    /// Whether a trip is active (true while paused as well).
    fn is_running(&self) -> bool;

    /// Whether the active trip is suspended.
    fn is_paused(&self) -> bool;

    /// True until the first trip is committed; drives Start-vs-Update
    /// labeling in the UI.
    fn is_clean(&self) -> bool;

    /// Destination of the most recently scheduled trip.
    fn destination(&self) -> Option<LatLng>;

    /// Current simulated position (route origin for scheduling).
    fn position(&self) -> LatLng;

    /// Current trip speed in the internal per-second unit.
    fn speed(&self) -> TripSpeed;

    /// Set the trip speed. Takes effect on the next progression tick.
    fn set_speed(&mut self, speed: TripSpeed);

    /// The accurate route from the last successful `schedule_trip`.
    fn accurate_route(&self) -> &Route;

    /// The committed working route the progression loop consumes.
    fn working_route(&self) -> &Route;

    /// Replace the working route (the commit step).
    fn set_working_route(&mut self, route: Route);
}
