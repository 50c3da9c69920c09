//! RoutePilot - trip autopilot control core
//!
//! This library implements the control/state layer of a map autopilot: a
//! destination becomes a planned route, the route is committed to a trip
//! engine, and user commands (pause, resume, cancel, speed changes,
//! shortcuts, keyboard) are mediated into engine calls without corrupting
//! trip state.
//!
//! Rendering, autocomplete widgets, and geocoding live outside this crate;
//! they are reached through the [`controller::DestinationInput`] and
//! [`planner::TripPlanner`] seams.

pub mod controller;
pub mod coord;
pub mod engine;
pub mod log;
pub mod planner;
pub mod route;
pub mod travel_mode;

pub use controller::{AutopilotController, CommandOutcome, ControllerError, ControllerEvent};
pub use coord::LatLng;
pub use engine::{AutopilotEngine, Engine};
pub use planner::{DirectPlanner, RouteError, TripPlanner};
pub use route::{Route, RouteStep};
pub use travel_mode::{Speed, TravelMode, TravelModeTable, TripSpeed};
