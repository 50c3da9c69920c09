//! Trip planning seam.
//!
//! The control layer never computes routes itself; it asks a [`TripPlanner`]
//! to resolve "origin, destination" into an ordered step sequence. Real
//! deployments back this with a directions provider. [`DirectPlanner`] is a
//! self-contained implementation that interpolates steps along the straight
//! segment, used by the CLI demo and tests.
//!
//! The trait is dyn-compatible (boxed futures) so the engine can hold an
//! `Arc<dyn TripPlanner>`.

mod direct;

pub use direct::DirectPlanner;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::coord::LatLng;
use crate::route::RouteStep;

/// Errors from route resolution.
///
/// These are recovered locally by the controller (the destination input is
/// cleared and nothing else changes); they are never fatal.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route exists between the two positions.
    #[error("destination {0} is unreachable")]
    Unreachable(LatLng),

    /// The routing provider failed.
    #[error("route provider error: {0}")]
    Provider(String),

    /// A coordinate was rejected at the boundary.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] crate::coord::CoordError),
}

/// Asynchronous route resolution.
pub trait TripPlanner: Send + Sync {
    /// Resolve an ordered step sequence from `origin` to `destination`.
    ///
    /// The returned sequence includes both endpoints. Scheduling a trip is
    /// the only suspension point in the control layer, so implementations
    /// are free to take their time.
    fn plan_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> BoxFuture<'static, Result<Vec<RouteStep>, RouteError>>;
}
