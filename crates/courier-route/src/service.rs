//! Routing trait and the straight-line fallback implementation.
//!
//! # Pluggability
//!
//! The coordinator and session call routing via the [`RoutingService`]
//! trait, so applications can swap in any road router (OSRM over HTTP in
//! production) without touching the engine core.

use courier_core::Coordinate;

use crate::{RoutePath, RouteResult};

/// Pluggable road-routing collaborator.
///
/// The production implementation queries an external service and decodes its
/// polyline answer; it is treated as unreliable and rate-sensitive, which is
/// why all calls flow through the [`RouteCoordinator`][crate::RouteCoordinator]
/// throttle.
pub trait RoutingService {
    /// Compute a road-snapped path from `origin` to `destination`.
    ///
    /// An `Err` (or an empty path) means "no usable answer"; the caller
    /// keeps whatever it had.
    fn route(&self, origin: Coordinate, destination: Coordinate) -> RouteResult<RoutePath>;
}

/// Degenerate router: the two endpoints joined by one straight segment.
///
/// Used by tests and demos, and a reasonable visual fallback when no road
/// router is reachable at all.
pub struct StraightLineRouter;

impl RoutingService for StraightLineRouter {
    fn route(&self, origin: Coordinate, destination: Coordinate) -> RouteResult<RoutePath> {
        Ok(RoutePath::new(vec![origin, destination]))
    }
}
