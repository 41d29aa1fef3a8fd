//! Observer trait for session-level notifications.

use courier_location::PermissionState;
use courier_route::RoutePath;
use courier_trip::{Order, TripPhase};

/// Callback hooks invoked by [`Session`][crate::Session] at notable moments.
///
/// All methods have no-op defaults, so implementors opt into exactly the
/// events they care about:
///
/// ```rust,ignore
/// struct PhaseLogger;
///
/// impl SessionObserver for PhaseLogger {
///     fn on_phase_change(&mut self, from: TripPhase, to: TripPhase) {
///         println!("{from} -> {to}");
///     }
/// }
/// ```
pub trait SessionObserver {
    /// The permission state changed (grant, denial, or revocation).
    fn on_permission_change(&mut self, _state: PermissionState) {}

    /// The trip moved between phases (including to/from IDLE).
    fn on_phase_change(&mut self, _from: TripPhase, _to: TripPhase) {}

    /// A delivery was completed; `order` is the released order.
    fn on_trip_complete(&mut self, _order: &Order) {}

    /// The cached route was replaced by a fresh one.
    fn on_route_refresh(&mut self, _path: &RoutePath) {}
}

/// A [`SessionObserver`] that does nothing.  Use when you need a session but
/// don't want callbacks.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
