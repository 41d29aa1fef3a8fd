//! Read-only session view.

use courier_core::{Coordinate, OrderId};
use courier_location::{LocationError, LocationSample, PermissionState};
use courier_trip::TripPhase;

/// Progress through the pickup checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub confirmed: usize,
    pub total:     usize,
}

impl ChecklistProgress {
    pub fn is_complete(&self) -> bool {
        self.confirmed == self.total
    }
}

/// One coherent observation of the whole session, taken atomically between
/// events.  Everything a status display needs, with no access to the
/// mutable internals.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub permission:     PermissionState,
    /// Last accepted fix; `None` before the first.
    pub sample:         Option<LocationSample>,
    /// Most recent platform error, cleared by the next fix.
    pub location_error: Option<LocationError>,

    pub phase:          TripPhase,
    pub order:          Option<OrderId>,
    /// Checklist progress; `None` outside PICKUP.
    pub checklist:      Option<ChecklistProgress>,

    /// The current phase's gating target.
    pub target:         Option<Coordinate>,
    /// `true` when the proximity gate blocks completion right now.
    pub locked:         bool,
    /// Metres to the target, when a fix and a target both exist.
    pub distance_m:     Option<f64>,
    /// `distance_m` rendered for display ("936 m", "1.2 km").
    pub distance_label: Option<String>,

    /// The cached road-snapped path (possibly stale, possibly empty).
    pub route:          Vec<Coordinate>,
}
