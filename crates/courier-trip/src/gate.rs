//! The proximity gate — a radius geofence that fails closed.

use courier_core::Coordinate;

/// Default geofence radius: actions unlock within 10 m of the target.
pub const GEOFENCE_RADIUS_M: f64 = 10.0;

/// Pure derivation of the locked/unlocked state from two coordinates.
///
/// No internal state: recomputed on every position update.  Missing
/// information — no fix yet, or no active target — reads as *locked*
/// ("not yet in range"), so losing GPS mid-trip freezes progression instead
/// of accidentally permitting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityGate {
    pub radius_m: f64,
}

impl Default for ProximityGate {
    fn default() -> Self {
        Self { radius_m: GEOFENCE_RADIUS_M }
    }
}

impl ProximityGate {
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }

    /// `true` when the courier is **not** within the geofence.
    ///
    /// Locked when either coordinate is absent, when the distance exceeds
    /// the radius, or when the distance is NaN (unvalidated input).
    pub fn locked(&self, current: Option<Coordinate>, target: Option<Coordinate>) -> bool {
        match (current, target) {
            (Some(current), Some(target)) => {
                // `!(d <= r)` so NaN locks rather than unlocks.
                !(current.distance_m(target) <= self.radius_m)
            }
            _ => true,
        }
    }

    /// Distance to the target in metres, when both sides are known.
    pub fn distance_m(&self, current: Option<Coordinate>, target: Option<Coordinate>) -> Option<f64> {
        Some(current?.distance_m(target?))
    }
}
