//! A single reported device position.

use courier_core::{Coordinate, TimestampMs};

/// One fix from the platform location layer.
///
/// Consumers always read the **latest** sample, never an average: each new
/// fix fully replaces the previous one (single-writer snapshot, so readers
/// never observe a torn value).
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocationSample {
    pub coordinate: Coordinate,

    /// Reported horizontal accuracy radius in metres.
    pub accuracy_m: f64,

    /// Platform timestamp of the fix.  Also the ordering key: a sample not
    /// newer than the current one is dropped at the tracker boundary.
    pub timestamp: TimestampMs,
}

impl LocationSample {
    #[inline]
    pub fn new(coordinate: Coordinate, accuracy_m: f64, timestamp: TimestampMs) -> Self {
        Self { coordinate, accuracy_m, timestamp }
    }
}
