//! The closed platform-error taxonomy.
//!
//! These are surfaced as observable state on the tracker, never thrown:
//! transient errors leave the watch running, `PermissionDenied` halts it
//! until permission is re-requested.

use thiserror::Error;

/// Errors reported by the platform location layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The surface has no geolocation capability at all.
    #[error("geolocation not supported on this surface")]
    NotSupported,

    /// The user or platform denied location access.
    #[error("location permission denied")]
    PermissionDenied,

    /// The platform could not produce a fix (no signal, airplane mode, …).
    #[error("position unavailable")]
    PositionUnavailable,

    /// The platform gave up waiting for a fix.
    #[error("position request timed out")]
    Timeout,

    /// Anything the platform reports outside its documented codes.
    #[error("unknown location error")]
    Unknown,
}

impl LocationError {
    /// Transient errors keep the watch alive; the rest halt tracking.
    #[inline]
    pub fn is_transient(self) -> bool {
        matches!(self, LocationError::PositionUnavailable | LocationError::Timeout | LocationError::Unknown)
    }
}
