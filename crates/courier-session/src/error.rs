//! Session-level error type.

use thiserror::Error;

use courier_trip::TripError;

/// Why a session command was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The offered order's pickup lies outside the configured service area.
    #[error("pickup location is outside the service area")]
    OutsideServiceArea,

    /// The trip state machine refused the transition.
    #[error(transparent)]
    Trip(#[from] TripError),
}

pub type SessionResult<T> = Result<T, SessionError>;
