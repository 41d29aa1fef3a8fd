//! Trip-transition error matrix.
//!
//! Every variant is a precondition violation reported synchronously by the
//! mutating call; the state machine is left exactly as it was.  There is no
//! fatal path here — all of these are recoverable by doing the missing thing
//! (drive closer, confirm the items, accept an order) and calling again.

use thiserror::Error;

/// Why a trip mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TripError {
    /// `accept_order` while an order is already active.
    #[error("an order is already active")]
    AlreadyOnTrip,

    /// Item verification outside the PICKUP phase.
    #[error("not in the pickup phase")]
    NotInPickup,

    /// The proximity gate is locked for the current target.
    #[error("too far from the target location")]
    ProximityLocked,

    /// `advance` from PICKUP with unconfirmed items remaining.
    #[error("not all items are confirmed")]
    ItemsUnconfirmed,

    /// `advance` (or `abandon`) with no active order.
    #[error("no active trip")]
    NoActiveTrip,
}

pub type TripResult<T> = Result<T, TripError>;
