//! `courier-trip` — the trip lifecycle state machine and its gating rules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`order`]     | `Order`, `LineItem` — dispatch payload types              |
//! | [`checklist`] | `Checklist` — per-item pickup verification state          |
//! | [`gate`]      | `ProximityGate` — the 10 m fail-closed geofence           |
//! | [`engine`]    | `TripEngine` — IDLE → PICKUP → DELIVERY → IDLE            |
//! | [`error`]     | `TripError` — the transition-precondition matrix          |
//!
//! # Phase model
//!
//! A courier carries at most one active order.  Accepting an order enters
//! **PICKUP** with an all-unconfirmed checklist; `advance()` moves to
//! **DELIVERY** once every item is confirmed *and* the courier is physically
//! at the store, and back to **IDLE** once they are physically at the
//! customer.  Every gated action fails closed: no fix, or no target, counts
//! as "not in range".

pub mod checklist;
pub mod engine;
pub mod error;
pub mod gate;
pub mod order;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use checklist::Checklist;
pub use engine::{TripEngine, TripEvent, TripPhase};
pub use error::{TripError, TripResult};
pub use gate::{ProximityGate, GEOFENCE_RADIUS_M};
pub use order::{LineItem, Order};
