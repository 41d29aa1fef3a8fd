//! `courier-location` — device position acquisition for the trip engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`sample`]   | `LocationSample` — one reported fix                           |
//! | [`provider`] | `LocationProvider` trait + `ProviderEvent`                    |
//! | [`tracker`]  | `LocationTracker` — permission/tracking state machine         |
//! | [`replay`]   | `ReplayProvider` — scripted provider for tests and demos      |
//! | [`error`]    | `LocationError` — the closed platform-error taxonomy          |
//!
//! # Why a provider trait
//!
//! Two delivery surfaces exist in production: a browser sandbox (watch-based
//! geolocation, permission resolved implicitly by the first callback) and an
//! embedded native wrapper (explicit permission query + interactive request
//! before any watch starts).  [`LocationTracker`] drives both through the one
//! [`LocationProvider`] contract; callers never learn which surface is
//! active.
//!
//! # Event model
//!
//! The platform pushes fixes and errors; the tracker consumes them via
//! `handle_fix` / `handle_error`, tagged with the [`WatchId`] they belong to.
//! Callbacks from a superseded subscription and out-of-order samples are
//! filtered here, so downstream consumers (proximity gate, trip engine) only
//! ever see the latest fix, in emission order.
//!
//! [`WatchId`]: courier_core::WatchId

pub mod error;
pub mod provider;
pub mod replay;
pub mod sample;
pub mod tracker;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::LocationError;
pub use provider::{LocationProvider, PermissionState, ProviderEvent};
pub use replay::{ReplayError, ReplayProvider};
pub use sample::LocationSample;
pub use tracker::LocationTracker;
