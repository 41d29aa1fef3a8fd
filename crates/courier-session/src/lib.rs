//! `courier-session` — the root aggregate of the `rust_courier` trip engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`session`]  | `Session` — one courier's full delivery session              |
//! | [`snapshot`] | `SessionSnapshot`, `ChecklistProgress` — read-only views     |
//! | [`observer`] | `SessionObserver` hooks + `NoopObserver`                     |
//! | [`config`]   | `SessionConfig` — TOML-loadable tunables                     |
//! | [`error`]    | `SessionError`, `SessionResult<T>`                           |
//!
//! # Event model
//!
//! Everything that can happen to a session — a GPS fix, a permission answer,
//! a user gesture, a routing result — is one call on `&mut Session`.  Calls
//! are processed to completion before the next one is observed, so snapshots
//! taken between events are always coherent and transitions are atomic: a
//! refused command leaves every component exactly as it was.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use courier_route::StraightLineRouter;
//! use courier_session::{Session, SessionConfig};
//!
//! let mut session = Session::new(provider, SessionConfig::default());
//! session.request_permission();
//! // platform callbacks…
//! session.handle_fix(watch, sample);
//! // user gestures…
//! session.accept_order(order)?;
//! session.pump_route(&StraightLineRouter, now);
//! let view = session.snapshot();
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod session;
pub mod snapshot;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{boundary, ConfigError, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use observer::{NoopObserver, SessionObserver};
pub use session::Session;
pub use snapshot::{ChecklistProgress, SessionSnapshot};
