//! `courier-route` — the road-snapped overlay on top of raw GPS.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`path`]        | `RoutePath` — an immutable road-snapped polyline           |
//! | [`service`]     | `RoutingService` trait + `StraightLineRouter` default      |
//! | [`polyline`]    | Google encoded-polyline decoder                            |
//! | [`coordinator`] | `RouteCoordinator` — the 20 s refresh throttle             |
//! | [`error`]       | `RouteError`, `RouteResult<T>`                             |
//!
//! # Why a throttle exists
//!
//! The external routing collaborator is rate-sensitive, while GPS fixes
//! arrive every second or faster.  Re-routing per fix would multiply call
//! volume a hundredfold for no visible benefit — the road geometry barely
//! changes over a few metres of travel.  [`RouteCoordinator`] inverts the
//! relationship: fixes update freely, and at most one routing call leaves
//! the device per refresh window (except when the trip phase retargets the
//! destination, which refreshes unconditionally).

pub mod coordinator;
pub mod error;
pub mod path;
pub mod polyline;
pub mod service;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coordinator::{RouteCoordinator, RouteQuery, REFRESH_INTERVAL_MS};
pub use error::{RouteError, RouteResult};
pub use path::RoutePath;
pub use polyline::decode_polyline;
pub use service::{RoutingService, StraightLineRouter};
