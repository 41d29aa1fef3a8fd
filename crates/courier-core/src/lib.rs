//! `courier-core` — foundational types for the `rust_courier` trip engine.
//!
//! This crate is a dependency of every other `courier-*` crate.  It
//! intentionally has no `courier-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`geo`]     | `Coordinate`, haversine distance, distance formatting   |
//! | [`area`]    | `ServiceArea`, `BoundingBox`, padded containment        |
//! | [`time`]    | `TimestampMs` — explicit epoch-millisecond time model   |
//! | [`ids`]     | `OrderId`, `ItemId`, `WatchId`                          |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |
//!           | Required by `courier-trip` and `courier-session`.           |

pub mod area;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use area::{BoundingBox, ServiceArea};
pub use error::{CoreError, CoreResult};
pub use geo::{format_distance_m, Coordinate, EARTH_RADIUS_M};
pub use ids::{ItemId, OrderId, WatchId};
pub use time::TimestampMs;
