//! Core error type.
//!
//! Sub-crates define their own error enums (`LocationError`, `RouteError`,
//! `TripError`, …) and keep them separate; `CoreError` only covers failures
//! constructing the foundational types themselves.

use thiserror::Error;

/// Errors from `courier-core` type construction.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid service area: {0}")]
    InvalidServiceArea(&'static str),

    #[error("coordinate out of range: ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Shorthand result type for `courier-core`.
pub type CoreResult<T> = Result<T, CoreError>;
