//! Routing-subsystem error type.
//!
//! Routing failures never escalate past the coordinator: the previous path
//! is retained and the failure is logged.  The enum exists so service
//! implementations can say *why* they failed.

use thiserror::Error;

/// Errors produced by a [`RoutingService`][crate::RoutingService].
#[derive(Debug, Error)]
pub enum RouteError {
    /// The service answered but found no road path between the endpoints.
    #[error("no road route between the given endpoints")]
    NoRoute,

    /// Transport-level failure reaching the service.
    #[error("routing service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with something undecodable.
    #[error("malformed routing response: {0}")]
    MalformedResponse(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
