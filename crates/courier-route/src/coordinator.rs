//! The throttled refresh coordinator.

use courier_core::{Coordinate, TimestampMs};
use tracing::{debug, warn};

use crate::{RoutePath, RouteResult};

/// Minimum spacing between routing calls for an unchanged destination.
pub const REFRESH_INTERVAL_MS: i64 = 20_000;

// ── RouteQuery ────────────────────────────────────────────────────────────────

/// One routing call the coordinator wants performed.
///
/// The coordinator never talks to the network itself: [`poll`] hands the
/// caller a `RouteQuery`, the caller runs it against its
/// [`RoutingService`][crate::RoutingService] (possibly asynchronously, while
/// fixes keep flowing), and reports back via [`complete`].  The `seq` number
/// is how a late answer for a superseded query is recognized and dropped.
///
/// [`poll`]: RouteCoordinator::poll
/// [`complete`]: RouteCoordinator::complete
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub seq:         u64,
    pub origin:      Coordinate,
    pub destination: Coordinate,
}

// ── RouteCoordinator ──────────────────────────────────────────────────────────

/// Maintains the cached road-snapped path and decides when it may be
/// refreshed.
///
/// Refresh rules:
/// - at most one call per [`REFRESH_INTERVAL_MS`] window, measured from the
///   last **successful** refresh;
/// - an empty cache refreshes regardless of the window;
/// - a destination change (trip phase switch) forces the next poll to
///   refresh regardless of the window and invalidates any in-flight query;
/// - a failed call retains the previous path unchanged and is only retried
///   once the window rules allow it again.
#[derive(Debug)]
pub struct RouteCoordinator {
    interval_ms: i64,
    destination: Option<Coordinate>,
    path:        RoutePath,

    /// Timestamp of the last successful refresh; `None` before the first.
    last_refresh: Option<TimestampMs>,
    /// Sequence number of the in-flight query, if any.
    pending:      Option<u64>,
    /// Set on destination change; cleared when the forced query is issued.
    force:        bool,
    next_seq:     u64,
}

impl Default for RouteCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteCoordinator {
    pub fn new() -> Self {
        Self::with_interval(REFRESH_INTERVAL_MS)
    }

    pub fn with_interval(interval_ms: i64) -> Self {
        Self {
            interval_ms,
            destination:  None,
            path:         RoutePath::empty(),
            last_refresh: None,
            pending:      None,
            force:        false,
            next_seq:     0,
        }
    }

    // ── Read-only snapshots ───────────────────────────────────────────────

    /// The current road-snapped path (possibly stale, possibly empty).
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the path was last successfully replaced; `None` before the first
    /// refresh (or after the destination was cleared).
    pub fn last_refresh(&self) -> Option<TimestampMs> {
        self.last_refresh
    }

    // ── Destination control ───────────────────────────────────────────────

    /// Point the overlay at a new target (or at nothing, between trips).
    ///
    /// A genuine change forces the next [`poll`][Self::poll] to refresh
    /// immediately and marks any in-flight query stale.  Clearing the
    /// destination also drops the cached path — it traced a target that no
    /// longer exists.
    pub fn set_destination(&mut self, destination: Option<Coordinate>) {
        if self.destination == destination {
            return;
        }
        self.destination = destination;
        self.pending = None;
        self.force = destination.is_some();
        if destination.is_none() {
            self.path = RoutePath::empty();
            self.last_refresh = None;
        }
    }

    // ── Refresh cycle ─────────────────────────────────────────────────────

    /// Ask whether a routing call should happen now.
    ///
    /// Returns the query to run, or `None` when the throttle window is
    /// closed, a query is already in flight, or there is no destination.
    pub fn poll(&mut self, origin: Coordinate, now: TimestampMs) -> Option<RouteQuery> {
        let destination = self.destination?;
        if self.pending.is_some() {
            return None;
        }

        let window_open = match self.last_refresh {
            None => true,
            Some(t) => now.since(t) > self.interval_ms,
        };
        if !(self.force || self.path.is_empty() || window_open) {
            return None;
        }

        self.force = false;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(seq);

        Some(RouteQuery { seq, origin, destination })
    }

    /// Report the outcome of a query issued by [`poll`][Self::poll].
    ///
    /// Success replaces the cached path and re-arms the throttle window;
    /// failure (or an empty path) retains the previous path and is logged,
    /// never escalated.  Answers for superseded queries are discarded.
    pub fn complete(&mut self, query: &RouteQuery, outcome: RouteResult<RoutePath>, now: TimestampMs) {
        if self.pending != Some(query.seq) {
            debug!(seq = query.seq, "discarding answer for superseded route query");
            return;
        }
        self.pending = None;

        if self.destination != Some(query.destination) {
            debug!(seq = query.seq, "discarding stale route: destination changed mid-flight");
            return;
        }

        match outcome {
            Ok(path) if !path.is_empty() => {
                self.path = path;
                self.last_refresh = Some(now);
            }
            Ok(_) => {
                warn!("routing service returned an empty path; keeping previous route");
            }
            Err(e) => {
                warn!(error = %e, "route refresh failed; keeping previous route");
            }
        }
    }
}
