//! The session aggregate.

use tracing::{info, warn};

use courier_core::{Coordinate, ItemId, ServiceArea, TimestampMs, WatchId, format_distance_m};
use courier_location::{
    LocationError, LocationProvider, LocationSample, LocationTracker, PermissionState,
};
use courier_route::{RouteCoordinator, RoutePath, RouteQuery, RouteResult, RoutingService};
use courier_trip::{Order, ProximityGate, TripEngine, TripEvent, TripPhase};

use crate::{
    ChecklistProgress, NoopObserver, SessionConfig, SessionError, SessionObserver, SessionResult,
    SessionSnapshot,
};

/// One courier's complete delivery session: permission/position tracking,
/// the throttled route overlay, and the trip state machine, wired together
/// behind a single mutable surface.
///
/// Every external event — a platform callback, a user gesture, a timer —
/// enters through exactly one `&mut self` method, so each one observes and
/// produces a fully consistent state (no interleaving, no partial
/// transitions).  [`snapshot`][Self::snapshot] taken between events is
/// therefore always coherent.
///
/// The session never reads a clock or touches the network: time arrives as
/// explicit [`TimestampMs`] arguments and routing goes through the
/// [`RoutingService`] collaborator, which keeps the whole aggregate
/// deterministic under test.
pub struct Session<P: LocationProvider, O: SessionObserver = NoopObserver> {
    config:      SessionConfig,
    /// Operating region; `None` disables the admission check.
    area:        Option<ServiceArea>,
    provider:    P,
    tracker:     LocationTracker,
    coordinator: RouteCoordinator,
    engine:      TripEngine,
    observer:    O,
}

impl<P: LocationProvider> Session<P> {
    /// A session over `provider` with no observer callbacks.
    pub fn new(provider: P, config: SessionConfig) -> Self {
        Self::with_observer(provider, config, NoopObserver)
    }
}

impl<P: LocationProvider, O: SessionObserver> Session<P, O> {
    pub fn with_observer(provider: P, config: SessionConfig, observer: O) -> Self {
        let area = config.area();
        let coordinator = RouteCoordinator::with_interval(config.route_refresh_interval_ms);
        let engine = TripEngine::with_gate(ProximityGate::new(config.geofence_radius_m));
        Self {
            config,
            area,
            provider,
            tracker: LocationTracker::new(),
            coordinator,
            engine,
            observer,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The platform provider, mutably — tests and demos drive scripted
    /// providers through this.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// The installed observer, for inspection after a run.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn permission(&self) -> PermissionState {
        self.tracker.permission()
    }

    pub fn phase(&self) -> TripPhase {
        self.engine.phase()
    }

    /// The courier's last accepted position.
    pub fn position(&self) -> Option<Coordinate> {
        self.tracker.current_sample().map(|s| s.coordinate)
    }

    /// The cached road-snapped path for the current leg.
    pub fn route(&self) -> &RoutePath {
        self.coordinator.path()
    }

    // ── Location events ───────────────────────────────────────────────────

    /// Acquire location permission and start tracking.  Idempotent.
    pub fn request_permission(&mut self) -> PermissionState {
        let before = self.tracker.permission();
        let after = self.tracker.request_permission(&mut self.provider);
        if after != before {
            self.observer.on_permission_change(after);
        }
        after
    }

    /// Feed one position fix from the platform.  Returns `true` if accepted
    /// (stale-watch and out-of-order fixes are dropped).
    pub fn handle_fix(&mut self, watch: WatchId, sample: LocationSample) -> bool {
        let before = self.tracker.permission();
        let accepted = self.tracker.handle_fix(watch, sample);
        if self.tracker.permission() != before {
            self.observer.on_permission_change(self.tracker.permission());
        }
        accepted
    }

    /// Feed one platform error (timeout, revocation, …).
    pub fn handle_location_error(&mut self, watch: WatchId, error: LocationError) {
        let before = self.tracker.permission();
        self.tracker.handle_error(&mut self.provider, watch, error);
        if self.tracker.permission() != before {
            self.observer.on_permission_change(self.tracker.permission());
        }
    }

    // ── Trip events ───────────────────────────────────────────────────────

    /// Accept an offered order and enter PICKUP.
    ///
    /// Beyond the state machine's own preconditions, the pickup location
    /// must lie inside the configured service area (when one is configured).
    pub fn accept_order(&mut self, order: Order) -> SessionResult<()> {
        if let Some(area) = &self.area
            && !area.contains(order.pickup, self.config.area_tolerance_m)
        {
            warn!(order = %order.id, "rejecting order: pickup outside the service area");
            return Err(SessionError::OutsideServiceArea);
        }

        let from = self.engine.phase();
        self.engine.accept_order(order)?;
        self.after_phase_change(from);
        Ok(())
    }

    /// Flip one checklist item's confirmed flag (PICKUP, in range only).
    pub fn toggle_item(&mut self, item: ItemId) -> SessionResult<bool> {
        Ok(self.engine.toggle_item(item, self.position())?)
    }

    /// Complete the current leg: store pickup or customer hand-over.
    pub fn advance(&mut self) -> SessionResult<TripEvent> {
        let from = self.engine.phase();
        let event = self.engine.advance(self.position())?;
        self.after_phase_change(from);
        if let TripEvent::DeliveryComplete { order } = &event {
            self.observer.on_trip_complete(order);
        }
        Ok(event)
    }

    /// Cancel the active trip; `None` when there was nothing to cancel.
    pub fn abandon(&mut self) -> Option<Order> {
        let from = self.engine.phase();
        let released = self.engine.abandon();
        if released.is_some() {
            self.after_phase_change(from);
        }
        released
    }

    /// Re-target the route overlay and notify after any successful
    /// transition.
    fn after_phase_change(&mut self, from: TripPhase) {
        let to = self.engine.phase();
        info!(%from, %to, "trip phase changed");
        self.coordinator.set_destination(self.engine.target());
        self.observer.on_phase_change(from, to);
    }

    // ── Route refresh cycle ───────────────────────────────────────────────

    /// Ask whether a routing call should happen now.  `None` while throttled,
    /// in flight, without a destination, or without a position fix.
    pub fn poll_route(&mut self, now: TimestampMs) -> Option<RouteQuery> {
        let origin = self.position()?;
        self.coordinator.poll(origin, now)
    }

    /// Report the outcome of a query issued by [`poll_route`][Self::poll_route].
    pub fn complete_route(
        &mut self,
        query:   &RouteQuery,
        outcome: RouteResult<RoutePath>,
        now:     TimestampMs,
    ) {
        let before = self.coordinator.last_refresh();
        self.coordinator.complete(query, outcome, now);
        if self.coordinator.last_refresh() != before {
            self.observer.on_route_refresh(self.coordinator.path());
        }
    }

    /// Poll-and-complete in one call, for synchronous routing collaborators.
    pub fn pump_route(&mut self, service: &dyn RoutingService, now: TimestampMs) {
        if let Some(query) = self.poll_route(now) {
            let outcome = service.route(query.origin, query.destination);
            self.complete_route(&query, outcome, now);
        }
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// One coherent observation of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let current = self.position();
        let distance_m = self.engine.distance_to_target(current);
        SessionSnapshot {
            permission:     self.tracker.permission(),
            sample:         self.tracker.current_sample(),
            location_error: self.tracker.last_error(),
            phase:          self.engine.phase(),
            order:          self.engine.order().map(|o| o.id),
            checklist:      self.engine.checklist().map(|c| ChecklistProgress {
                confirmed: c.confirmed_count(),
                total:     c.total(),
            }),
            target:         self.engine.target(),
            locked:         self.engine.locked(current),
            distance_m,
            distance_label: distance_m.map(format_distance_m),
            route:          self.coordinator.path().points().to_vec(),
        }
    }
}
