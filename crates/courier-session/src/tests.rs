//! Unit and scenario tests for courier-session.

use courier_core::{Coordinate, ItemId, OrderId, TimestampMs, WatchId};
use courier_location::{
    LocationError, LocationSample, PermissionState, ProviderEvent, ReplayProvider,
};
use courier_route::{RoutePath, StraightLineRouter};
use courier_trip::{LineItem, Order, TripError, TripEvent, TripPhase};

use crate::{
    boundary, Session, SessionConfig, SessionError, SessionObserver,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

const STORE:    Coordinate = Coordinate { lat: 33.16382, lon: 43.86356 };
const CUSTOMER: Coordinate = Coordinate { lat: 33.17000, lon: 43.87000 };

/// ~5 m east of `c` — inside the 10 m geofence.
fn near(c: Coordinate) -> Coordinate {
    Coordinate::new(c.lat, c.lon + 0.00005)
}

/// ~500 m east of `c` — well outside the geofence.
fn far(c: Coordinate) -> Coordinate {
    Coordinate::new(c.lat, c.lon + 0.005)
}

fn two_item_order() -> Order {
    Order {
        id:            OrderId(901),
        store_name:    "Toto Market".into(),
        customer_name: "Sara A.".into(),
        pickup:        STORE,
        delivery:      CUSTOMER,
        items: vec![
            LineItem { id: ItemId(1), name: "Fresh tomatoes".into(), quantity: 2.0, unit: "kg".into() },
            LineItem { id: ItemId(2), name: "Cucumbers".into(), quantity: 1.0, unit: "kg".into() },
        ],
    }
}

/// Rectangle comfortably enclosing both the store and the customer.
fn district() -> Vec<Coordinate> {
    boundary([
        (33.150, 43.850),
        (33.150, 43.880),
        (33.180, 43.880),
        (33.180, 43.850),
    ])
}

fn district_config() -> SessionConfig {
    SessionConfig {
        service_area: district(),
        ..SessionConfig::default()
    }
}

/// A session with permission resolved and one fix already accepted at `at`.
///
/// The replay script is empty; fixes are fed directly under the first watch
/// handle the tracker issues.
fn located_session(config: SessionConfig, at: Coordinate) -> Session<ReplayProvider> {
    let mut s = Session::new(ReplayProvider::new([]), config);
    s.request_permission();
    assert!(s.handle_fix(WatchId(0), fix(at, 1_000)));
    s
}

fn fix(at: Coordinate, timestamp_ms: i64) -> LocationSample {
    LocationSample::new(at, 8.0, TimestampMs(timestamp_ms))
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn defaults_are_valid_and_open() {
        let c = SessionConfig::default();
        c.validate().unwrap();
        assert_eq!(c.geofence_radius_m, 10.0);
        assert_eq!(c.route_refresh_interval_ms, 20_000);
        assert!(c.area().is_none());
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let c = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(c, SessionConfig::default());
    }

    #[test]
    fn full_toml_round() {
        let c = SessionConfig::from_toml_str(
            r#"
            geofence_radius_m         = 25.0
            route_refresh_interval_ms = 5000
            area_tolerance_m          = 500.0

            [[service_area]]
            lat = 33.150
            lon = 43.850
            [[service_area]]
            lat = 33.150
            lon = 43.880
            [[service_area]]
            lat = 33.180
            lon = 43.880
            "#,
        )
        .unwrap();
        assert_eq!(c.geofence_radius_m, 25.0);
        assert_eq!(c.route_refresh_interval_ms, 5_000);
        assert_eq!(c.service_area.len(), 3);
        assert!(c.area().is_some());
    }

    #[test]
    fn nonpositive_radius_rejected() {
        let c = SessionConfig { geofence_radius_m: 0.0, ..SessionConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn nonpositive_interval_rejected() {
        let c = SessionConfig { route_refresh_interval_ms: 0, ..SessionConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn degenerate_area_rejected() {
        let c = SessionConfig {
            service_area: boundary([(33.0, 43.0), (33.1, 43.1)]),
            ..SessionConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }
}

// ── Order admission ───────────────────────────────────────────────────────────

#[cfg(test)]
mod admission {
    use super::*;

    #[test]
    fn pickup_inside_area_accepted() {
        let mut s = located_session(district_config(), far(STORE));
        s.accept_order(two_item_order()).unwrap();
        assert_eq!(s.phase(), TripPhase::Pickup);
    }

    #[test]
    fn pickup_outside_area_rejected() {
        let mut s = located_session(district_config(), far(STORE));
        let mut order = two_item_order();
        order.pickup = Coordinate::new(35.0, 45.0);

        assert_eq!(s.accept_order(order), Err(SessionError::OutsideServiceArea));
        assert_eq!(s.phase(), TripPhase::Idle);
        assert!(s.route().is_empty());
    }

    #[test]
    fn no_configured_area_admits_everything() {
        let mut s = located_session(SessionConfig::default(), far(STORE));
        let mut order = two_item_order();
        order.pickup = Coordinate::new(35.0, 45.0);
        assert!(s.accept_order(order).is_ok());
    }

    #[test]
    fn trip_preconditions_still_apply() {
        let mut s = located_session(district_config(), far(STORE));
        s.accept_order(two_item_order()).unwrap();
        assert_eq!(
            s.accept_order(two_item_order()),
            Err(SessionError::Trip(TripError::AlreadyOnTrip))
        );
    }
}

// ── Permission plumbing ───────────────────────────────────────────────────────

#[cfg(test)]
mod permission {
    use super::*;

    #[test]
    fn first_fix_resolves_bridgeless_permission() {
        let mut s = Session::new(ReplayProvider::new([]), SessionConfig::default());
        assert_eq!(s.request_permission(), PermissionState::Pending);
        assert!(s.handle_fix(WatchId(0), fix(STORE, 1_000)));
        assert_eq!(s.permission(), PermissionState::Granted);
        assert_eq!(s.position(), Some(STORE));
    }

    #[test]
    fn scripted_events_flow_through_the_provider() {
        let script = [
            ProviderEvent::Fix(fix(STORE, 1_000)),
            ProviderEvent::Fix(fix(near(STORE), 2_000)),
        ];
        let mut s = Session::new(ReplayProvider::new(script), SessionConfig::default());
        s.request_permission();
        while let Some((watch, event)) = s.provider_mut().next_event() {
            match event {
                ProviderEvent::Fix(sample) => {
                    s.handle_fix(watch, sample);
                }
                ProviderEvent::Error(e) => s.handle_location_error(watch, e),
            }
        }
        assert_eq!(s.position(), Some(near(STORE)));
    }

    #[test]
    fn revocation_freezes_progression_without_state_loss() {
        let mut s = located_session(district_config(), near(STORE));
        s.accept_order(two_item_order()).unwrap();
        s.toggle_item(ItemId(1)).unwrap();

        s.handle_location_error(WatchId(0), LocationError::PermissionDenied);

        let view = s.snapshot();
        assert_eq!(view.permission, PermissionState::Denied);
        assert_eq!(view.location_error, Some(LocationError::PermissionDenied));
        // Trip state survives; the stale sample is kept for display.
        assert_eq!(view.phase, TripPhase::Pickup);
        assert_eq!(view.order, Some(OrderId(901)));
        assert!(view.sample.is_some());
        // Later fixes on the cancelled watch are dropped.
        assert!(!s.handle_fix(WatchId(0), fix(near(STORE), 5_000)));
    }
}

// ── Route overlay ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use super::*;

    #[test]
    fn no_destination_no_query() {
        let mut s = located_session(district_config(), far(STORE));
        assert!(s.poll_route(TimestampMs(0)).is_none());
    }

    #[test]
    fn no_fix_no_query() {
        let mut s = Session::new(ReplayProvider::new([]), district_config());
        // An order can be on foot before GPS resolves; routing waits for a fix.
        s.accept_order(two_item_order()).unwrap();
        assert!(s.poll_route(TimestampMs(0)).is_none());
    }

    #[test]
    fn accept_retargets_and_pump_fills_the_route() {
        let mut s = located_session(district_config(), far(STORE));
        s.accept_order(two_item_order()).unwrap();

        s.pump_route(&StraightLineRouter, TimestampMs(1_000));
        let view = s.snapshot();
        assert_eq!(view.route.len(), 2);
        assert_eq!(view.route[1], STORE);
    }

    #[test]
    fn pump_respects_the_refresh_window() {
        let mut s = located_session(district_config(), far(STORE));
        s.accept_order(two_item_order()).unwrap();

        s.pump_route(&StraightLineRouter, TimestampMs(1_000));
        let first = s.route().clone();

        // New fix, window still closed: the cached route stands.
        s.handle_fix(WatchId(0), fix(far(CUSTOMER), 5_000));
        s.pump_route(&StraightLineRouter, TimestampMs(5_000));
        assert_eq!(*s.route(), first);

        // Window open: refreshed from the newer origin.
        s.pump_route(&StraightLineRouter, TimestampMs(25_000));
        assert_ne!(*s.route(), first);
    }

    #[test]
    fn failed_refresh_keeps_previous_route() {
        struct FailingRouter;
        impl courier_route::RoutingService for FailingRouter {
            fn route(
                &self,
                _origin:      Coordinate,
                _destination: Coordinate,
            ) -> courier_route::RouteResult<RoutePath> {
                Err(courier_route::RouteError::NoRoute)
            }
        }

        let mut s = located_session(district_config(), far(STORE));
        s.accept_order(two_item_order()).unwrap();
        s.pump_route(&StraightLineRouter, TimestampMs(1_000));
        let cached = s.route().clone();

        s.pump_route(&FailingRouter, TimestampMs(30_000));
        assert_eq!(*s.route(), cached);
    }

    #[test]
    fn completion_clears_destination_and_route() {
        let mut s = located_session(district_config(), near(STORE));
        s.accept_order(two_item_order()).unwrap();
        s.pump_route(&StraightLineRouter, TimestampMs(1_000));
        assert!(!s.route().is_empty());

        s.toggle_item(ItemId(1)).unwrap();
        s.toggle_item(ItemId(2)).unwrap();
        s.advance().unwrap();
        // Retargeted to the customer: old route dropped, refresh forced.
        assert!(s.poll_route(TimestampMs(2_000)).is_some());

        s.handle_fix(WatchId(0), fix(near(CUSTOMER), 3_000));
        s.advance().unwrap();
        assert!(s.route().is_empty());
        assert!(s.poll_route(TimestampMs(60_000)).is_none());
    }
}

// ── End-to-end scenario ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        permission_changes: Vec<PermissionState>,
        phase_changes:      Vec<(TripPhase, TripPhase)>,
        completed:          Vec<OrderId>,
        route_refreshes:    usize,
    }

    impl SessionObserver for Recorder {
        fn on_permission_change(&mut self, state: PermissionState) {
            self.permission_changes.push(state);
        }
        fn on_phase_change(&mut self, from: TripPhase, to: TripPhase) {
            self.phase_changes.push((from, to));
        }
        fn on_trip_complete(&mut self, order: &Order) {
            self.completed.push(order.id);
        }
        fn on_route_refresh(&mut self, _path: &RoutePath) {
            self.route_refreshes += 1;
        }
    }

    #[test]
    fn full_delivery_run() {
        let mut s = Session::with_observer(
            ReplayProvider::new([]),
            district_config(),
            Recorder::default(),
        );

        // Boot: permission resolves with the first fix, away from the store.
        s.request_permission();
        s.handle_fix(WatchId(0), fix(far(STORE), 1_000));

        // Offer accepted; heading to the store.
        s.accept_order(two_item_order()).unwrap();
        s.pump_route(&StraightLineRouter, TimestampMs(1_000));

        let view = s.snapshot();
        assert_eq!(view.phase, TripPhase::Pickup);
        assert_eq!(view.checklist.unwrap().total, 2);
        assert!(view.locked);
        assert_eq!(view.target, Some(STORE));
        assert!(view.distance_label.is_some());

        // Too far to verify items.
        assert_eq!(
            s.toggle_item(ItemId(1)),
            Err(SessionError::Trip(TripError::ProximityLocked))
        );

        // Arrive at the store; verify one item — not enough to leave.
        s.handle_fix(WatchId(0), fix(near(STORE), 10_000));
        assert_eq!(s.toggle_item(ItemId(1)), Ok(true));
        assert_eq!(
            s.advance(),
            Err(SessionError::Trip(TripError::ItemsUnconfirmed))
        );

        // Both items in hand: off to the customer.
        assert_eq!(s.toggle_item(ItemId(2)), Ok(true));
        assert_eq!(s.advance(), Ok(TripEvent::PickupComplete { order: OrderId(901) }));
        let view = s.snapshot();
        assert_eq!(view.phase, TripPhase::Delivery);
        assert_eq!(view.target, Some(CUSTOMER));
        assert!(view.checklist.is_none());

        // Retargeting forced an immediate refresh despite the window.
        s.pump_route(&StraightLineRouter, TimestampMs(11_000));
        assert_eq!(s.route().points().last().copied(), Some(CUSTOMER));

        // Hand-over at the door.
        s.handle_fix(WatchId(0), fix(near(CUSTOMER), 20_000));
        match s.advance() {
            Ok(TripEvent::DeliveryComplete { order }) => assert_eq!(order.id, OrderId(901)),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let view = s.snapshot();
        assert_eq!(view.phase, TripPhase::Idle);
        assert!(view.order.is_none());
        assert!(view.route.is_empty());
        assert_eq!(s.advance(), Err(SessionError::Trip(TripError::NoActiveTrip)));

        // The observer saw the whole story.
        let rec = s.observer();
        assert_eq!(rec.permission_changes, vec![PermissionState::Granted]);
        assert_eq!(
            rec.phase_changes,
            vec![
                (TripPhase::Idle, TripPhase::Pickup),
                (TripPhase::Pickup, TripPhase::Delivery),
                (TripPhase::Delivery, TripPhase::Idle),
            ]
        );
        assert_eq!(rec.completed, vec![OrderId(901)]);
        assert_eq!(rec.route_refreshes, 2);
    }

    #[test]
    fn abandon_resets_everything() {
        let mut s = located_session(district_config(), near(STORE));
        s.accept_order(two_item_order()).unwrap();
        s.toggle_item(ItemId(1)).unwrap();
        s.pump_route(&StraightLineRouter, TimestampMs(1_000));

        let released = s.abandon().unwrap();
        assert_eq!(released.id, OrderId(901));

        let view = s.snapshot();
        assert_eq!(view.phase, TripPhase::Idle);
        assert!(view.route.is_empty());
        assert!(view.checklist.is_none());
        // Position tracking is unaffected by trip resets.
        assert!(view.sample.is_some());
    }
}
