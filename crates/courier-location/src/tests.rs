//! Unit tests for courier-location.

use std::io::Cursor;

use courier_core::{Coordinate, TimestampMs, WatchId};

use crate::{
    LocationError, LocationProvider, LocationSample, LocationTracker, PermissionState,
    ProviderEvent, ReplayProvider,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn fix(lat: f64, lon: f64, ts: i64) -> ProviderEvent {
    ProviderEvent::Fix(sample(lat, lon, ts))
}

fn sample(lat: f64, lon: f64, ts: i64) -> LocationSample {
    LocationSample::new(Coordinate::new(lat, lon), 8.0, TimestampMs(ts))
}

/// Drain the provider's script into the tracker.
fn pump(tracker: &mut LocationTracker, provider: &mut ReplayProvider) {
    while let Some((watch, event)) = provider.next_event() {
        match event {
            ProviderEvent::Fix(s) => {
                tracker.handle_fix(watch, s);
            }
            ProviderEvent::Error(e) => tracker.handle_error(provider, watch, e),
        }
    }
}

// ── Permission acquisition ────────────────────────────────────────────────────

#[cfg(test)]
mod permission {
    use super::*;

    #[test]
    fn starts_pending_with_no_sample() {
        let t = LocationTracker::new();
        assert_eq!(t.permission(), PermissionState::Pending);
        assert!(t.current_sample().is_none());
        assert!(!t.is_tracking());
    }

    #[test]
    fn bridgeless_surface_subscribes_immediately() {
        let mut p = ReplayProvider::new([fix(33.16, 43.86, 1_000)]);
        let mut t = LocationTracker::new();

        t.request_permission(&mut p);
        assert!(t.is_tracking());
        // Permission stays pending until the first callback resolves it.
        assert_eq!(t.permission(), PermissionState::Pending);

        pump(&mut t, &mut p);
        assert_eq!(t.permission(), PermissionState::Granted);
        assert!(t.current_sample().is_some());
    }

    #[test]
    fn bridge_already_granted_skips_interactive_request() {
        let mut p = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Granted, PermissionState::Denied);
        let mut t = LocationTracker::new();

        assert_eq!(t.request_permission(&mut p), PermissionState::Granted);
        assert!(t.is_tracking());
    }

    #[test]
    fn bridge_escalates_to_interactive_request() {
        let mut p = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Pending, PermissionState::Granted);
        let mut t = LocationTracker::new();

        assert_eq!(t.request_permission(&mut p), PermissionState::Granted);
        assert!(t.is_tracking());
    }

    #[test]
    fn bridge_denial_is_a_dead_end_without_a_watch() {
        let mut p = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Pending, PermissionState::Denied);
        let mut t = LocationTracker::new();

        assert_eq!(t.request_permission(&mut p), PermissionState::Denied);
        assert!(!t.is_tracking());
        assert_eq!(t.last_error(), Some(LocationError::PermissionDenied));
    }

    #[test]
    fn request_is_idempotent_while_granted() {
        let mut p = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Granted, PermissionState::Granted);
        let mut t = LocationTracker::new();

        t.request_permission(&mut p);
        t.request_permission(&mut p);
        // One watch total — no churn on repeated calls.
        assert_eq!(p.started.len(), 1);
        assert!(p.stopped.is_empty());
    }

    #[test]
    fn denial_is_reenterable() {
        let mut denying = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Denied, PermissionState::Denied);
        let mut t = LocationTracker::new();
        t.request_permission(&mut denying);
        assert_eq!(t.permission(), PermissionState::Denied);

        // The user flips the toggle in system settings; next request succeeds.
        let mut granting = ReplayProvider::new([])
            .with_native_bridge(PermissionState::Granted, PermissionState::Granted);
        assert_eq!(t.request_permission(&mut granting), PermissionState::Granted);
        assert!(t.is_tracking());
    }

    #[test]
    fn unsupported_surface_reports_not_supported() {
        let mut p = ReplayProvider::new([fix(0.0, 0.0, 1)]).unsupported();
        let mut t = LocationTracker::new();

        t.request_permission(&mut p);
        assert_eq!(t.permission(), PermissionState::Pending);
        assert_eq!(t.last_error(), Some(LocationError::NotSupported));
        assert!(!t.is_tracking());
    }
}

// ── Fix stream filtering ──────────────────────────────────────────────────────

#[cfg(test)]
mod fix_stream {
    use super::*;

    fn granted_tracker(p: &mut ReplayProvider) -> LocationTracker {
        let mut t = LocationTracker::new();
        t.request_permission(p);
        t
    }

    #[test]
    fn each_fix_replaces_the_previous() {
        let mut p = ReplayProvider::new([fix(1.0, 1.0, 1_000), fix(2.0, 2.0, 2_000)]);
        let mut t = granted_tracker(&mut p);
        pump(&mut t, &mut p);

        let s = t.current_sample().unwrap();
        assert_eq!(s.coordinate, Coordinate::new(2.0, 2.0));
    }

    #[test]
    fn out_of_order_fix_dropped() {
        let mut p = ReplayProvider::new([fix(1.0, 1.0, 2_000)]);
        let mut t = granted_tracker(&mut p);
        pump(&mut t, &mut p);

        let watch = *p.started.last().unwrap();
        assert!(!t.handle_fix(watch, sample(9.0, 9.0, 1_500)));
        assert_eq!(t.current_sample().unwrap().coordinate, Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn duplicate_timestamp_dropped() {
        let mut p = ReplayProvider::new([fix(1.0, 1.0, 2_000)]);
        let mut t = granted_tracker(&mut p);
        pump(&mut t, &mut p);

        let watch = *p.started.last().unwrap();
        assert!(!t.handle_fix(watch, sample(9.0, 9.0, 2_000)));
    }

    #[test]
    fn superseded_watch_fix_dropped() {
        let mut p = ReplayProvider::new([]);
        let mut t = granted_tracker(&mut p);

        // Fixes tagged with a handle the tracker never issued are stale.
        assert!(!t.handle_fix(WatchId(99), sample(9.0, 9.0, 1_000)));
        assert!(t.current_sample().is_none());
    }
}

// ── Error handling ────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn transient_error_keeps_watch_and_sample() {
        let mut p = ReplayProvider::new([
            fix(1.0, 1.0, 1_000),
            ProviderEvent::Error(LocationError::Timeout),
        ]);
        let mut t = LocationTracker::new();
        t.request_permission(&mut p);
        pump(&mut t, &mut p);

        assert_eq!(t.last_error(), Some(LocationError::Timeout));
        assert!(t.is_tracking());
        // Stale-but-present beats empty.
        assert!(t.current_sample().is_some());
        assert_eq!(t.permission(), PermissionState::Granted);
    }

    #[test]
    fn next_fix_clears_transient_error() {
        let mut p = ReplayProvider::new([
            ProviderEvent::Error(LocationError::PositionUnavailable),
            fix(1.0, 1.0, 1_000),
        ]);
        let mut t = LocationTracker::new();
        t.request_permission(&mut p);
        pump(&mut t, &mut p);

        assert!(t.last_error().is_none());
    }

    #[test]
    fn permission_denied_halts_tracking() {
        let mut p = ReplayProvider::new([
            fix(1.0, 1.0, 1_000),
            ProviderEvent::Error(LocationError::PermissionDenied),
        ]);
        let mut t = LocationTracker::new();
        t.request_permission(&mut p);
        pump(&mut t, &mut p);

        assert_eq!(t.permission(), PermissionState::Denied);
        assert!(!t.is_tracking());
        assert_eq!(p.stopped.len(), 1);
        // Trip state upstream relies on the last sample surviving revocation.
        assert!(t.current_sample().is_some());
    }

    #[test]
    fn transient_classification() {
        assert!(LocationError::Timeout.is_transient());
        assert!(LocationError::PositionUnavailable.is_transient());
        assert!(LocationError::Unknown.is_transient());
        assert!(!LocationError::PermissionDenied.is_transient());
        assert!(!LocationError::NotSupported.is_transient());
    }
}

// ── Replay CSV loader ─────────────────────────────────────────────────────────

#[cfg(test)]
mod replay_csv {
    use super::*;

    const TRACK: &str = "\
lat,lon,accuracy_m,timestamp_ms
33.16382,43.86356,8.0,1000
33.16390,43.86360,6.5,2000
";

    #[test]
    fn loads_fixes_in_order() {
        let mut p = ReplayProvider::from_csv_reader(Cursor::new(TRACK)).unwrap();
        assert_eq!(p.remaining(), 2);

        let mut t = LocationTracker::new();
        t.request_permission(&mut p);
        pump(&mut t, &mut p);

        let s = t.current_sample().unwrap();
        assert_eq!(s.timestamp, TimestampMs(2_000));
        assert!((s.accuracy_m - 6.5).abs() < 1e-9);
    }

    #[test]
    fn malformed_row_is_an_error() {
        let bad = "lat,lon,accuracy_m,timestamp_ms\nnot-a-number,1,1,1\n";
        assert!(ReplayProvider::from_csv_reader(Cursor::new(bad)).is_err());
    }

    #[test]
    fn stopped_provider_delivers_nothing() {
        let mut p = ReplayProvider::from_csv_reader(Cursor::new(TRACK)).unwrap();
        p.start_watch(WatchId(0));
        p.stop_watch(WatchId(0));
        assert!(p.next_event().is_none());
    }
}
