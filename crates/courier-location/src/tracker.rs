//! The permission/tracking state machine.

use courier_core::WatchId;
use tracing::debug;

use crate::{LocationError, LocationProvider, LocationSample, PermissionState};

/// Process-wide owner of the device's current position.
///
/// State machine: `Pending → {Granted, Denied}`, both re-enterable.
/// `Granted` carries an active watch that continuously replaces the current
/// sample; `Denied` is a dead end until [`request_permission`] is called
/// again.
///
/// The tracker holds no reference to the provider — every operation that
/// needs the platform takes it as an argument (the same explicit-collaborator
/// pattern the routing side uses), which keeps the struct trivially testable.
///
/// [`request_permission`]: LocationTracker::request_permission
#[derive(Debug, Default)]
pub struct LocationTracker {
    permission: PermissionState,
    sample:     Option<LocationSample>,
    last_error: Option<LocationError>,

    /// The one live subscription.  Events tagged with any other `WatchId`
    /// are stale and dropped.
    watch:      Option<WatchId>,
    next_watch: WatchId,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self {
            next_watch: WatchId(0),
            ..Self::default()
        }
    }

    // ── Read-only snapshots ───────────────────────────────────────────────

    #[inline]
    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    /// Last known sample; `None` before the first fix.
    #[inline]
    pub fn current_sample(&self) -> Option<LocationSample> {
        self.sample
    }

    /// Most recent platform error, cleared by the next successful fix.
    #[inline]
    pub fn last_error(&self) -> Option<LocationError> {
        self.last_error
    }

    /// `true` while a watch is active.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.watch.is_some()
    }

    // ── Permission acquisition ────────────────────────────────────────────

    /// Acquire permission and start continuous tracking.  Idempotent: calling
    /// it while already granted-and-tracking changes nothing.
    ///
    /// With a native bridge: non-intrusive query first, interactive request
    /// only if not already granted, and the watch starts only once
    /// authorized.  Without a bridge: subscribe directly — the first fix or
    /// error resolves the permission state.
    pub fn request_permission<P: LocationProvider>(&mut self, provider: &mut P) -> PermissionState {
        if !provider.is_supported() {
            self.last_error = Some(LocationError::NotSupported);
            return self.permission;
        }
        if self.permission == PermissionState::Granted && self.watch.is_some() {
            return self.permission;
        }

        match provider.query_permission() {
            Some(PermissionState::Granted) => self.grant(provider),
            Some(_) => match provider.request_permission() {
                Some(PermissionState::Granted) => self.grant(provider),
                Some(PermissionState::Denied) => self.deny(provider),
                // Bridge still undecided: stay pending, no watch yet.
                Some(PermissionState::Pending) | None => {}
            },
            // No native bridge: standard subscription path.
            None => self.resubscribe(provider),
        }

        self.permission
    }

    fn grant<P: LocationProvider>(&mut self, provider: &mut P) {
        self.permission = PermissionState::Granted;
        self.resubscribe(provider);
    }

    fn deny<P: LocationProvider>(&mut self, provider: &mut P) {
        self.permission = PermissionState::Denied;
        self.last_error = Some(LocationError::PermissionDenied);
        self.stop(provider);
    }

    /// Cancel any prior watch before starting a new one, so a superseded
    /// subscription can never interleave its callbacks with the live one.
    fn resubscribe<P: LocationProvider>(&mut self, provider: &mut P) {
        self.stop(provider);
        let watch = self.next_watch;
        self.next_watch = watch.next();
        provider.start_watch(watch);
        self.watch = Some(watch);
    }

    fn stop<P: LocationProvider>(&mut self, provider: &mut P) {
        if let Some(old) = self.watch.take() {
            provider.stop_watch(old);
        }
    }

    // ── Platform callbacks ────────────────────────────────────────────────

    /// Consume one fix delivered under `watch`.
    ///
    /// Returns `true` if the sample was accepted.  Fixes from a superseded
    /// watch, and fixes not newer than the current sample (duplicate or
    /// out-of-order delivery), are dropped.
    pub fn handle_fix(&mut self, watch: WatchId, sample: LocationSample) -> bool {
        if self.watch != Some(watch) {
            debug!(%watch, "ignoring fix from superseded subscription");
            return false;
        }
        if let Some(current) = self.sample
            && sample.timestamp <= current.timestamp
        {
            debug!(ts = %sample.timestamp, "ignoring out-of-order fix");
            return false;
        }

        self.sample = Some(sample);
        self.last_error = None;
        // A successful callback is an implicit grant on bridge-less surfaces.
        self.permission = PermissionState::Granted;
        true
    }

    /// Consume one platform error delivered under `watch`.
    ///
    /// Transient errors leave the watch running; `PermissionDenied` cancels
    /// it and flips the state to `Denied` (re-requestable).  The current
    /// sample is kept either way — stale-but-present beats empty.
    pub fn handle_error<P: LocationProvider>(
        &mut self,
        provider: &mut P,
        watch:    WatchId,
        error:    LocationError,
    ) {
        if self.watch != Some(watch) {
            debug!(%watch, "ignoring error from superseded subscription");
            return;
        }

        self.last_error = Some(error);
        if error == LocationError::PermissionDenied {
            self.permission = PermissionState::Denied;
            self.stop(provider);
        }
    }
}
