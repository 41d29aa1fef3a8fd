//! The platform-provider contract.

use courier_core::WatchId;

use crate::{LocationError, LocationSample};

// ── PermissionState ───────────────────────────────────────────────────────────

/// Authorization state for location access.
///
/// Starts `Pending`; flips to `Granted` on an explicit platform grant or the
/// first successful fix, to `Denied` on an explicit denial.  Both `Granted`
/// and `Denied` are re-enterable: permission can be revoked after a grant and
/// re-requested after a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PermissionState {
    #[default]
    Pending,
    Granted,
    Denied,
}

// ── ProviderEvent ─────────────────────────────────────────────────────────────

/// What a provider delivers on an active watch: a fix or a platform error.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    Fix(LocationSample),
    Error(LocationError),
}

// ── LocationProvider trait ────────────────────────────────────────────────────

/// Capability interface over the platform's geolocation surface.
///
/// One contract, two production variants: the browser watch API and the
/// embedded native bridge.  The bridge variant overrides the two permission
/// hooks; the browser variant leaves them at the default `None`, which tells
/// [`LocationTracker`][crate::LocationTracker] to subscribe directly and let
/// the first callback resolve the permission state.
///
/// Watch lifecycle: the tracker issues the [`WatchId`] and asks the provider
/// to start delivering events under it.  Providers must stop delivering for a
/// handle after `stop_watch(handle)`; events that race past anyway are
/// filtered by the tracker.
pub trait LocationProvider {
    /// Whether geolocation exists on this surface at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Non-intrusive permission query via the native bridge.
    ///
    /// `None` when no bridge is present.
    fn query_permission(&mut self) -> Option<PermissionState> {
        None
    }

    /// Interactive permission request via the native bridge (may show a
    /// system prompt).  `None` when no bridge is present.
    fn request_permission(&mut self) -> Option<PermissionState> {
        None
    }

    /// Begin continuous position delivery under `watch`.
    fn start_watch(&mut self, watch: WatchId);

    /// Cancel delivery for `watch`.
    fn stop_watch(&mut self, watch: WatchId);
}
