//! Scripted provider for tests and demos.
//!
//! # CSV track format
//!
//! One row per fix:
//!
//! ```csv
//! lat,lon,accuracy_m,timestamp_ms
//! 33.16382,43.86356,8.0,1000
//! 33.16390,43.86360,6.5,2000
//! ```
//!
//! Rows are replayed in file order; [`ReplayProvider::next_event`] pops one
//! per call while a watch is active, tagging it with the live [`WatchId`] so
//! the tracker's stale-subscription filter sees realistic handles.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use courier_core::{Coordinate, TimestampMs, WatchId};

use crate::{LocationProvider, LocationSample, PermissionState, ProviderEvent};

// ── ReplayError ───────────────────────────────────────────────────────────────

/// Errors loading a replay track.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TrackRecord {
    lat:          f64,
    lon:          f64,
    accuracy_m:   f64,
    timestamp_ms: i64,
}

// ── ReplayProvider ────────────────────────────────────────────────────────────

/// A [`LocationProvider`] that replays a pre-recorded script of fixes and
/// errors.
///
/// By default it models the bridge-less browser surface (permission hooks
/// return `None`).  [`with_native_bridge`][ReplayProvider::with_native_bridge]
/// switches it to the embedded-wrapper protocol, where the scripted
/// `query`/`request` answers drive the tracker's escalation path.
pub struct ReplayProvider {
    script:  VecDeque<ProviderEvent>,
    active:  Option<WatchId>,

    supported:      bool,
    /// `Some` = native bridge present; the value answers the non-intrusive query.
    bridge_query:   Option<PermissionState>,
    /// Answer to the interactive request (only consulted when a bridge exists).
    bridge_request: PermissionState,

    /// Watch handles started over this provider's lifetime, for assertions.
    pub started: Vec<WatchId>,
    /// Watch handles stopped over this provider's lifetime.
    pub stopped: Vec<WatchId>,
}

impl ReplayProvider {
    /// Bridge-less provider replaying `events`.
    pub fn new<I: IntoIterator<Item = ProviderEvent>>(events: I) -> Self {
        Self {
            script:         events.into_iter().collect(),
            active:         None,
            supported:      true,
            bridge_query:   None,
            bridge_request: PermissionState::Pending,
            started:        Vec::new(),
            stopped:        Vec::new(),
        }
    }

    /// Same script, but behind a native bridge that answers the permission
    /// query with `query` and the interactive request with `request`.
    pub fn with_native_bridge(mut self, query: PermissionState, request: PermissionState) -> Self {
        self.bridge_query = Some(query);
        self.bridge_request = request;
        self
    }

    /// An unsupported surface: no geolocation at all.
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    /// Load a fix-only script from a CSV track file.
    pub fn from_csv(path: &Path) -> Result<Self, ReplayError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Like [`from_csv`][Self::from_csv] but over any `Read` source —
    /// tests and demos pass inline tracks via `std::io::Cursor`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut events = VecDeque::new();
        for record in csv_reader.deserialize::<TrackRecord>() {
            let r = record?;
            events.push_back(ProviderEvent::Fix(LocationSample::new(
                Coordinate::new(r.lat, r.lon),
                r.accuracy_m,
                TimestampMs(r.timestamp_ms),
            )));
        }
        Ok(Self::new(events))
    }

    /// Pop the next scripted event, tagged with the live watch handle.
    ///
    /// `None` when the script is exhausted or no watch is active (a stopped
    /// provider delivers nothing, matching the platform contract).
    pub fn next_event(&mut self) -> Option<(WatchId, ProviderEvent)> {
        let watch = self.active?;
        self.script.pop_front().map(|e| (watch, e))
    }

    /// Remaining scripted events.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LocationProvider for ReplayProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn query_permission(&mut self) -> Option<PermissionState> {
        self.bridge_query
    }

    fn request_permission(&mut self) -> Option<PermissionState> {
        self.bridge_query.map(|_| self.bridge_request)
    }

    fn start_watch(&mut self, watch: WatchId) {
        self.active = Some(watch);
        self.started.push(watch);
    }

    fn stop_watch(&mut self, watch: WatchId) {
        if self.active == Some(watch) {
            self.active = None;
        }
        self.stopped.push(watch);
    }
}
