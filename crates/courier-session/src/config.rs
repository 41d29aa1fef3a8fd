//! TOML-loadable session configuration.
//!
//! # File format
//!
//! ```toml
//! geofence_radius_m         = 10.0
//! route_refresh_interval_ms = 20000
//! area_tolerance_m          = 1000.0
//!
//! [[service_area]]
//! lat = 33.35
//! lon = 44.30
//! # … at least 3 boundary points, in order.  Omit the table entirely to
//! # disable the admission check.
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use courier_core::{Coordinate, ServiceArea};
use courier_route::REFRESH_INTERVAL_MS;
use courier_trip::GEOFENCE_RADIUS_M;

// ── ConfigError ───────────────────────────────────────────────────────────────

/// Errors loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

// ── SessionConfig ─────────────────────────────────────────────────────────────

/// Tunable parameters of a courier session.  Every field has the production
/// default, so an empty TOML file (or [`SessionConfig::default()`]) is a
/// fully working configuration with the admission check disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Radius of the proximity gate, metres.
    pub geofence_radius_m: f64,

    /// Minimum spacing between routing calls for an unchanged destination.
    pub route_refresh_interval_ms: i64,

    /// Padding applied to the service-area bounding box, metres.
    pub area_tolerance_m: f64,

    /// Ordered boundary of the operating region.  Empty disables the
    /// service-area admission check at order acceptance.
    pub service_area: Vec<Coordinate>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            geofence_radius_m:         GEOFENCE_RADIUS_M,
            route_refresh_interval_ms: REFRESH_INTERVAL_MS,
            area_tolerance_m:          1_000.0,
            service_area:              Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Check field ranges.  Called by the loaders; call it yourself after
    /// building a config in code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.geofence_radius_m > 0.0) {
            return Err(ConfigError::Invalid("geofence_radius_m must be positive"));
        }
        if self.route_refresh_interval_ms <= 0 {
            return Err(ConfigError::Invalid(
                "route_refresh_interval_ms must be positive",
            ));
        }
        if !(self.area_tolerance_m >= 0.0) {
            return Err(ConfigError::Invalid("area_tolerance_m must not be negative"));
        }
        if !self.service_area.is_empty() {
            // Delegate boundary checks (point count, coordinate ranges).
            ServiceArea::new(self.service_area.clone())
                .map_err(|_| ConfigError::Invalid("service_area is not a valid boundary"))?;
        }
        Ok(())
    }

    /// The configured operating region, if any.
    ///
    /// Only meaningful after [`validate`][Self::validate] has passed; an
    /// invalid boundary reads as "no admission check".
    pub fn area(&self) -> Option<ServiceArea> {
        if self.service_area.is_empty() {
            return None;
        }
        ServiceArea::new(self.service_area.clone()).ok()
    }
}

/// Convenience for building a config boundary inline.
pub fn boundary<const N: usize>(points: [(f64, f64); N]) -> Vec<Coordinate> {
    points
        .into_iter()
        .map(|(lat, lon)| Coordinate::new(lat, lon))
        .collect()
}
