//! Geographic coordinate type and spatial utilities.
//!
//! `Coordinate` uses `f64` (double-precision) latitude/longitude.  The trip
//! engine compares distances against a 10 m geofence, so worst-case `f32`
//! rounding (~1 m at the equator) would be visible at the boundary; `f64`
//! keeps the comparison exact at sub-millimetre scale.

/// Mean Earth radius in metres, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate stored as double-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and inside the WGS-84 range.
    ///
    /// `distance_m` deliberately accepts anything (NaN in → NaN out, the
    /// caller validates); use this at ingestion boundaries.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Zero for identical points, symmetric in its arguments.  Non-finite
    /// inputs propagate to a non-finite output.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Render a distance for display: metres below 1 km, kilometres above.
///
/// `936.4` → `"936 m"`, `1234.0` → `"1.2 km"`.  Locale-neutral; the
/// presentation layer translates units if it needs to.
pub fn format_distance_m(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}
