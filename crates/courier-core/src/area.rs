//! Operating-region boundary and padded containment test.
//!
//! # Approximation
//!
//! Containment is tested against the polygon's axis-aligned bounding box
//! expanded by a tolerance, not against the exact polygon.  This is cheap and
//! sufficient for coarse admission checks ("is this order anywhere near the
//! region we serve?").  The boundary polygon itself is retained, so callers
//! that ever need exact point-in-polygon can build it on top of the same
//! data without a model change.

use crate::error::{CoreError, CoreResult};
use crate::geo::Coordinate;

/// Metres per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest box enclosing `points`.  `points` must be non-empty.
    fn enclosing(points: &[Coordinate]) -> Self {
        let mut bb = BoundingBox {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for p in points {
            bb.min_lat = bb.min_lat.min(p.lat);
            bb.max_lat = bb.max_lat.max(p.lat);
            bb.min_lon = bb.min_lon.min(p.lon);
            bb.max_lon = bb.max_lon.max(p.lon);
        }
        bb
    }

    /// `true` when `point` lies inside the box expanded by the given paddings
    /// (degrees).
    #[inline]
    fn contains_padded(&self, point: Coordinate, pad_lat: f64, pad_lon: f64) -> bool {
        point.lat >= self.min_lat - pad_lat
            && point.lat <= self.max_lat + pad_lat
            && point.lon >= self.min_lon - pad_lon
            && point.lon <= self.max_lon + pad_lon
    }
}

// ── ServiceArea ───────────────────────────────────────────────────────────────

/// An operating region: an ordered boundary polygon plus its derived bounding
/// box and centroid.  Immutable once constructed; configured at startup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceArea {
    points:   Vec<Coordinate>,
    bounds:   BoundingBox,
    centroid: Coordinate,
}

impl ServiceArea {
    /// Build an area from its boundary points (in order).
    ///
    /// # Errors
    ///
    /// Fewer than 3 points or any out-of-range coordinate is rejected.
    pub fn new(points: Vec<Coordinate>) -> CoreResult<Self> {
        if points.len() < 3 {
            return Err(CoreError::InvalidServiceArea(
                "boundary needs at least 3 points",
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
            return Err(CoreError::InvalidCoordinate { lat: bad.lat, lon: bad.lon });
        }

        let bounds = BoundingBox::enclosing(&points);
        let n = points.len() as f64;
        let centroid = Coordinate::new(
            points.iter().map(|p| p.lat).sum::<f64>() / n,
            points.iter().map(|p| p.lon).sum::<f64>() / n,
        );

        Ok(Self { points, bounds, centroid })
    }

    /// The ordered boundary polygon.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn centroid(&self) -> Coordinate {
        self.centroid
    }

    /// Padded-bounding-box containment test.
    ///
    /// `tolerance_m` is converted to degrees: directly for latitude, scaled
    /// by `cos(centroid.lat)` for longitude so the padding stays roughly
    /// `tolerance_m` metres wide at the area's latitude.
    pub fn contains(&self, point: Coordinate, tolerance_m: f64) -> bool {
        let pad_lat = tolerance_m / METERS_PER_DEGREE;
        // Clamp the cosine so polar-ish areas don't divide by ~0.
        let cos_lat = self.centroid.lat.to_radians().cos().max(0.01);
        let pad_lon = tolerance_m / (METERS_PER_DEGREE * cos_lat);

        self.bounds.contains_padded(point, pad_lat, pad_lon)
    }
}
