//! The road-snapped polyline value type.

use courier_core::Coordinate;

/// An ordered sequence of coordinates tracing the road network from the
/// courier's position to the active target.
///
/// A `RoutePath` is never mutated in place: each successful refresh builds a
/// new one and swaps it wholesale, so readers can hold a clone without ever
/// observing a half-updated line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePath {
    points: Vec<Coordinate>,
}

impl RoutePath {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Sum of the segment lengths in metres.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_m(w[1]))
            .sum()
    }
}

impl From<Vec<Coordinate>> for RoutePath {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}
