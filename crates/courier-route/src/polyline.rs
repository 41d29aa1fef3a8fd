//! Google encoded-polyline decoding.
//!
//! The routing collaborator answers with geometry in Google's polyline5
//! format: each coordinate is a zig-zag-encoded delta from the previous one,
//! packed into printable ASCII in 5-bit chunks, at 1e-5 degree resolution.

use courier_core::Coordinate;

/// Decode an encoded polyline into coordinates.
///
/// Tolerant by design: a truncated trailing chunk yields the points decoded
/// so far rather than an error, and an empty string yields an empty vec —
/// the route layer treats "no geometry" as a soft failure anyway.
pub fn decode_polyline(encoded: &str) -> Vec<Coordinate> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();

    let mut index = 0usize;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        let Some(d_lat) = decode_value(bytes, &mut index) else { break };
        let Some(d_lon) = decode_value(bytes, &mut index) else { break };
        lat += d_lat;
        lon += d_lon;
        points.push(Coordinate::new(lat as f64 / 1e5, lon as f64 / 1e5));
    }

    points
}

/// Decode one zig-zag varint starting at `*index`; `None` on truncation.
fn decode_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut shift = 0u32;
    let mut result: i64 = 0;

    loop {
        let b = i64::from(*bytes.get(*index)?) - 63;
        *index += 1;
        result |= (b & 0x1f) << shift;
        shift += 5;
        if b < 0x20 {
            break;
        }
    }

    // Zig-zag: LSB is the sign.
    Some(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
