//! Great-circle distance between outlet coordinates.

use geo::{HaversineDistance, Point};

use crate::outlet::GeoPoint;

/// Radius a marker click uses to decide which outlets count as "nearby".
pub const DEFAULT_HIGHLIGHT_RADIUS_METERS: f64 = 5_000.0;

/// Distance in meters between two points on a spherical earth (haversine).
///
/// Symmetric, and zero for identical points. Behavior for NaN or
/// out-of-range coordinates is unspecified.
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let from = Point::new(a.longitude, a.latitude);
    let to = Point::new(b.longitude, b.latitude);
    from.haversine_distance(&to)
}
