//! Geofence distance computation
//!
//! Distances are ellipsoidal geodesics (Karney's algorithm via the `geo`
//! crate), not spherical haversine; the pass/fail boundary at the allowed
//! radius is sensitive to the model choice.

use geo::{GeodesicDistance, point};

/// Great-circle surface distance in kilometers between two (lat, lng) pairs
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    // geo points are (x = longitude, y = latitude)
    let pa = point!(x: a.1, y: a.0);
    let pb = point!(x: b.1, y: b.0);
    pa.geodesic_distance(&pb) / 1000.0
}
