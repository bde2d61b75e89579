use crate::entities::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points.
pub fn haversine_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dist_lat = f64::to_radians(b.latitude - a.latitude);
    let dist_lon = f64::to_radians(b.longitude - a.longitude);
    let h = f64::powi(f64::sin(dist_lat / 2.0), 2)
        + f64::cos(f64::to_radians(a.latitude))
            * f64::cos(f64::to_radians(b.latitude))
            * f64::sin(dist_lon / 2.0)
            * f64::sin(dist_lon / 2.0);
    let c = 2.0 * f64::atan2(f64::sqrt(h), f64::sqrt(1.0 - h));
    EARTH_RADIUS_KM * c
}

/// Distance from `point` to the closest vertex of `path`, `+inf` for an empty
/// path.
///
/// Measures to vertices only, not to the segments between them. Corridor
/// outcomes near the limit depend on this.
pub fn min_distance_to_polyline_km(point: &GeoPoint, path: &[GeoPoint]) -> f64 {
    path.iter()
        .map(|vertex| haversine_distance_km(point, vertex))
        .fold(f64::INFINITY, f64::min)
}
