use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Canonical coordinate type. Provider shapes (`lat`/`lng`) are converted into
/// this at the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both axes rounded to 6 decimal places, e.g. `12.971600_77.594600`.
    pub fn cache_key(&self) -> String {
        format!("{:.6}_{:.6}", self.latitude, self.longitude)
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<GeoPoint> for String {
    fn from(point: GeoPoint) -> Self {
        format!("{},{}", point.latitude, point.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_rounds_to_six_places() {
        let a = GeoPoint::new(12.97160001, 77.59460004);
        let b = GeoPoint::new(12.9716, 77.5946);

        assert_eq!(a.cache_key(), "12.971600_77.594600");
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn provider_string_is_lat_comma_lng() {
        assert_eq!(String::from(GeoPoint::new(48.85, 2.35)), "48.85,2.35");
    }
}
