use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    GeoPoint, PlaceCandidate, RoutePreference, RouteSegment, RouteSummary, Waypoint,
};

/// Where a candidate stop comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopSource {
    /// Map click, drag or quick-add; the name is resolved from the coordinates.
    Coordinates { location: GeoPoint },
    /// Autocomplete selection, looked up through place details.
    GooglePlaces {
        place_id: String,
        session_token: String,
    },
    /// A search result the caller already holds.
    Candidate(PlaceCandidate),
}

fn default_seats() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(default = "default_seats")]
    pub seats: u32,
    #[serde(default)]
    pub rate_per_km: Option<f64>,
    #[serde(default)]
    pub full_car: bool,
    #[serde(default)]
    pub preference: RoutePreference,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            seats: default_seats(),
            rate_per_km: None,
            full_car: false,
            preference: RoutePreference::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub full_car: bool,
    pub seats: u32,
    pub rate_per_km: f64,
    pub preference: RoutePreference,
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<RouteSummary>,
    pub selected_route: Option<usize>,
    pub segments: Vec<RouteSegment>,
    pub display_path: Vec<GeoPoint>,
    pub notice: Option<String>,
}
