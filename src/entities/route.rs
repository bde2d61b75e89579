use serde::{Deserialize, Serialize};

use crate::entities::GeoPoint;
use crate::planner::polyline;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    #[default]
    Fastest,
    AvoidTolls,
    AvoidHighways,
}

impl RoutePreference {
    /// Value of the provider's `avoid` parameter, if any.
    pub fn avoid(&self) -> Option<&'static str> {
        match self {
            Self::Fastest => None,
            Self::AvoidTolls => Some("tolls"),
            Self::AvoidHighways => Some("highways"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub stops: Vec<GeoPoint>,
    pub preference: RoutePreference,
}

impl DirectionsRequest {
    /// Origin, stops and destination in travel order.
    pub fn waypoints(&self) -> Vec<GeoPoint> {
        let mut points = Vec::with_capacity(self.stops.len() + 2);
        points.push(self.origin);
        points.extend(self.stops.iter().copied());
        points.push(self.destination);
        points
    }
}

/// One leg per adjacent waypoint pair, as reported by the directions provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub distance_km: f64,
    pub duration_minutes: f64,
}

/// Route geometry. Never empty; replaced wholesale when the route changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePolyline {
    points: Vec<GeoPoint>,
    approximate: bool,
}

impl RoutePolyline {
    pub fn new(points: Vec<GeoPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        Some(Self {
            points,
            approximate: false,
        })
    }

    /// Straight segments between the given waypoints. Good enough for map
    /// display when no provider geometry is available.
    pub fn straight_line(waypoints: &[GeoPoint]) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }

        Some(Self {
            points: waypoints.to_vec(),
            approximate: true,
        })
    }

    #[tracing::instrument(skip(encoded, waypoints), fields(encoded_len = encoded.len()))]
    pub fn from_encoded(encoded: &str, waypoints: &[GeoPoint]) -> Option<Self> {
        match polyline::decode(encoded) {
            Ok(points) if !points.is_empty() => Self::new(points),
            Ok(_) => {
                tracing::warn!("provider returned an empty polyline, using straight line");
                Self::straight_line(waypoints)
            }
            Err(err) => {
                tracing::warn!(%err, "could not decode polyline, using straight line");
                Self::straight_line(waypoints)
            }
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn is_approximate(&self) -> bool {
        self.approximate
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub summary: String,
    pub legs: Vec<Leg>,
    pub polyline: RoutePolyline,
}

impl RouteOption {
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_km).sum()
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_minutes).sum()
    }

    pub fn leg_distances_km(&self) -> Vec<f64> {
        self.legs.iter().map(|leg| leg.distance_km).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub index: usize,
    pub summary: String,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub approximate: bool,
}

impl RouteSummary {
    pub fn new(index: usize, route: &RouteOption) -> Self {
        Self {
            index,
            summary: route.summary.clone(),
            total_distance_km: route.total_distance_km(),
            total_duration_minutes: route.total_duration_minutes(),
            approximate: route.polyline.is_approximate(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_waypoint_id: u32,
    pub to_waypoint_id: u32,
    pub distance_km: f64,
    pub duration_minutes: f64,
}
