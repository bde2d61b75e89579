use serde::Serialize;

use crate::entities::GeoPoint;
use crate::planner::distance::min_distance_to_polyline_km;
use crate::planner::Refusal;

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorridorCheck {
    pub is_valid: bool,
    pub distance_km: f64,
    pub max_distance_km: f64,
    pub message: String,
}

impl CorridorCheck {
    /// Distance to the route when valid, the matching refusal otherwise.
    pub fn into_result(self) -> Result<f64, Refusal> {
        if self.is_valid {
            return Ok(self.distance_km);
        }

        if self.distance_km.is_infinite() {
            return Err(Refusal::NoRouteSelected);
        }

        Err(Refusal::CorridorViolation {
            distance_km: self.distance_km,
            max_distance_km: self.max_distance_km,
            message: self.message,
        })
    }
}

/// Checks whether `candidate` lies within `max_distance_km` of `path`.
pub fn validate(candidate: &GeoPoint, path: &[GeoPoint], max_distance_km: f64) -> CorridorCheck {
    if path.is_empty() {
        return CorridorCheck {
            is_valid: false,
            distance_km: f64::INFINITY,
            max_distance_km,
            message: "no route selected".into(),
        };
    }

    let distance_km = min_distance_to_polyline_km(candidate, path);

    if distance_km <= max_distance_km {
        CorridorCheck {
            is_valid: true,
            distance_km,
            max_distance_km,
            message: format!("stop is {:.1} km from the route", distance_km),
        }
    } else {
        CorridorCheck {
            is_valid: false,
            distance_km,
            max_distance_km,
            message: format!(
                "stop is {:.1} km from the route, stops must be within {:.1} km",
                distance_km, max_distance_km
            ),
        }
    }
}
