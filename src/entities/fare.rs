use serde::{Deserialize, Serialize};

/// Price of boarding at one waypoint and alighting at a later one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareCombination {
    pub from_waypoint_id: u32,
    pub to_waypoint_id: u32,
    pub distance_km: f64,
    pub fare: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareMatrix {
    pub combinations: Vec<FareCombination>,
    pub price_per_seat: u32,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
}
