use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entities::{GeoPoint, ResolvedName};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    Origin,
    Intermediate,
    Destination,
}

impl WaypointKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Intermediate => "intermediate",
            Self::Destination => "destination",
        }
    }
}

impl Display for WaypointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a caller supplies for a stop; the sequence assigns id and kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopData {
    pub display_name: String,
    pub address: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub external_place_id: Option<String>,
}

impl StopData {
    pub fn new(display_name: impl Into<String>, address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            display_name: display_name.into(),
            address: address.into(),
            location,
            external_place_id: None,
        }
    }

    pub fn from_resolved(name: ResolvedName, location: GeoPoint) -> Self {
        Self::new(name.name, name.address, location)
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.external_place_id = Some(place_id.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// 1-based position in the sequence, reassigned on every membership change.
    pub id: u32,
    pub kind: WaypointKind,
    pub display_name: String,
    pub address: String,
    pub location: GeoPoint,
    pub external_place_id: Option<String>,
}

impl Waypoint {
    pub fn new(kind: WaypointKind, data: StopData) -> Self {
        Self {
            id: 0,
            kind,
            display_name: data.display_name,
            address: data.address,
            location: data.location,
            external_place_id: data.external_place_id,
        }
    }

    pub fn is_intermediate(&self) -> bool {
        self.kind == WaypointKind::Intermediate
    }

    pub fn apply(&mut self, data: StopData) {
        self.display_name = data.display_name;
        self.address = data.address;
        self.location = data.location;
        self.external_place_id = data.external_place_id;
    }
}
