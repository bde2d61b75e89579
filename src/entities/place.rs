use serde::{Deserialize, Serialize};

use crate::entities::GeoPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// A reverse geocoding hit, field names as the geocoding API sends them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedName {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub place_id: Option<String>,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

pub type PlaceSuggestions = Vec<PlaceSuggestion>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchBias {
    pub location: GeoPoint,
    pub radius_m: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchResults {
    /// Set when a newer query from the same session replaced this one.
    pub superseded: bool,
    pub candidates: Vec<PlaceCandidate>,
}

impl PlaceSearchResults {
    pub fn superseded() -> Self {
        Self {
            superseded: true,
            candidates: vec![],
        }
    }
}
