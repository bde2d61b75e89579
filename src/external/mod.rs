pub mod google_maps;

use async_trait::async_trait;

use crate::entities::{
    DirectionsRequest, GeoPoint, PlaceCandidate, PlaceSuggestions, RouteOption, SearchBias,
};
use crate::error::Error;
use crate::planner::naming::Geocoder;

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Route alternatives for the request, best first. Not retried.
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<RouteOption>, Error>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_places(
        &self,
        query: String,
        bias: Option<SearchBias>,
    ) -> Result<Vec<PlaceCandidate>, Error>;

    async fn find_place_suggestions(
        &self,
        input: String,
        location: GeoPoint,
        radius: f64,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error>;

    async fn find_place(&self, id: String, session_token: String) -> Result<PlaceCandidate, Error>;
}

/// Everything the planning engine needs from a maps vendor.
pub trait MapsProvider: Geocoder + DirectionsProvider + PlaceSearch {}

impl<T> MapsProvider for T where T: Geocoder + DirectionsProvider + PlaceSearch {}
