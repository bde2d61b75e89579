use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    FareMatrix, GeoPoint, PlaceSearchResults, PlaceSuggestions, ResolvedName, RoutePreference,
    SessionOptions, SessionView, StopSource,
};
use crate::error::Error;

#[async_trait]
pub trait SessionAPI {
    async fn create_session(
        &self,
        origin: StopSource,
        destination: StopSource,
        options: SessionOptions,
    ) -> Result<SessionView, Error>;

    async fn find_session(&self, id: Uuid) -> Result<SessionView, Error>;

    async fn delete_session(&self, id: Uuid) -> Result<(), Error>;

    async fn refresh_routes(&self, id: Uuid) -> Result<SessionView, Error>;

    async fn select_route(&self, id: Uuid, index: usize) -> Result<SessionView, Error>;

    async fn set_route_preference(
        &self,
        id: Uuid,
        preference: RoutePreference,
    ) -> Result<SessionView, Error>;

    async fn add_stop(&self, id: Uuid, source: StopSource) -> Result<SessionView, Error>;

    async fn remove_stop(&self, id: Uuid, waypoint_id: u32) -> Result<SessionView, Error>;

    async fn move_stop(
        &self,
        id: Uuid,
        waypoint_id: u32,
        location: GeoPoint,
    ) -> Result<SessionView, Error>;

    async fn set_full_car(&self, id: Uuid, enabled: bool) -> Result<SessionView, Error>;

    async fn fare_matrix(&self, id: Uuid) -> Result<FareMatrix, Error>;
}

#[async_trait]
pub trait PlaceAPI {
    async fn resolve_name(&self, point: GeoPoint) -> Result<ResolvedName, Error>;

    async fn search_places(&self, id: Uuid, query: String) -> Result<PlaceSearchResults, Error>;

    async fn find_place_suggestions(
        &self,
        input: String,
        location: GeoPoint,
        radius: f64,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error>;
}

pub trait API: SessionAPI + PlaceAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
