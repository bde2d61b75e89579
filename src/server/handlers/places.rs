use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{GeoPoint, PlaceSearchResults, PlaceSuggestions, ResolvedName};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    query: String,
}

#[derive(Serialize, Deserialize)]
pub struct SuggestionParams {
    input: String,
    latitude: f64,
    longitude: f64,
    radius: f64,
    session_token: String,
}

pub async fn resolve_name(
    Extension(api): Extension<DynAPI>,
    Query(point): Query<GeoPoint>,
) -> Result<Json<ResolvedName>, Error> {
    let name = api.resolve_name(point).await?;

    Ok(name.into())
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PlaceSearchResults>, Error> {
    let results = api.search_places(id, params.query).await?;

    Ok(results.into())
}

pub async fn find_suggestions(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<PlaceSuggestions>, Error> {
    let location = GeoPoint::new(params.latitude, params.longitude);
    let suggestions = api
        .find_place_suggestions(params.input, location, params.radius, params.session_token)
        .await?;

    Ok(suggestions.into())
}
