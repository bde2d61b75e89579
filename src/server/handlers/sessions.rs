use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{
    FareMatrix, GeoPoint, RoutePreference, SessionOptions, SessionView, StopSource,
};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    origin: StopSource,
    destination: StopSource,
    #[serde(default)]
    options: SessionOptions,
}

#[derive(Serialize, Deserialize)]
pub struct SelectRouteParams {
    index: usize,
}

#[derive(Serialize, Deserialize)]
pub struct PreferenceParams {
    preference: RoutePreference,
}

#[derive(Serialize, Deserialize)]
pub struct AddStopParams {
    source: StopSource,
}

#[derive(Serialize, Deserialize)]
pub struct MoveStopParams {
    location: GeoPoint,
}

#[derive(Serialize, Deserialize)]
pub struct FullCarParams {
    enabled: bool,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api
        .create_session(params.origin, params.destination, params.options)
        .await?;

    Ok(session.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, Error> {
    let session = api.find_session(id).await?;

    Ok(session.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    api.delete_session(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh_routes(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, Error> {
    let session = api.refresh_routes(id).await?;

    Ok(session.into())
}

pub async fn select_route(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<SelectRouteParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.select_route(id, params.index).await?;

    Ok(session.into())
}

pub async fn set_route_preference(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<PreferenceParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.set_route_preference(id, params.preference).await?;

    Ok(session.into())
}

pub async fn add_stop(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<AddStopParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.add_stop(id, params.source).await?;

    Ok(session.into())
}

pub async fn remove_stop(
    Extension(api): Extension<DynAPI>,
    Path((id, waypoint_id)): Path<(Uuid, u32)>,
) -> Result<Json<SessionView>, Error> {
    let session = api.remove_stop(id, waypoint_id).await?;

    Ok(session.into())
}

pub async fn move_stop(
    Extension(api): Extension<DynAPI>,
    Path((id, waypoint_id)): Path<(Uuid, u32)>,
    Json(params): Json<MoveStopParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.move_stop(id, waypoint_id, params.location).await?;

    Ok(session.into())
}

pub async fn set_full_car(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<FullCarParams>,
) -> Result<Json<SessionView>, Error> {
    let session = api.set_full_car(id, params.enabled).await?;

    Ok(session.into())
}

pub async fn fare_matrix(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<FareMatrix>, Error> {
    let fares = api.fare_matrix(id).await?;

    Ok(fares.into())
}
