mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{places, sessions};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/sessions", post(sessions::create))
        .route(
            "/sessions/:id",
            get(sessions::find).delete(sessions::delete),
        )
        .route("/sessions/:id/routes/refresh", post(sessions::refresh_routes))
        .route("/sessions/:id/routes/select", patch(sessions::select_route))
        .route(
            "/sessions/:id/routes/preference",
            patch(sessions::set_route_preference),
        )
        .route("/sessions/:id/stops", post(sessions::add_stop))
        .route(
            "/sessions/:id/stops/:waypoint_id",
            delete(sessions::remove_stop),
        )
        .route(
            "/sessions/:id/stops/:waypoint_id/location",
            patch(sessions::move_stop),
        )
        .route("/sessions/:id/full_car", patch(sessions::set_full_car))
        .route("/sessions/:id/fares", get(sessions::fare_matrix))
        .route("/sessions/:id/places/search", get(places::search))
        .route("/places/name", get(places::resolve_name))
        .route("/places/suggestions", get(places::find_suggestions))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}
