use super::Engine;

use uuid::Uuid;

use crate::{
    entities::{StopData, StopSource},
    error::{not_found_error, Error},
    external::{DirectionsProvider, PlaceSearch},
    planner::session::PlanningSession,
};

impl Engine {
    /// Runs `f` against the session while holding the session lock. Never
    /// await inside `f`.
    pub(super) async fn with_session<T, F>(&self, id: Uuid, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut PlanningSession) -> Result<T, Error> + Send,
        T: Send,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(not_found_error)?;

        f(session)
    }

    #[tracing::instrument(skip(self))]
    pub(super) async fn resolve_source(&self, source: StopSource) -> Result<StopData, Error> {
        match source {
            StopSource::Coordinates { location } => {
                let name = self.namer.resolve_name(location).await;
                Ok(StopData::from_resolved(name, location))
            }
            StopSource::GooglePlaces {
                place_id,
                session_token,
            } => {
                let place = self.maps.find_place(place_id, session_token).await?;
                let data = StopData::new(place.name, place.address, place.location);

                Ok(match place.place_id {
                    Some(place_id) => data.with_place_id(place_id),
                    None => data,
                })
            }
            StopSource::Candidate(candidate) => {
                let data = StopData::new(candidate.name, candidate.address, candidate.location);

                Ok(match candidate.place_id {
                    Some(place_id) => data.with_place_id(place_id),
                    None => data,
                })
            }
        }
    }

    /// Fetches directions for the session's current stops. Returns `false`
    /// when the stops, preference or selected route changed while the request
    /// was in flight and the result was dropped.
    #[tracing::instrument(skip(self))]
    pub(super) async fn fetch_routes(&self, id: Uuid) -> Result<bool, Error> {
        let snapshot = self
            .with_session(id, |session| Ok(session.route_snapshot()?))
            .await?;

        let routes = self.maps.directions(snapshot.request.clone()).await?;

        let applied = self
            .with_session(id, |session| Ok(session.apply_routes(&snapshot, routes)))
            .await?;

        if !applied {
            tracing::debug!(
                revision = snapshot.revision,
                route_generation = snapshot.route_generation,
                "session changed during directions request, result dropped"
            );
        }

        Ok(applied)
    }

    /// Like [`fetch_routes`](Self::fetch_routes) after a stop change, where a
    /// provider failure leaves the previous route in place.
    pub(super) async fn refresh_after_change(&self, id: Uuid) {
        if let Err(err) = self.fetch_routes(id).await {
            tracing::warn!(%id, code = err.code, "could not refresh routes: {}", err.message);
        }
    }
}
