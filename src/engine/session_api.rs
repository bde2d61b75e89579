use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::SessionAPI,
    entities::{
        FareMatrix, GeoPoint, RoutePreference, SessionOptions, SessionView, StopData, StopSource,
    },
    error::{not_found_error, Error},
    planner::{
        fares::validate_pricing,
        session::{PlanningSession, SessionSettings},
    },
};

#[async_trait]
impl SessionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_session(
        &self,
        origin: StopSource,
        destination: StopSource,
        options: SessionOptions,
    ) -> Result<SessionView, Error> {
        let rate_per_km = options.rate_per_km.unwrap_or(self.rate_per_km);

        validate_pricing(rate_per_km, options.seats)?;

        let (origin, destination) = futures::try_join!(
            self.resolve_source(origin),
            self.resolve_source(destination)
        )?;

        let settings = SessionSettings {
            seats: options.seats,
            rate_per_km,
            max_corridor_km: self.corridor_max_distance_km,
            preference: options.preference,
            full_car: options.full_car,
            search_debounce: self.search_debounce,
        };

        let session = PlanningSession::new(settings, origin, destination)?;
        let id = session.id();

        self.sessions.lock().await.insert(id, session);
        tracing::info!(%id, "planning session created");

        // A session without a route is still usable: it can be refreshed later.
        self.refresh_after_change(id).await;

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self, id: Uuid) -> Result<SessionView, Error> {
        self.with_session(id, |session| Ok(session.view())).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_session(&self, id: Uuid) -> Result<(), Error> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn refresh_routes(&self, id: Uuid) -> Result<SessionView, Error> {
        self.fetch_routes(id).await?;
        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn select_route(&self, id: Uuid, index: usize) -> Result<SessionView, Error> {
        self.with_session(id, |session| {
            session.select_route(index)?;
            Ok(session.view())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn set_route_preference(
        &self,
        id: Uuid,
        preference: RoutePreference,
    ) -> Result<SessionView, Error> {
        let changed = self
            .with_session(id, |session| Ok(session.set_preference(preference)))
            .await?;

        if changed {
            self.fetch_routes(id).await?;
        }

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn add_stop(&self, id: Uuid, source: StopSource) -> Result<SessionView, Error> {
        let (ticket, data) = match source {
            StopSource::Coordinates { location } => {
                // Refuse before spending a geocoding call.
                let ticket = self
                    .with_session(id, |session| Ok(session.stop_ticket(location)?))
                    .await?;
                let name = self.namer.resolve_name(location).await;

                (ticket, StopData::from_resolved(name, location))
            }
            source => {
                let data = self.resolve_source(source).await?;
                let location = data.location;
                let ticket = self
                    .with_session(id, |session| Ok(session.stop_ticket(location)?))
                    .await?;

                (ticket, data)
            }
        };

        self.with_session(id, move |session| {
            session.commit_insert(ticket, data)?;
            Ok(())
        })
        .await?;

        tracing::info!(%id, distance_km = ticket.distance_km, "stop added");
        self.refresh_after_change(id).await;

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_stop(&self, id: Uuid, waypoint_id: u32) -> Result<SessionView, Error> {
        let removed = self
            .with_session(id, |session| Ok(session.remove_stop(waypoint_id)?))
            .await?;

        tracing::info!(%id, name = %removed.display_name, "stop removed");
        self.refresh_after_change(id).await;

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn move_stop(
        &self,
        id: Uuid,
        waypoint_id: u32,
        location: GeoPoint,
    ) -> Result<SessionView, Error> {
        let ticket = self
            .with_session(id, |session| {
                Ok(session.relocation_ticket(waypoint_id, location)?)
            })
            .await?;

        let name = self.namer.resolve_name(location).await;
        let data = StopData::from_resolved(name, location);

        self.with_session(id, move |session| {
            session.commit_relocation(ticket, data)?;
            Ok(())
        })
        .await?;

        self.refresh_after_change(id).await;

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_full_car(&self, id: Uuid, enabled: bool) -> Result<SessionView, Error> {
        let change = self
            .with_session(id, |session| Ok(session.set_full_car(enabled)))
            .await?;

        if !change.removed.is_empty() {
            tracing::info!(%id, removed = change.removed.len(), "stops dropped for full car ride");
            self.refresh_after_change(id).await;
        }

        self.find_session(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn fare_matrix(&self, id: Uuid) -> Result<FareMatrix, Error> {
        self.with_session(id, |session| Ok(session.fare_matrix()?))
            .await
    }
}
