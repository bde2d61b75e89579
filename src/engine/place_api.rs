use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    entities::{GeoPoint, PlaceSearchResults, PlaceSuggestions, ResolvedName, SearchBias},
    error::Error,
    external::PlaceSearch,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_name(&self, point: GeoPoint) -> Result<ResolvedName, Error> {
        Ok(self.namer.resolve_name(point).await)
    }

    #[tracing::instrument(skip(self))]
    async fn search_places(&self, id: Uuid, query: String) -> Result<PlaceSearchResults, Error> {
        let (debouncer, origin) = self
            .with_session(id, |session| {
                Ok((session.search_debouncer(), session.origin_location()))
            })
            .await?;

        if !debouncer.settle().await {
            tracing::debug!(%id, "search superseded by a newer query");
            return Ok(PlaceSearchResults::superseded());
        }

        let query = query.trim();
        if query.is_empty() {
            return Ok(PlaceSearchResults::default());
        }

        let bias = origin.map(|location| SearchBias {
            location,
            radius_m: self.search_radius_m,
        });

        let candidates = self.maps.search_places(query.to_string(), bias).await?;

        Ok(PlaceSearchResults {
            superseded: false,
            candidates,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(
        &self,
        input: String,
        location: GeoPoint,
        radius: f64,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        self.maps
            .find_place_suggestions(input, location, radius, session_token)
            .await
    }
}
