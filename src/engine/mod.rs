mod helpers;
mod place_api;
mod session_api;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    external::MapsProvider,
    planner::{
        naming::{Geocoder, LocationNamer},
        session::PlanningSession,
    },
};

/// Holds every open planning session in memory. Sessions are dropped on
/// delete; nothing is persisted.
pub struct Engine {
    sessions: Mutex<HashMap<Uuid, PlanningSession>>,
    maps: Arc<dyn MapsProvider>,
    namer: LocationNamer,
    corridor_max_distance_km: f64,
    rate_per_km: f64,
    search_debounce: Duration,
    search_radius_m: f64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new<P>(config: &Config, maps: Arc<P>) -> Self
    where
        P: MapsProvider + 'static,
    {
        let geocoder: Arc<dyn Geocoder> = maps.clone();

        Self {
            sessions: Mutex::new(HashMap::new()),
            maps,
            namer: LocationNamer::new(geocoder),
            corridor_max_distance_km: config.corridor_max_distance_km,
            rate_per_km: config.rate_per_km,
            search_debounce: config.search_debounce,
            search_radius_m: config.search_radius_m,
        }
    }

    pub fn namer(&self) -> &LocationNamer {
        &self.namer
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl API for Engine {}
