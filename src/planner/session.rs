use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    DirectionsRequest, FareMatrix, GeoPoint, RouteOption, RoutePolyline, RoutePreference,
    RouteSegment, RouteSummary, SessionView, StopData, Waypoint,
};
use crate::planner::corridor;
use crate::planner::debounce::Debouncer;
use crate::planner::fares;
use crate::planner::stops::{ModeChange, StopSequence};
use crate::planner::Refusal;

#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub seats: u32,
    pub rate_per_km: f64,
    pub max_corridor_km: f64,
    pub preference: RoutePreference,
    pub full_car: bool,
    pub search_debounce: Duration,
}

/// Proof that a stop location passed the corridor check against a given route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopTicket {
    route_generation: u64,
    pub location: GeoPoint,
    pub distance_km: f64,
}

/// Same as [`StopTicket`] for moving an existing stop; also pinned to the
/// sequence revision so ids cannot shift underneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelocationTicket {
    route_generation: u64,
    revision: u64,
    pub waypoint_id: u32,
    pub location: GeoPoint,
    pub distance_km: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteSnapshot {
    pub revision: u64,
    pub route_generation: u64,
    pub request: DirectionsRequest,
}

/// State of one ride being planned.
///
/// Network work happens between a ticket and its commit, outside any lock.
/// Two counters decide whether a late result still applies:
/// `revision` moves on every stop sequence change, `route_generation` moves
/// whenever the route a stop is checked against may change: new routes
/// installed, another option picked, another preference set.
#[derive(Debug)]
pub struct PlanningSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    stops: StopSequence,
    routes: Vec<RouteOption>,
    selected: Option<usize>,
    preference: RoutePreference,
    seats: u32,
    rate_per_km: f64,
    max_corridor_km: f64,
    revision: u64,
    route_generation: u64,
    search: Arc<Debouncer>,
    notice: Option<String>,
}

impl PlanningSession {
    /// Seats and rate are checked by the caller with
    /// [`fares::validate_pricing`]; fare pricing rejects invalid values on its own.
    pub fn new(
        settings: SessionSettings,
        origin: StopData,
        destination: StopData,
    ) -> Result<Self, Refusal> {
        let mut stops = StopSequence::new();
        stops.initialize(origin, destination)?;
        stops.toggle_full_car(settings.full_car);

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            stops,
            routes: vec![],
            selected: None,
            preference: settings.preference,
            seats: settings.seats,
            rate_per_km: settings.rate_per_km,
            max_corridor_km: settings.max_corridor_km,
            revision: 0,
            route_generation: 0,
            search: Arc::new(Debouncer::new(settings.search_debounce)),
            notice: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stops(&self) -> &StopSequence {
        &self.stops
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        self.stops.waypoints()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn route_generation(&self) -> u64 {
        self.route_generation
    }

    pub fn preference(&self) -> RoutePreference {
        self.preference
    }

    pub fn search_debouncer(&self) -> Arc<Debouncer> {
        self.search.clone()
    }

    pub fn origin_location(&self) -> Option<GeoPoint> {
        self.stops.origin().map(|origin| origin.location)
    }

    pub fn routes(&self) -> &[RouteOption] {
        &self.routes
    }

    pub fn selected_route(&self) -> Option<&RouteOption> {
        self.selected.and_then(|index| self.routes.get(index))
    }

    /// Geometry of the selected route, empty when there is none.
    pub fn route_path(&self) -> &[GeoPoint] {
        self.selected_route()
            .map(|route| route.polyline.points())
            .unwrap_or(&[])
    }

    pub fn stop_ticket(&self, location: GeoPoint) -> Result<StopTicket, Refusal> {
        self.stops.ensure_accepts_stops()?;

        let distance_km =
            corridor::validate(&location, self.route_path(), self.max_corridor_km).into_result()?;

        Ok(StopTicket {
            route_generation: self.route_generation,
            location,
            distance_km,
        })
    }

    pub fn commit_insert(
        &mut self,
        ticket: StopTicket,
        data: StopData,
    ) -> Result<&[Waypoint], Refusal> {
        if ticket.route_generation != self.route_generation {
            return Err(Refusal::Stale);
        }

        self.stops.insert_stop(data)?;
        self.touch();

        Ok(self.stops.waypoints())
    }

    pub fn relocation_ticket(
        &self,
        waypoint_id: u32,
        location: GeoPoint,
    ) -> Result<RelocationTicket, Refusal> {
        self.stops.check_relocatable(waypoint_id)?;

        let distance_km =
            corridor::validate(&location, self.route_path(), self.max_corridor_km).into_result()?;

        Ok(RelocationTicket {
            route_generation: self.route_generation,
            revision: self.revision,
            waypoint_id,
            location,
            distance_km,
        })
    }

    pub fn commit_relocation(
        &mut self,
        ticket: RelocationTicket,
        data: StopData,
    ) -> Result<&Waypoint, Refusal> {
        if ticket.route_generation != self.route_generation || ticket.revision != self.revision {
            return Err(Refusal::Stale);
        }

        self.stops.relocate_stop(ticket.waypoint_id, data)?;
        self.touch();

        self.stops
            .get(ticket.waypoint_id)
            .ok_or(Refusal::UnknownWaypoint(ticket.waypoint_id))
    }

    pub fn remove_stop(&mut self, waypoint_id: u32) -> Result<Waypoint, Refusal> {
        let removed = self.stops.remove_stop(waypoint_id)?;
        self.touch();

        Ok(removed)
    }

    pub fn set_full_car(&mut self, enabled: bool) -> ModeChange {
        let change = self.stops.toggle_full_car(enabled);

        if change.removed.is_empty() {
            self.notice = None;
        } else {
            self.touch();
            self.notice = change.notice();
        }

        change
    }

    pub fn route_snapshot(&self) -> Result<RouteSnapshot, Refusal> {
        let origin = self.stops.origin().ok_or(Refusal::NotInitialized)?;
        let destination = self.stops.destination().ok_or(Refusal::NotInitialized)?;

        Ok(RouteSnapshot {
            revision: self.revision,
            route_generation: self.route_generation,
            request: DirectionsRequest {
                origin: origin.location,
                destination: destination.location,
                stops: self
                    .stops
                    .intermediates()
                    .iter()
                    .map(|waypoint| waypoint.location)
                    .collect(),
                preference: self.preference,
            },
        })
    }

    /// Installs freshly fetched route options. Returns `false`, leaving the
    /// session alone, when the stops, the preference or the selected route
    /// changed after the snapshot was taken.
    ///
    /// Replacing the routes moves `route_generation`, so tickets checked
    /// against the previous geometry no longer commit.
    pub fn apply_routes(&mut self, snapshot: &RouteSnapshot, routes: Vec<RouteOption>) -> bool {
        if snapshot.revision != self.revision || snapshot.route_generation != self.route_generation
        {
            return false;
        }

        self.selected = if routes.is_empty() { None } else { Some(0) };
        self.routes = routes;
        self.route_generation += 1;

        true
    }

    pub fn select_route(&mut self, index: usize) -> Result<&RouteOption, Refusal> {
        if index >= self.routes.len() {
            return Err(Refusal::UnknownRoute(index));
        }

        if self.selected != Some(index) {
            self.selected = Some(index);
            self.route_generation += 1;
        }

        Ok(&self.routes[index])
    }

    /// Returns whether the preference changed; routes need refetching if so.
    pub fn set_preference(&mut self, preference: RoutePreference) -> bool {
        if self.preference == preference {
            return false;
        }

        self.preference = preference;
        self.route_generation += 1;

        true
    }

    pub fn fare_matrix(&self) -> Result<FareMatrix, Refusal> {
        let route = self.selected_route().ok_or(Refusal::NoRouteSelected)?;

        Ok(fares::fare_matrix(
            self.stops.waypoints(),
            &route.legs,
            self.rate_per_km,
            self.seats,
        )?)
    }

    /// Empty when no route is selected or the route predates the current stops.
    pub fn segments(&self) -> Vec<RouteSegment> {
        self.selected_route()
            .and_then(|route| fares::route_segments(self.stops.waypoints(), &route.legs).ok())
            .unwrap_or_default()
    }

    /// Selected route geometry, or straight lines between the waypoints.
    pub fn display_path(&self) -> Vec<GeoPoint> {
        match self.selected_route() {
            Some(route) => route.polyline.points().to_vec(),
            None => RoutePolyline::straight_line(&self.stops.locations())
                .map(|line| line.points().to_vec())
                .unwrap_or_default(),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            full_car: self.stops.is_full_car(),
            seats: self.seats,
            rate_per_km: self.rate_per_km,
            preference: self.preference,
            waypoints: self.stops.waypoints().to_vec(),
            routes: self
                .routes
                .iter()
                .enumerate()
                .map(|(index, route)| RouteSummary::new(index, route))
                .collect(),
            selected_route: self.selected,
            segments: self.segments(),
            display_path: self.display_path(),
            notice: self.notice.clone(),
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.notice = None;
    }
}
