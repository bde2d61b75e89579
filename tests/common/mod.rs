#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use rideplan::config::Config;
use rideplan::engine::Engine;
use rideplan::entities::{
    AddressComponent, DirectionsRequest, GeoPoint, GeocodeResult, Leg, PlaceCandidate,
    PlaceSuggestion, PlaceSuggestions, RouteOption, RoutePolyline, RoutePreference, SearchBias,
};
use rideplan::error::{upstream_error, Error};
use rideplan::external::{DirectionsProvider, PlaceSearch};
use rideplan::planner::distance::haversine_distance_km;
use rideplan::planner::naming::Geocoder;

pub const BENGALURU: GeoPoint = GeoPoint::new(12.9716, 77.5946);
pub const MYSURU: GeoPoint = GeoPoint::new(12.2958, 76.6394);
pub const MANDYA: GeoPoint = GeoPoint::new(12.5218, 76.8951);
pub const CHENNAI: GeoPoint = GeoPoint::new(13.0827, 80.2707);

const POINTS_PER_LEG: usize = 20;

/// In-memory maps provider. Routes follow densified straight lines; the
/// second alternative is 20% longer than the first. Route summaries name the
/// preference they were requested with.
#[derive(Default)]
pub struct MockMaps {
    pub geocode_calls: AtomicUsize,
    pub directions_calls: AtomicUsize,
    pub fail_geocoding: AtomicBool,
    pub fail_directions: AtomicBool,
    /// Extra latency for directions requested with `RoutePreference::Fastest`.
    pub fastest_delay_ms: AtomicU64,
}

impl MockMaps {
    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn directions_calls(&self) -> usize {
        self.directions_calls.load(Ordering::SeqCst)
    }
}

fn densify(from: GeoPoint, to: GeoPoint) -> Vec<GeoPoint> {
    (0..POINTS_PER_LEG)
        .map(|step| {
            let t = step as f64 / POINTS_PER_LEG as f64;
            GeoPoint::new(
                from.latitude + (to.latitude - from.latitude) * t,
                from.longitude + (to.longitude - from.longitude) * t,
            )
        })
        .collect()
}

fn route_option(waypoints: &[GeoPoint], summary: String, scale: f64) -> RouteOption {
    let mut points = vec![];
    let mut legs = vec![];

    for pair in waypoints.windows(2) {
        points.extend(densify(pair[0], pair[1]));

        let distance_km = haversine_distance_km(&pair[0], &pair[1]) * scale;
        legs.push(Leg {
            distance_km,
            duration_minutes: distance_km,
        });
    }

    if let Some(last) = waypoints.last() {
        points.push(*last);
    }

    RouteOption {
        summary,
        legs,
        polyline: RoutePolyline::new(points).unwrap(),
    }
}

#[async_trait]
impl Geocoder for MockMaps {
    async fn reverse_geocode(&self, _point: GeoPoint) -> Result<Vec<GeocodeResult>, Error> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_geocoding.load(Ordering::SeqCst) {
            return Err(upstream_error());
        }

        Ok(vec![GeocodeResult {
            formatted_address: "12 Market Road, Mocktown, Karnataka, India".into(),
            address_components: vec![AddressComponent {
                long_name: "Mocktown".into(),
                short_name: "Mocktown".into(),
                types: vec!["locality".into(), "political".into()],
            }],
        }])
    }
}

#[async_trait]
impl DirectionsProvider for MockMaps {
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<RouteOption>, Error> {
        self.directions_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_directions.load(Ordering::SeqCst) {
            return Err(upstream_error());
        }

        if request.preference == RoutePreference::Fastest {
            let delay = self.fastest_delay_ms.load(Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let waypoints = request.waypoints();

        Ok(vec![
            route_option(&waypoints, format!("Direct {:?}", request.preference), 1.0),
            route_option(&waypoints, format!("Scenic {:?}", request.preference), 1.2),
        ])
    }
}

#[async_trait]
impl PlaceSearch for MockMaps {
    async fn search_places(
        &self,
        query: String,
        bias: Option<SearchBias>,
    ) -> Result<Vec<PlaceCandidate>, Error> {
        Ok(vec![PlaceCandidate {
            place_id: Some(format!("place-{}", query)),
            name: query.clone(),
            address: format!("{}, Karnataka, India", query),
            location: bias.map(|bias| bias.location).unwrap_or_default(),
        }])
    }

    async fn find_place_suggestions(
        &self,
        input: String,
        _location: GeoPoint,
        _radius: f64,
        _session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        Ok(vec![PlaceSuggestion {
            place_id: format!("place-{}", input),
            description: format!("{}, Karnataka, India", input),
        }])
    }

    async fn find_place(&self, id: String, _session_token: String) -> Result<PlaceCandidate, Error> {
        Ok(PlaceCandidate {
            place_id: Some(id),
            name: "Mandya".into(),
            address: "Mandya, Karnataka, India".into(),
            location: MANDYA,
        })
    }
}

pub fn test_config(search_debounce: Duration) -> Config {
    Config {
        search_debounce,
        ..Config::with_api_key("test-key")
    }
}

pub fn engine() -> (Engine, Arc<MockMaps>) {
    engine_with(MockMaps::default())
}

pub fn engine_with(maps: MockMaps) -> (Engine, Arc<MockMaps>) {
    let maps = Arc::new(maps);
    let engine = Engine::new(&test_config(Duration::from_millis(50)), maps.clone());

    (engine, maps)
}
