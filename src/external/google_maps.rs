use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::{
        DirectionsRequest, GeoPoint, GeocodeResult, Leg, PlaceCandidate, PlaceSuggestions,
        RouteOption, RoutePolyline, SearchBias,
    },
    error::{invalid_input_error, upstream_error, Error},
    external::{DirectionsProvider, PlaceSearch},
    planner::naming::Geocoder,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lat, value.lng)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Place {
    place_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: String,
    geometry: Geometry,
}

impl From<Place> for PlaceCandidate {
    fn from(place: Place) -> Self {
        let name = place
            .name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                place
                    .formatted_address
                    .split(',')
                    .next()
                    .map(|segment| segment.trim().to_string())
            })
            .unwrap_or_default();

        PlaceCandidate {
            place_id: Some(place.place_id),
            name,
            address: place.formatted_address,
            location: place.geometry.location.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Distance {
    /// Meters for distances, seconds for durations.
    value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsLeg {
    distance: Distance,
    duration: Distance,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    summary: String,
    legs: Vec<DirectionsLeg>,
    overview_polyline: EncodedPolyline,
}

impl DirectionsRoute {
    fn into_option(self, waypoints: &[GeoPoint]) -> Option<RouteOption> {
        let polyline = RoutePolyline::from_encoded(&self.overview_polyline.points, waypoints)?;

        Some(RouteOption {
            summary: self.summary,
            legs: self
                .legs
                .iter()
                .map(|leg| Leg {
                    distance_km: leg.distance.value / 1000.0,
                    duration_minutes: leg.duration.value / 60.0,
                })
                .collect(),
            polyline,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    result: Option<T>,
    results: Option<T>,
    predictions: Option<T>,
    routes: Option<T>,
    error_message: Option<String>,
}

/// Client for the Google Maps web services.
#[derive(Clone)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.google_maps_api_base.clone(),
            api_key: config.google_maps_api_key.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        accepted: &[&str],
    ) -> Result<Response<T>, Error> {
        let url = format!("https://{}/maps/api/{}", self.api_base, path);

        let res = self
            .client
            .get(url)
            .query(&[("key", &self.api_key)])
            .query(query)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response<T> = res.json().await?;

        if !accepted.contains(&data.status.as_str()) {
            tracing::warn!(
                status = %data.status,
                error_message = ?data.error_message,
                "maps request rejected"
            );
            return Err(upstream_error());
        }

        Ok(data)
    }
}

#[async_trait]
impl Geocoder for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Vec<GeocodeResult>, Error> {
        let data: Response<Vec<GeocodeResult>> = self
            .get(
                "geocode/json",
                &[("latlng", point.into())],
                &["OK", "ZERO_RESULTS"],
            )
            .await?;

        Ok(data.results.unwrap_or_default())
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<RouteOption>, Error> {
        let mut query = vec![
            ("origin", String::from(request.origin)),
            ("destination", String::from(request.destination)),
            ("alternatives", "true".to_string()),
        ];

        if !request.stops.is_empty() {
            let stops: Vec<String> = request.stops.iter().map(|&stop| stop.into()).collect();
            query.push(("waypoints", stops.join("|")));
        }

        if let Some(avoid) = request.preference.avoid() {
            query.push(("avoid", avoid.to_string()));
        }

        let data: Response<Vec<DirectionsRoute>> = self
            .get("directions/json", &query, &["OK", "ZERO_RESULTS"])
            .await?;

        let waypoints = request.waypoints();

        Ok(data
            .routes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|route| route.into_option(&waypoints))
            .collect())
    }
}

#[async_trait]
impl PlaceSearch for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn search_places(
        &self,
        query: String,
        bias: Option<SearchBias>,
    ) -> Result<Vec<PlaceCandidate>, Error> {
        let mut params = vec![("query", query)];

        if let Some(bias) = bias {
            params.push(("location", bias.location.into()));
            params.push(("radius", bias.radius_m.to_string()));
        }

        let data: Response<Vec<Place>> = self
            .get("place/textsearch/json", &params, &["OK", "ZERO_RESULTS"])
            .await?;

        Ok(data
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PlaceCandidate::from)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(
        &self,
        input: String,
        location: GeoPoint,
        radius: f64,
        session_token: String,
    ) -> Result<PlaceSuggestions, Error> {
        let data: Response<PlaceSuggestions> = self
            .get(
                "place/autocomplete/json",
                &[
                    ("input", input),
                    ("location", location.into()),
                    ("radius", radius.to_string()),
                    ("sessiontoken", session_token),
                ],
                &["OK", "ZERO_RESULTS"],
            )
            .await?;

        data.predictions.ok_or_else(upstream_error)
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: String, session_token: String) -> Result<PlaceCandidate, Error> {
        let data: Response<Place> = self
            .get(
                "place/details/json",
                &[
                    ("place_id", id),
                    ("sessiontoken", session_token),
                    ("fields", "place_id,name,formatted_address,geometry".to_string()),
                ],
                &["OK"],
            )
            .await?;

        Ok(data.result.ok_or_else(upstream_error)?.into())
    }
}
