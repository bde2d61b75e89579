mod fare;
mod geo_point;
mod place;
mod route;
mod session;
mod waypoint;

pub use fare::{FareCombination, FareMatrix};
pub use geo_point::GeoPoint;
pub use place::{
    AddressComponent, GeocodeResult, PlaceCandidate, PlaceSearchResults, PlaceSuggestion,
    PlaceSuggestions, ResolvedName, SearchBias,
};
pub use route::{
    DirectionsRequest, Leg, RouteOption, RoutePolyline, RoutePreference, RouteSegment,
    RouteSummary,
};
pub use session::{SessionOptions, SessionView, StopSource};
pub use waypoint::{StopData, Waypoint, WaypointKind};
