use thiserror::Error;

use crate::entities::WaypointKind;
use crate::planner::fares::FareError;

/// A planning operation that was turned down. The session is left exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Refusal {
    #[error("{message}")]
    CorridorViolation {
        distance_km: f64,
        max_distance_km: f64,
        message: String,
    },

    #[error("no route selected")]
    NoRouteSelected,

    #[error("the {kind} cannot be {action}")]
    ProtectedWaypoint {
        id: u32,
        kind: WaypointKind,
        action: &'static str,
    },

    #[error("stops cannot be added to a full car ride")]
    FullCar,

    #[error("waypoint {0} does not exist")]
    UnknownWaypoint(u32),

    #[error("route option {0} does not exist")]
    UnknownRoute(usize),

    #[error("stop sequence has not been initialized")]
    NotInitialized,

    #[error("stop sequence is already initialized")]
    AlreadyInitialized,

    #[error("the route changed while the request was in flight")]
    Stale,

    #[error(transparent)]
    Pricing(#[from] FareError),
}
