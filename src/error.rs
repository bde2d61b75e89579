use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

use crate::planner::fares::FareError;
use crate::planner::Refusal;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
    /// Measured distance to the route, set for corridor violations.
    pub distance_km: Option<f64>,
}

impl Error {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            distance_km: None,
        }
    }

    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<Refusal> for Error {
    fn from(refusal: Refusal) -> Self {
        match refusal {
            Refusal::CorridorViolation {
                distance_km,
                message,
                ..
            } => corridor_violation_error(message, distance_km),
            Refusal::NoRouteSelected => no_route_selected_error(),
            Refusal::Stale => stale_result_error(),
            Refusal::UnknownRoute(_) => Error::new(101, refusal.to_string()),
            Refusal::NotInitialized | Refusal::AlreadyInitialized => {
                invalid_state_error(refusal.to_string())
            }
            Refusal::Pricing(err) => err.into(),
            other => invariant_violation_error(other.to_string()),
        }
    }
}

impl From<FareError> for Error {
    fn from(err: FareError) -> Self {
        match err {
            FareError::NoSeats | FareError::InvalidRate(_) => Error::new(101, err.to_string()),
            FareError::LegCountMismatch { .. } => invariant_violation_error(err.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            105 => (StatusCode::CONFLICT, self.message.as_str()),
            106 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = match self.distance_km {
            Some(distance_km) => Json(json!({
                "code": self.code,
                "error": error_message,
                "distance_km": distance_km,
            })),
            None => Json(json!({
                "code": self.code,
                "error": error_message,
            })),
        };

        (status, body).into_response()
    }
}

pub fn invalid_state_error(message: String) -> Error {
    Error::new(100, message)
}

pub fn invalid_input_error() -> Error {
    Error::new(101, "invalid input")
}

pub fn corridor_violation_error(message: String, distance_km: f64) -> Error {
    Error {
        distance_km: Some(distance_km),
        ..Error::new(102, message)
    }
}

pub fn invariant_violation_error(message: String) -> Error {
    Error::new(103, message)
}

pub fn no_route_selected_error() -> Error {
    Error::new(104, "no route selected")
}

pub fn stale_result_error() -> Error {
    Error::new(105, "the route changed while the request was in flight")
}

pub fn not_found_error() -> Error {
    Error::new(106, "not found")
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error::new(1, "environment variable error")
}

pub fn reqwest_error<T: Debug>(err: T) -> Error {
    tracing::debug!(?err, "request failed");
    Error::new(3, "reqwest error")
}

pub fn upstream_error() -> Error {
    Error::new(4, "upstream error")
}

pub fn unexpected_error() -> Error {
    Error::new(5, "unexpected error")
}

pub fn config_error(variable: &str) -> Error {
    Error::new(6, format!("invalid value for {}", variable))
}
