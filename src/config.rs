use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config_error, Error};
use crate::planner::corridor::DEFAULT_MAX_DISTANCE_KM;

pub const DEFAULT_API_BASE: &str = "maps.googleapis.com";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_RATE_PER_KM: f64 = 12.0;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 50_000.0;

#[derive(Clone, Debug)]
pub struct Config {
    pub google_maps_api_base: String,
    pub google_maps_api_key: String,
    pub listen_addr: SocketAddr,
    pub corridor_max_distance_km: f64,
    pub rate_per_km: f64,
    pub search_debounce: Duration,
    pub search_radius_m: f64,
}

impl Config {
    /// Reads the environment, after loading `.env` when one exists.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenv::dotenv() {
            tracing::debug!(%err, "no .env file loaded");
        }

        let listen_addr: String = var_or("RIDEPLAN_LISTEN_ADDR", DEFAULT_LISTEN_ADDR.into())?;

        Ok(Self {
            google_maps_api_base: var_or("GOOGLE_MAPS_API_BASE", DEFAULT_API_BASE.into())?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")?,
            listen_addr: listen_addr
                .parse()
                .map_err(|_| config_error("RIDEPLAN_LISTEN_ADDR"))?,
            corridor_max_distance_km: positive("RIDEPLAN_CORRIDOR_KM", DEFAULT_MAX_DISTANCE_KM)?,
            rate_per_km: non_negative("RIDEPLAN_RATE_PER_KM", DEFAULT_RATE_PER_KM)?,
            search_debounce: Duration::from_millis(var_or(
                "RIDEPLAN_SEARCH_DEBOUNCE_MS",
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )?),
            search_radius_m: positive("RIDEPLAN_SEARCH_RADIUS_M", DEFAULT_SEARCH_RADIUS_M)?,
        })
    }

    /// Defaults for everything but the API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            google_maps_api_base: DEFAULT_API_BASE.into(),
            google_maps_api_key: api_key.into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            corridor_max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            rate_per_km: DEFAULT_RATE_PER_KM,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| config_error(name)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err.into()),
    }
}

fn positive(name: &str, default: f64) -> Result<f64, Error> {
    let value = var_or(name, default)?;

    if !value.is_finite() || value <= 0.0 {
        return Err(config_error(name));
    }

    Ok(value)
}

fn non_negative(name: &str, default: f64) -> Result<f64, Error> {
    let value = var_or(name, default)?;

    if !value.is_finite() || value < 0.0 {
        return Err(config_error(name));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_uses_default() {
        assert_eq!(var_or("RIDEPLAN_TEST_UNSET", 7u64), Ok(7));
    }

    #[test]
    fn present_variable_is_parsed() {
        env::set_var("RIDEPLAN_TEST_RATE", " 9.5 ");
        assert_eq!(non_negative("RIDEPLAN_TEST_RATE", 1.0), Ok(9.5));
    }

    #[test]
    fn malformed_variable_is_a_config_error() {
        env::set_var("RIDEPLAN_TEST_CORRIDOR", "wide");
        let err = positive("RIDEPLAN_TEST_CORRIDOR", 50.0).unwrap_err();

        assert_eq!(err.code, 6);
        assert_eq!(err.message, "invalid value for RIDEPLAN_TEST_CORRIDOR");
    }

    #[test]
    fn corridor_must_be_positive() {
        env::set_var("RIDEPLAN_TEST_ZERO", "0");
        assert!(positive("RIDEPLAN_TEST_ZERO", 50.0).is_err());
    }
}
