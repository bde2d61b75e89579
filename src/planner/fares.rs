use thiserror::Error;

use crate::entities::{FareCombination, FareMatrix, Leg, RouteSegment, Waypoint};

/// No segment is priced below this, before rounding.
pub const MINIMUM_FARE: f64 = 10.0;
/// Fares are rounded to the nearest multiple of this.
pub const FARE_STEP: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    #[error("route has {actual} legs but {waypoints} waypoints need {expected}")]
    LegCountMismatch {
        waypoints: usize,
        expected: usize,
        actual: usize,
    },

    #[error("seat count must be at least 1")]
    NoSeats,

    #[error("rate per km must be a non-negative number, got {0}")]
    InvalidRate(f64),
}

pub fn validate_pricing(rate_per_km: f64, seats: u32) -> Result<(), FareError> {
    if seats == 0 {
        return Err(FareError::NoSeats);
    }

    if !rate_per_km.is_finite() || rate_per_km < 0.0 {
        return Err(FareError::InvalidRate(rate_per_km));
    }

    Ok(())
}

/// `max(10, raw)` rounded to the nearest 10. The backend expects exactly this.
pub fn round_fare(raw_fare: f64) -> u32 {
    ((raw_fare.max(MINIMUM_FARE) / FARE_STEP).round() * FARE_STEP) as u32
}

pub fn segment_fare(distance_km: f64, rate_per_km: f64, seats: u32) -> u32 {
    round_fare(distance_km * rate_per_km / f64::from(seats))
}

/// Price per seat for the whole ride, origin to destination.
pub fn price_per_seat(total_distance_km: f64, rate_per_km: f64, seats: u32) -> Result<u32, FareError> {
    validate_pricing(rate_per_km, seats)?;
    Ok(segment_fare(total_distance_km, rate_per_km, seats))
}

/// One combination for every pair `i < j` of waypoints, priced over the sum of
/// the legs between them.
pub fn compute_fare_matrix(
    sequence: &[Waypoint],
    leg_distances_km: &[f64],
    rate_per_km: f64,
    seats: u32,
) -> Result<Vec<FareCombination>, FareError> {
    validate_pricing(rate_per_km, seats)?;
    ensure_leg_count(sequence.len(), leg_distances_km.len())?;

    let n = sequence.len();
    let mut combinations = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for (i, from) in sequence.iter().enumerate() {
        let mut distance_km = 0.0;

        for (j, to) in sequence.iter().enumerate().skip(i + 1) {
            distance_km += leg_distances_km[j - 1];

            combinations.push(FareCombination {
                from_waypoint_id: from.id,
                to_waypoint_id: to.id,
                distance_km,
                fare: segment_fare(distance_km, rate_per_km, seats),
            });
        }
    }

    Ok(combinations)
}

pub fn fare_matrix(
    sequence: &[Waypoint],
    legs: &[Leg],
    rate_per_km: f64,
    seats: u32,
) -> Result<FareMatrix, FareError> {
    let leg_distances_km: Vec<f64> = legs.iter().map(|leg| leg.distance_km).collect();
    let combinations = compute_fare_matrix(sequence, &leg_distances_km, rate_per_km, seats)?;

    let total_distance_km: f64 = leg_distances_km.iter().sum();
    let total_duration_minutes: f64 = legs.iter().map(|leg| leg.duration_minutes).sum();

    Ok(FareMatrix {
        combinations,
        price_per_seat: price_per_seat(total_distance_km, rate_per_km, seats)?,
        total_distance_km,
        total_duration_minutes,
    })
}

/// Adjacent-pair segments of the sequence.
pub fn route_segments(sequence: &[Waypoint], legs: &[Leg]) -> Result<Vec<RouteSegment>, FareError> {
    ensure_leg_count(sequence.len(), legs.len())?;

    Ok(sequence
        .windows(2)
        .zip(legs)
        .map(|(pair, leg)| RouteSegment {
            from_waypoint_id: pair[0].id,
            to_waypoint_id: pair[1].id,
            distance_km: leg.distance_km,
            duration_minutes: leg.duration_minutes,
        })
        .collect())
}

fn ensure_leg_count(waypoints: usize, actual: usize) -> Result<(), FareError> {
    let expected = waypoints.saturating_sub(1);

    if actual != expected {
        return Err(FareError::LegCountMismatch {
            waypoints,
            expected,
            actual,
        });
    }

    Ok(())
}
