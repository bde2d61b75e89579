use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{GeoPoint, GeocodeResult, ResolvedName};
use crate::error::Error;

/// Address component types tried in order when picking a short name.
const PRIORITY_TYPES: [&str; 7] = [
    "locality",
    "sublocality",
    "administrative_area_level_2",
    "neighborhood",
    "route",
    "administrative_area_level_1",
    "postal_town",
];

/// Address tokens containing any of these are never used as a name.
const BLACKLIST: [&str; 6] = ["india", "district", "state", "country", "pin ", "postal code"];

const MIN_TOKEN_LEN: usize = 2;
const MAX_TOKEN_LEN: usize = 30;

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Vec<GeocodeResult>, Error>;
}

/// Resolved names keyed by [`GeoPoint::cache_key`]. Lives as long as the
/// resolver that owns it; nothing is evicted.
#[derive(Clone, Default)]
pub struct NameCache {
    entries: Arc<RwLock<HashMap<String, ResolvedName>>>,
}

impl NameCache {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn get(&self, point: &GeoPoint) -> Option<ResolvedName> {
        self.entries.read().await.get(&point.cache_key()).cloned()
    }

    pub async fn insert(&self, point: &GeoPoint, name: ResolvedName) {
        self.entries.write().await.insert(point.cache_key(), name);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Turns coordinates into a short display name and a full address.
///
/// Resolution never fails: when the geocoder errors or returns nothing usable
/// the result is a coordinate label. Concurrent calls for different points are
/// independent; repeated calls for the same point hit the cache.
#[derive(Clone)]
pub struct LocationNamer {
    geocoder: Arc<dyn Geocoder>,
    cache: NameCache,
}

impl LocationNamer {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_cache(geocoder, NameCache::new())
    }

    pub fn with_cache(geocoder: Arc<dyn Geocoder>, cache: NameCache) -> Self {
        Self { geocoder, cache }
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve_name(&self, point: GeoPoint) -> ResolvedName {
        if let Some(cached) = self.cache.get(&point).await {
            return cached;
        }

        let resolved = match self.geocoder.reverse_geocode(point).await {
            Ok(results) => name_from_results(&point, &results).unwrap_or_else(|| {
                tracing::debug!("no usable name in geocoding results");
                fallback_name(&point)
            }),
            Err(err) => {
                tracing::warn!(code = err.code, "reverse geocoding failed: {}", err.message);
                fallback_name(&point)
            }
        };

        self.cache.insert(&point, resolved.clone()).await;
        resolved
    }
}

/// Picks a name from geocoding results, `None` when nothing qualifies.
pub fn name_from_results(point: &GeoPoint, results: &[GeocodeResult]) -> Option<ResolvedName> {
    let formatted = results
        .iter()
        .map(|result| result.formatted_address.trim())
        .find(|address| !address.is_empty());

    let name = component_name(results)
        .or_else(|| formatted.and_then(city_token))
        .or_else(|| formatted.and_then(first_segment))?;

    let address = match formatted {
        Some(address) => address.to_string(),
        None => coordinate_address(point),
    };

    Some(ResolvedName { name, address })
}

pub fn fallback_name(point: &GeoPoint) -> ResolvedName {
    ResolvedName {
        name: format!("Location ({:.4}, {:.4})", point.latitude, point.longitude),
        address: coordinate_address(point),
    }
}

fn coordinate_address(point: &GeoPoint) -> String {
    format!("{:.6}, {:.6}", point.latitude, point.longitude)
}

fn component_name(results: &[GeocodeResult]) -> Option<String> {
    PRIORITY_TYPES.iter().find_map(|kind| {
        results
            .iter()
            .flat_map(|result| result.address_components.iter())
            .filter(|component| component.has_type(kind))
            .map(|component| component.long_name.trim())
            .find(|name| is_name_like(name))
            .map(str::to_string)
    })
}

fn city_token(address: &str) -> Option<String> {
    address
        .split(',')
        .map(str::trim)
        .find(|token| {
            let lower = token.to_lowercase();
            let len = token.chars().count();

            is_name_like(token)
                && !BLACKLIST.iter().any(|banned| lower.contains(banned))
                && (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&len)
        })
        .map(str::to_string)
}

fn first_segment(address: &str) -> Option<String> {
    address
        .split(',')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn is_name_like(value: &str) -> bool {
    !value.is_empty() && !looks_like_coordinates(value) && !is_numeric(value)
}

fn is_numeric(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}

/// `12.97`, `12.97, 77.59`, `(12.97 77.59)` and the like.
fn looks_like_coordinates(value: &str) -> bool {
    let trimmed = value.trim().trim_start_matches('(').trim_end_matches(')');
    let parts: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    matches!(parts.len(), 1 | 2)
        && parts.iter().all(|part| part.parse::<f64>().is_ok())
        && parts.iter().any(|part| part.contains('.'))
}
