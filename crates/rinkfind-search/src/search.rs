use std::sync::Arc;

use rinkfind_core::{distance_km, normalize_postal_code, Coordinate, Rink, RinkStore};

use crate::error::SearchError;
use crate::radius::parse_radius_km;
use crate::resolver::{CoordinateResolver, Resolution};

/// Slack added to the radius so a rink sitting exactly on the boundary is not
/// lost to floating-point rounding.
const BOUNDARY_TOLERANCE_KM: f64 = 1e-9;

/// A radius search as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Postal code as typed by the user, before normalization.
    pub postal_code: String,
    pub radius_km: f64,
}

impl SearchRequest {
    /// Builds a request from raw query-string values. A missing postal code
    /// becomes empty; the radius goes through [`parse_radius_km`].
    #[must_use]
    pub fn from_params(postal_code: Option<&str>, radius: Option<&str>) -> Self {
        Self {
            postal_code: postal_code.unwrap_or_default().to_string(),
            radius_km: parse_radius_km(radius),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub postal_code: String,
    pub origin: Coordinate,
    pub radius_km: f64,
    /// Matching rinks in store scan order.
    pub rinks: Vec<Rink>,
}

/// Finds rinks within a radius of a postal code.
pub struct RinkSearch {
    resolver: CoordinateResolver,
    store: Arc<dyn RinkStore>,
}

impl RinkSearch {
    #[must_use]
    pub fn new(resolver: CoordinateResolver, store: Arc<dyn RinkStore>) -> Self {
        Self { resolver, store }
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// - [`SearchError::CoordinatesNotFound`] if the postal code cannot be
    ///   resolved by either the store or the geocoder.
    /// - [`SearchError::Store`] if the store fails during lookup or scan.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let postal_code = normalize_postal_code(&request.postal_code);
        let radius_km = request.radius_km;
        tracing::info!(postal_code = %postal_code, radius_km, "searching rinks");

        let origin = match self.resolver.resolve(&postal_code).await? {
            Resolution::Found(coordinate) => coordinate,
            Resolution::NotFound => {
                return Err(SearchError::CoordinatesNotFound { postal_code });
            }
        };
        tracing::info!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            "using search origin"
        );

        let candidates = self.store.list_rinks().await?;
        let scanned = candidates.len();
        let rinks = filter_within_radius(origin, radius_km, candidates);
        tracing::info!(scanned, found = rinks.len(), "rinks within radius");

        Ok(SearchResult {
            postal_code,
            origin,
            radius_km,
            rinks,
        })
    }
}

/// Keeps rinks whose coordinate lies within `radius_km` of `origin`,
/// boundary inclusive. Rinks without a valid coordinate are dropped.
#[must_use]
pub fn filter_within_radius(origin: Coordinate, radius_km: f64, rinks: Vec<Rink>) -> Vec<Rink> {
    rinks
        .into_iter()
        .filter(|rink| {
            rink.coordinate()
                .is_some_and(|at| distance_km(origin, at) <= radius_km + BOUNDARY_TOLERANCE_KM)
        })
        .collect()
}
