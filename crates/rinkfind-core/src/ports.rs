//! Collaborator seams for the search pipeline.
//!
//! The persistent store and the geocoding provider are constructed once at
//! startup and injected into the resolver and search service as trait
//! objects, so tests can substitute in-memory doubles.

use std::error::Error as StdError;

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::rinks::Rink;

pub use futures::future::BoxFuture;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An unexpected failure inside the persistent store.
///
/// The message shown to API clients is deliberately generic; the wrapped
/// source carries the detail for server-side logs.
#[derive(Debug, Error)]
#[error("store query failed: {source}")]
pub struct StoreError {
    #[source]
    source: BoxError,
}

impl StoreError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// A failed geocoding call: transport error, timeout, bad status or a body
/// that could not be read as candidates.
#[derive(Debug, Error)]
#[error("geocoder request failed: {source}")]
pub struct GeocoderError {
    #[source]
    source: BoxError,
}

impl GeocoderError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Read access to rinks and the postal-code coordinate index.
pub trait RinkStore: Send + Sync {
    /// Exact-match lookup of a normalized postal code.
    ///
    /// Returns the first stored coordinate for `postal_code` in storage
    /// order, or `None` when the code is unknown.
    fn find_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinate>, StoreError>>;

    /// Unfiltered snapshot of every rink.
    fn list_rinks(&self) -> BoxFuture<'_, Result<Vec<Rink>, StoreError>>;

    /// Remembers a geocoded coordinate for later lookups. Must be an
    /// idempotent upsert; concurrent writers for one code may race.
    fn record_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
        coordinate: Coordinate,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Verifies the store is reachable.
    fn health_check(&self) -> BoxFuture<'_, Result<(), StoreError>>;
}

/// A free-text forward geocoder.
pub trait Geocoder: Send + Sync {
    /// Candidate positions for `query` in provider ranking order. An empty
    /// vector means the provider knows no match.
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, GeocoderError>>;
}
