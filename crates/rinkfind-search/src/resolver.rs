use std::sync::Arc;

use rinkfind_core::{Coordinate, Geocoder, RinkStore, StoreError};

/// Outcome of resolving a postal code.
///
/// Every miss collapses into [`Resolution::NotFound`]; the specific cause is
/// only visible in the logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Found(Coordinate),
    NotFound,
}

/// Resolves normalized postal codes to coordinates: the store's postal-code
/// index first, the geocoder only on a store miss.
pub struct CoordinateResolver {
    store: Arc<dyn RinkStore>,
    geocoder: Arc<dyn Geocoder>,
    write_back: bool,
}

impl CoordinateResolver {
    #[must_use]
    pub fn new(store: Arc<dyn RinkStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            store,
            geocoder,
            write_back: false,
        }
    }

    /// When enabled, coordinates obtained from the geocoder are upserted into
    /// the store so later lookups for the same code become store hits.
    #[must_use]
    pub fn with_write_back(mut self, enabled: bool) -> Self {
        self.write_back = enabled;
        self
    }

    /// Resolves `postal_code`, which must already be normalized.
    ///
    /// Geocoder failures of any kind are logged and reported as
    /// [`Resolution::NotFound`]. An empty code is never looked up.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store lookup itself fails.
    pub async fn resolve(&self, postal_code: &str) -> Result<Resolution, StoreError> {
        if postal_code.is_empty() {
            tracing::info!("empty postal code; nothing to resolve");
            return Ok(Resolution::NotFound);
        }

        if let Some(coordinate) = self.store.find_postal_code_coordinate(postal_code).await? {
            tracing::info!(postal_code, "cache hit: postal code found in store");
            return Ok(Resolution::Found(coordinate));
        }

        tracing::info!(postal_code, "cache miss: querying geocoder");
        let candidates = match self.geocoder.geocode(postal_code).await {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::warn!(postal_code, error = %error, "geocoder unavailable");
                return Ok(Resolution::NotFound);
            }
        };

        let Some(&coordinate) = candidates.first() else {
            tracing::warn!(postal_code, "geocoder returned no candidates");
            return Ok(Resolution::NotFound);
        };

        tracing::info!(
            postal_code,
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            candidates = candidates.len(),
            "geocoder resolved postal code"
        );

        if self.write_back {
            // A failed cache write must not fail a lookup that already succeeded.
            if let Err(error) = self
                .store
                .record_postal_code_coordinate(postal_code, coordinate)
                .await
            {
                tracing::warn!(postal_code, error = %error, "failed to record geocoded postal code");
            }
        }

        Ok(Resolution::Found(coordinate))
    }
}
