use rinkfind_core::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::RinkSearch::search`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Neither the store nor the geocoder produced a coordinate for the code.
    #[error("could not determine coordinates for postal code '{postal_code}'")]
    CoordinatesNotFound { postal_code: String },

    /// The store failed while looking up the code or scanning rinks.
    #[error(transparent)]
    Store(#[from] StoreError),
}
