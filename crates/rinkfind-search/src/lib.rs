//! Postal-code radius search over the rink store.
//!
//! [`RinkSearch`] normalizes the caller's postal code, resolves it to a
//! coordinate through [`CoordinateResolver`] (store first, geocoder second)
//! and filters a full rink snapshot by great-circle distance.

mod error;
mod radius;
mod resolver;
mod search;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::SearchError;
pub use radius::{parse_radius_km, DEFAULT_RADIUS_KM};
pub use resolver::{CoordinateResolver, Resolution};
pub use search::{filter_within_radius, RinkSearch, SearchRequest, SearchResult};
