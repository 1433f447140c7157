//! Forward geocoding against the `OpenStreetMap` Nominatim search API.

mod client;
mod error;
mod types;

pub use client::NominatimClient;
pub use error::GeocodeError;
pub use types::Place;
