mod app_config;
mod config;
pub mod coordinate;
pub mod ports;
pub mod postal;
pub mod rinks;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{distance_km, Coordinate, EARTH_RADIUS_KM};
pub use ports::{BoxFuture, Geocoder, GeocoderError, RinkStore, StoreError};
pub use postal::normalize_postal_code;
pub use rinks::Rink;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
