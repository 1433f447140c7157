//! HTTP client for the Nominatim `/search` endpoint.
//!
//! Nominatim's usage policy requires an identifying `User-Agent` and allows
//! roughly one request per second, so the client is built once at startup and
//! shared by every request handler.

use std::time::Duration;

use reqwest::{Client, Url};
use rinkfind_core::{AppConfig, BoxFuture, Coordinate, Geocoder, GeocoderError};

use crate::error::GeocodeError;
use crate::types::Place;

/// Client for Nominatim forward geocoding.
///
/// Use [`NominatimClient::from_app_config`] at startup or
/// [`NominatimClient::with_base_url`] to point at a self-hosted deployment or
/// a mock server in tests.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    country_codes: Option<String>,
}

impl NominatimClient {
    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, which `build_search_url` pops before
        // pushing the `search` segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            country_codes: None,
        })
    }

    /// Builds a client from the geocoder settings in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`NominatimClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Ok(Self::with_base_url(
            &config.geocoder_base_url,
            &config.geocoder_user_agent,
            config.geocoder_timeout_secs,
        )?
        .with_country_codes(config.geocoder_country_codes.clone()))
    }

    /// Restricts results to a comma-separated list of ISO 3166-1 alpha-2
    /// country codes, e.g. `"cz"`.
    #[must_use]
    pub fn with_country_codes(mut self, country_codes: Option<String>) -> Self {
        self.country_codes = country_codes;
        self
    }

    /// Free-text search, returning places in Nominatim's ranking order.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure, timeout or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a list of places.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let url = self.build_search_url(query);
        tracing::debug!(query, "querying nominatim");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })
    }

    /// Like [`NominatimClient::search`] but validated into [`Coordinate`]s.
    ///
    /// # Errors
    ///
    /// Everything [`NominatimClient::search`] returns, plus
    /// [`GeocodeError::InvalidCoordinate`] for an out-of-range place.
    pub async fn search_coordinates(&self, query: &str) -> Result<Vec<Coordinate>, GeocodeError> {
        self.search(query)
            .await?
            .into_iter()
            .map(|place| {
                Coordinate::new(place.lat, place.lon).ok_or(GeocodeError::InvalidCoordinate {
                    lat: place.lat,
                    lon: place.lon,
                })
            })
            .collect()
    }

    fn build_search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("search");
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("q", query);
            if let Some(codes) = &self.country_codes {
                pairs.append_pair("countrycodes", codes);
            }
            pairs.append_pair("limit", "1");
        }
        url
    }
}

impl Geocoder for NominatimClient {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, GeocoderError>> {
        Box::pin(async move {
            self.search_coordinates(query)
                .await
                .map_err(GeocoderError::new)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NominatimClient {
        NominatimClient::with_base_url(base_url, "rinkfind-test", 5)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_search_url_constructs_query_string() {
        let client = test_client("https://nominatim.openstreetmap.org");
        let url = client.build_search_url("110 00");
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/search?format=json&q=110+00&limit=1"
        );
    }

    #[test]
    fn build_search_url_keeps_base_path() {
        let client = test_client("https://geo.example.com/nominatim/");
        let url = client.build_search_url("12345");
        assert_eq!(
            url.as_str(),
            "https://geo.example.com/nominatim/search?format=json&q=12345&limit=1"
        );
    }

    #[test]
    fn build_search_url_collapses_repeated_trailing_slashes() {
        let client = test_client("https://geo.example.com/nominatim//");
        let url = client.build_search_url("12345");
        assert_eq!(
            url.as_str(),
            "https://geo.example.com/nominatim/search?format=json&q=12345&limit=1"
        );
    }

    #[test]
    fn build_search_url_adds_country_codes() {
        let client = test_client("https://nominatim.openstreetmap.org")
            .with_country_codes(Some("cz".to_string()));
        let url = client.build_search_url("602 00");
        assert!(
            url.as_str().contains("countrycodes=cz"),
            "missing countrycodes: {url}"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = NominatimClient::with_base_url("not a url", "ua", 5);
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }
}
