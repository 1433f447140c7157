//! In-memory collaborators for exercising the search pipeline without
//! Postgres or the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rinkfind_core::{BoxFuture, Coordinate, Geocoder, GeocoderError, Rink, RinkStore, StoreError};

/// A store backed by a map of postal codes and a list of rinks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    postal_codes: Mutex<HashMap<String, Coordinate>>,
    rinks: Vec<Rink>,
    fail: bool,
    lookups: AtomicUsize,
    scans: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_postal_code(self, code: &str, coordinate: Coordinate) -> Self {
        self.postal_codes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(code.to_string(), coordinate);
        self
    }

    #[must_use]
    pub fn with_rinks(mut self, rinks: Vec<Rink>) -> Self {
        self.rinks = rinks;
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn recorded(&self, code: &str) -> Option<Coordinate> {
        self.postal_codes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(code)
            .copied()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::new("connection refused"))
        } else {
            Ok(())
        }
    }
}

impl RinkStore for MemoryStore {
    fn find_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinate>, StoreError>> {
        Box::pin(async move {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            Ok(self.recorded(postal_code))
        })
    }

    fn list_rinks(&self) -> BoxFuture<'_, Result<Vec<Rink>, StoreError>> {
        Box::pin(async move {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            Ok(self.rinks.clone())
        })
    }

    fn record_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
        coordinate: Coordinate,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.postal_codes
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .insert(postal_code.to_string(), coordinate);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async move { self.check() })
    }
}

#[derive(Debug)]
enum Reply {
    Candidates(Vec<Coordinate>),
    Unavailable,
}

/// A geocoder that answers every query with the same canned reply and
/// counts how often it was asked.
#[derive(Debug)]
pub struct StubGeocoder {
    reply: Reply,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StubGeocoder {
    #[must_use]
    pub fn returning(candidates: Vec<Coordinate>) -> Self {
        Self::with_reply(Reply::Candidates(candidates))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_reply(Reply::Unavailable)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, GeocoderError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(query.to_string());
            match &self.reply {
                Reply::Candidates(c) => Ok(c.clone()),
                Reply::Unavailable => Err(GeocoderError::new("operation timed out")),
            }
        })
    }
}

/// A rink fixture at `position`, or without coordinates when `None`.
#[must_use]
pub fn rink(id: i64, name: &str, position: Option<(f64, f64)>) -> Rink {
    Rink {
        id,
        name: name.to_string(),
        address: None,
        city: None,
        zipcode: None,
        lat: position.map(|(lat, _)| lat),
        lng: position.map(|(_, lng)| lng),
        phone: None,
        website: None,
        details: serde_json::json!({}),
        created_at: chrono::Utc::now(),
    }
}
