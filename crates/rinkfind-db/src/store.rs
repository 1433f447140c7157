use rinkfind_core::{BoxFuture, Coordinate, Rink, RinkStore, StoreError};
use sqlx::PgPool;

use crate::rinks;

/// [`RinkStore`] backed by the Postgres pool.
#[derive(Debug, Clone)]
pub struct PgRinkStore {
    pool: PgPool,
}

impl PgRinkStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl RinkStore for PgRinkStore {
    fn find_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinate>, StoreError>> {
        Box::pin(async move {
            let Some(row) = rinks::find_postal_code_coordinate(&self.pool, postal_code)
                .await
                .map_err(StoreError::new)?
            else {
                return Ok(None);
            };

            let coordinate = Coordinate::new(row.lat, row.lng);
            if coordinate.is_none() {
                tracing::warn!(
                    postal_code,
                    lat = row.lat,
                    lng = row.lng,
                    "stored coordinate out of range; treating as unknown"
                );
            }
            Ok(coordinate)
        })
    }

    fn list_rinks(&self) -> BoxFuture<'_, Result<Vec<Rink>, StoreError>> {
        Box::pin(async move {
            let rows = rinks::list_rinks(&self.pool)
                .await
                .map_err(StoreError::new)?;
            Ok(rows.into_iter().map(Rink::from).collect())
        })
    }

    fn record_postal_code_coordinate<'a>(
        &'a self,
        postal_code: &'a str,
        coordinate: Coordinate,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            rinks::upsert_geocoded_postal_code(&self.pool, postal_code, coordinate)
                .await
                .map_err(StoreError::new)
        })
    }

    fn health_check(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            crate::health_check(&self.pool)
                .await
                .map_err(StoreError::new)
        })
    }
}
