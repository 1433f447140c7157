//! Database operations for the `rinks` and `geocoded_postal_codes` tables.

use chrono::{DateTime, Utc};
use rinkfind_core::{Coordinate, Rink};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `rinks` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RinkRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<RinkRow> for Rink {
    fn from(row: RinkRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            zipcode: row.zipcode,
            lat: row.lat,
            lng: row.lng,
            phone: row.phone,
            website: row.website,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// Coordinate columns for a postal-code lookup.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct PostalCodeCoordinateRow {
    pub lat: f64,
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

/// Look up the coordinate stored for an exact, already-normalized postal code.
///
/// Rinks are consulted first, lowest `id` winning when several share the code;
/// rows with a null or out-of-range `lat`/`lng` are not candidates. When no
/// rink matches, the `geocoded_postal_codes` write-back table is checked.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn find_postal_code_coordinate(
    pool: &PgPool,
    zipcode: &str,
) -> Result<Option<PostalCodeCoordinateRow>, sqlx::Error> {
    sqlx::query_as::<_, PostalCodeCoordinateRow>(
        "SELECT lat, lng FROM ( \
             SELECT r.lat, r.lng, 0 AS source, r.id AS ord \
             FROM rinks r \
             WHERE r.zipcode = $1 \
               AND r.lat BETWEEN -90 AND 90 \
               AND r.lng BETWEEN -180 AND 180 \
             UNION ALL \
             SELECT g.lat, g.lng, 1 AS source, 0 AS ord \
             FROM geocoded_postal_codes g \
             WHERE g.zipcode = $1 \
         ) candidates \
         ORDER BY source, ord \
         LIMIT 1",
    )
    .bind(zipcode)
    .fetch_optional(pool)
    .await
}

/// Fetch every rink, ordered by `id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_rinks(pool: &PgPool) -> Result<Vec<RinkRow>, sqlx::Error> {
    sqlx::query_as::<_, RinkRow>(
        "SELECT id, name, address, city, zipcode, lat, lng, phone, website, \
                details, created_at \
         FROM rinks \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

/// Insert or overwrite the geocoded coordinate for `zipcode`.
///
/// Concurrent writers for the same code are resolved last-write-wins by
/// `ON CONFLICT (zipcode) DO UPDATE`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_geocoded_postal_code(
    pool: &PgPool,
    zipcode: &str,
    coordinate: Coordinate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO geocoded_postal_codes (zipcode, lat, lng) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (zipcode) DO UPDATE SET \
             lat         = EXCLUDED.lat, \
             lng         = EXCLUDED.lng, \
             geocoded_at = NOW()",
    )
    .bind(zipcode)
    .bind(coordinate.latitude)
    .bind(coordinate.longitude)
    .execute(pool)
    .await?;

    Ok(())
}
