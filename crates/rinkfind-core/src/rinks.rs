use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A skating rink as stored in the `rinks` table.
///
/// `lat`/`lng` are nullable in the store; use [`Rink::coordinate`] to get a
/// validated position. Field names follow the store columns because they are
/// returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rink {
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

impl Rink {
    /// The rink's position, or `None` if either column is missing or out of
    /// range.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rink(lat: Option<f64>, lng: Option<f64>) -> Rink {
        Rink {
            id: 1,
            name: "Zimní stadion".to_string(),
            address: None,
            city: Some("Praha".to_string()),
            zipcode: Some("110 00".to_string()),
            lat,
            lng,
            phone: None,
            website: None,
            details: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn coordinate_present_when_both_columns_valid() {
        let c = rink(Some(50.0875), Some(14.4213)).coordinate();
        assert_eq!(c, Coordinate::new(50.0875, 14.4213));
    }

    #[test]
    fn zero_is_a_valid_position() {
        assert!(rink(Some(0.0), Some(0.0)).coordinate().is_some());
    }

    #[test]
    fn coordinate_absent_when_missing_or_invalid() {
        assert!(rink(None, Some(14.0)).coordinate().is_none());
        assert!(rink(Some(123.0), Some(14.0)).coordinate().is_none());
    }

    #[test]
    fn serializes_store_column_names() {
        let json = serde_json::to_value(rink(Some(50.0), Some(14.0))).expect("serialize");
        assert_eq!(json["zipcode"].as_str(), Some("110 00"));
        assert_eq!(json["lat"].as_f64(), Some(50.0));
        assert_eq!(json["lng"].as_f64(), Some(14.0));
    }
}
