//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Values built through [`Coordinate::new`] are finite and within range.
/// The fields stay public so callers holding already-validated data (tests,
/// fixtures) can construct one directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` unless latitude is in `[-90, 90]` and longitude is in
    /// `[-180, 180]`. NaN and infinities are rejected by the range checks.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lng_ok = (-180.0..=180.0).contains(&longitude);
        (lat_ok && lng_ok).then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a coordinate from nullable store columns.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?)
    }
}

/// Haversine great-circle distance between `a` and `b` in kilometres.
///
/// Symmetric, and zero when `a == b`. Out-of-range inputs still produce a
/// number but it has no geographic meaning.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);

    // Clamp against rounding pushing h marginally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).expect("valid coordinate")
    }

    #[test]
    fn distance_to_self_is_zero() {
        let prague = coord(50.0875, 14.4213);
        assert!(distance_km(prague, prague).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let prague = coord(50.0875, 14.4213);
        let brno = coord(49.1951, 16.6068);
        let there = distance_km(prague, brno);
        let back = distance_km(brno, prague);
        assert!((there - back).abs() < 1e-9, "{there} != {back}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(coord(50.0, 14.0), coord(51.0, 14.0));
        assert!((d - 111.19).abs() < 2.0, "got {d}");
    }

    #[test]
    fn prague_to_brno_is_about_185_km() {
        let d = distance_km(coord(50.0875, 14.4213), coord(49.1951, 16.6068));
        assert!((d - 185.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.5).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
    }

    #[test]
    fn from_parts_requires_both_columns() {
        assert!(Coordinate::from_parts(Some(50.0), None).is_none());
        assert!(Coordinate::from_parts(None, Some(14.0)).is_none());
        assert_eq!(
            Coordinate::from_parts(Some(0.0), Some(0.0)),
            Some(coord(0.0, 0.0))
        );
    }
}
