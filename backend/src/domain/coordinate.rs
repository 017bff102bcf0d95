//! WGS84 coordinate value object.

use geo::Coord;

/// Validation failures raised by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// Latitude is not finite or lies outside `[-90, 90]`.
    #[error("latitude {0} must be within [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude is not finite or lies outside `[-180, 180]`.
    #[error("longitude {0} must be within [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// An immutable latitude/longitude pair in degrees.
///
/// ## Invariants
/// - `latitude` is finite and within `[-90, 90]`.
/// - `longitude` is finite and within `[-180, 180]`.
///
/// # Examples
/// ```
/// use fuelroute::domain::Coordinate;
///
/// let point = Coordinate::new(40.0, -74.0)?;
/// assert_eq!(point.latitude(), 40.0);
/// assert!(Coordinate::new(95.0, 200.0).is_err());
/// # Ok::<(), fuelroute::domain::CoordinateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a validated coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(self) -> f64 {
        self.longitude
    }

    /// `[lat, lon]` pair as used in response bodies.
    pub fn as_lat_lon(self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Planar `geo` coordinate with `x = longitude`, `y = latitude`.
    pub(crate) fn to_geo(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_values(#[case] lat: f64, #[case] lon: f64) {
        let point = Coordinate::new(lat, lon).expect("boundary is valid");
        assert_eq!(point.as_lat_lon(), [lat, lon]);
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn rejects_bad_latitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            Coordinate::new(lat, lon),
            Err(CoordinateError::LatitudeOutOfRange(_))
        ));
    }

    #[rstest]
    #[case(0.0, 180.01)]
    #[case(0.0, -200.0)]
    #[case(0.0, f64::NEG_INFINITY)]
    fn rejects_bad_longitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            Coordinate::new(lat, lon),
            Err(CoordinateError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn geo_coord_is_lon_lat() {
        let point = Coordinate::new(51.5, -0.1).expect("valid");
        let coord = point.to_geo();
        assert_eq!((coord.x, coord.y), (-0.1, 51.5));
    }
}
