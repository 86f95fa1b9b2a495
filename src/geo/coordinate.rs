use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::CoordinateError;

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse `"lat,lon"` as written in config files and on the command line.
    pub fn from_coordinates(coordinates: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(CoordinateError::Format(coordinates.to_string()));
        }
        let lat = parts[0]
            .parse()
            .map_err(|_| CoordinateError::Format(coordinates.to_string()))?;
        let lon = parts[1]
            .parse()
            .map_err(|_| CoordinateError::Format(coordinates.to_string()))?;
        Self::new(lat, lon)
    }

    /// Axis order used by map renderers and GeoJSON.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

/// Great-circle distance in meters.
pub fn haversine_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let dlat = b.lat_rad() - a.lat_rad();
    let dlon = b.lon_rad() - a.lon_rad();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::Longitude(-180.1))
        );
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn parses_lat_lon_string() {
        let c = Coordinate::from_coordinates(" 37.78825, -122.4324 ").unwrap();
        assert_relative_eq!(c.latitude, 37.78825);
        assert_relative_eq!(c.longitude, -122.4324);
        assert_eq!(c.lng_lat(), [-122.4324, 37.78825]);

        assert!(matches!(
            Coordinate::from_coordinates("37.7"),
            Err(CoordinateError::Format(_))
        ));
        assert!(matches!(
            Coordinate::from_coordinates("north,west"),
            Err(CoordinateError::Format(_))
        ));
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(1.0, 0.0).unwrap();
        assert_relative_eq!(haversine_m(&a, &b), 111_195.0, max_relative = 1e-3);
        assert_relative_eq!(haversine_m(&a, &a), 0.0);
    }
}
