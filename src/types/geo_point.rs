//! Geographic coordinates and the great-circle distance between them.

use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Rejected coordinate values when constructing a [`GeoPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside of [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside of [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// An immutable geographic coordinate in decimal degrees.
///
/// Values are range-checked on construction, so every `GeoPoint` in circulation is a valid
/// position on the globe. Deserialization goes through the same check.
///
/// # Examples
///
/// ```
/// use station_history::GeoPoint;
///
/// let woods_hole = GeoPoint::new(41.5265, -70.6731).unwrap();
/// assert_eq!(woods_hole.latitude(), 41.5265);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = CoordinateError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a point, rejecting latitudes outside `[-90, 90]`, longitudes outside
    /// `[-180, 180]` and NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers (haversine, mean Earth radius 6371 km).
    ///
    /// The result does not depend on argument order: both points are put in a canonical order
    /// before evaluating, so `a.distance_to(&b) == b.distance_to(&a)` holds bit for bit.
    ///
    /// Identical coordinates return exactly `0.0`. Different coordinates naming the same place,
    /// such as `(0, 180)` and `(0, -180)` or any two longitudes at a pole, go through the
    /// formula and yield `0.0` only up to floating-point error.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        if self == other {
            return 0.0;
        }
        let (first, second) = match self.canonical_cmp(other) {
            Ordering::Greater => (other, self),
            _ => (self, other),
        };
        distance(
            HaversineLocation {
                latitude: first.latitude,
                longitude: first.longitude,
            },
            HaversineLocation {
                latitude: second.latitude,
                longitude: second.longitude,
            },
            Units::Kilometers,
        )
    }

    fn canonical_cmp(&self, other: &GeoPoint) -> Ordering {
        self.latitude
            .total_cmp(&other.latitude)
            .then_with(|| self.longitude.total_cmp(&other.longitude))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
