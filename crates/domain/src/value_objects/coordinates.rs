//! Geographic coordinate value objects.
//!
//! Out-of-range values are rejected, never clamped. NaN fails every range
//! check and is therefore rejected as well.

use crate::distance::haversine_km;
use crate::error::ValidationError;

const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<f64, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Latitude in degrees, within `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    pub fn new(degrees: f64) -> Result<Self, ValidationError> {
        check_range("latitude", degrees, LATITUDE_RANGE).map(Self)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// Longitude in degrees, within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    pub fn new(degrees: f64) -> Result<Self, ValidationError> {
        check_range("longitude", degrees, LONGITUDE_RANGE).map(Self)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// A validated point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: Latitude,
    longitude: Longitude,
}

impl Coordinates {
    /// Validate a latitude/longitude pair given in degrees.
    ///
    /// Latitude is checked first.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }

    pub fn from_parts(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> Latitude {
        self.latitude
    }

    pub fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Great-circle distance to `other`, in kilometers.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine_km(
            self.latitude.degrees(),
            self.longitude.degrees(),
            other.latitude.degrees(),
            other.longitude.degrees(),
        )
    }
}

/// Search radius in kilometers (`>= 0`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchRadius(f64);

impl SearchRadius {
    pub fn new(km: f64) -> Result<Self, ValidationError> {
        if km.is_nan() || km < 0.0 {
            return Err(ValidationError::Negative {
                field: "distance_km",
                value: km,
            });
        }
        Ok(Self(km))
    }

    /// Inclusive: a point exactly on the boundary is within the radius.
    pub fn contains(self, distance_km: f64) -> bool {
        distance_km <= self.0
    }
}
