use std::fmt::Display;
use thiserror::Error;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the earth's surface in decimal degrees.
///
/// Can only be constructed through [`Coordinate::new`], so a value of this type always holds a
/// finite latitude in `[-90, 90]` and a finite longitude in `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        // NaN fails both range checks
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }

        Ok(Coordinate { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CoordinateError {
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    InvalidLongitude(f64),
}
