pub mod geocoding;
pub mod position;

#[cfg(test)]
mod testing;

use std::fmt;

pub use geocoding::{Address, Geocoder, PlaceResolver, PlaceResult, Unavailable};
pub use position::{AcquisitionState, Acquirer, LocationError, PositionSource};

/// A point on the globe in decimal degrees.
///
/// Produced once per acquisition and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the WGS84 ranges
    /// (latitude in `[-90, 90]`, longitude in `[-180, 180]`).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
