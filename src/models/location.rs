//! Geographic coordinates shared by hotels and attractions

use serde::{Deserialize, Serialize};

/// A point on the earth in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Format as a `lat, lon` string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<Coordinates> for haversine::Location {
    fn from(coordinates: Coordinates) -> Self {
        haversine::Location {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}
