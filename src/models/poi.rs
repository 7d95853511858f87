//! Point-of-interest model

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Label used wherever an attraction without a name has to be shown
pub const UNNAMED: &str = "(unnamed)";

/// A tourist attraction normalized from one of the attraction datasets
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Display name; `None` when the dataset row had no value in its name column
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

impl PointOfInterest {
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            coordinates: Coordinates::new(latitude, longitude),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_for_missing_name() {
        let named = PointOfInterest::new("Gyeongbokgung", 37.5796, 126.9770);
        assert_eq!(named.label(), "Gyeongbokgung");

        let unnamed = PointOfInterest {
            name: None,
            coordinates: Coordinates::new(37.5796, 126.9770),
        };
        assert_eq!(unnamed.label(), UNNAMED);
    }
}
