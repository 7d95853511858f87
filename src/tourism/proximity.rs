//! Radius search around a hotel
//!
//! Distances are great-circle (haversine) distances on a spherical earth.
//! Every candidate is checked, there is no spatial index; that is fine for
//! the few thousand attractions a city dataset holds.

use haversine::Units;

use crate::models::{Coordinates, PointOfInterest};
use crate::{Result, StayScopeError};

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Geographic radius filtering
pub struct ProximityFilter;

impl ProximityFilter {
    /// Great-circle distance between two points in meters
    #[must_use]
    pub fn distance_meters(from: Coordinates, to: Coordinates) -> f64 {
        haversine::distance(from.into(), to.into(), Units::Kilometers) * METERS_PER_KILOMETER
    }

    /// Reject radii that are negative or not a number
    pub fn validate_radius(radius_m: f64) -> Result<()> {
        if radius_m.is_nan() || radius_m < 0.0 {
            return Err(StayScopeError::InvalidRadius { radius_m });
        }
        Ok(())
    }

    /// Candidates within `radius_m` meters of `reference`, boundary included.
    ///
    /// The result keeps the candidates' order; it is not sorted by distance.
    pub fn within_radius(
        reference: Coordinates,
        candidates: &[PointOfInterest],
        radius_m: f64,
    ) -> Result<Vec<PointOfInterest>> {
        Self::validate_radius(radius_m)?;

        Ok(candidates
            .iter()
            .filter(|poi| Self::distance_meters(reference, poi.coordinates) <= radius_m)
            .cloned()
            .collect())
    }
}
