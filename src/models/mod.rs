//! Data models for the StayScope application
//!
//! - Location: geographic coordinates
//! - Hotel: a selectable hotel with (simulated) price and rating
//! - Poi: a tourist attraction from any dataset

pub mod hotel;
pub mod location;
pub mod poi;

pub use hotel::HotelRecord;
pub use location::Coordinates;
pub use poi::PointOfInterest;
