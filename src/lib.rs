//! `StayScope` - hotels and the tourist attractions around them
//!
//! Pulls a city's hotel list from the Korea Tourism Organization API,
//! merges several attraction datasets into one table, and finds the
//! attractions within walking distance of a chosen hotel.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod nearby_service;
pub mod report;
pub mod tourism;
pub mod web;

// Re-export core types for public API
pub use cache::{CacheKey, SnapshotCache};
pub use config::StayScopeConfig;
pub use error::StayScopeError;
pub use models::{Coordinates, HotelRecord, PointOfInterest};
pub use nearby_service::{NearbyService, SourceSummary};
pub use report::{NearbyAttraction, NearbyReport};
pub use tourism::{FieldMapping, ProximityFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, StayScopeError>;
