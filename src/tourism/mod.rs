//! Tourism module
//!
//! The nearby-search pipeline and the feeds around it:
//! - Field mappings and schema normalization for heterogeneous datasets
//! - Merging of attraction datasets
//! - Great-circle radius filtering around a hotel
//! - Hotel selection and (simulated) pricing
//! - Hotel feed from the tourism API and CSV attraction datasets

pub mod csv_feed;
pub mod mapping;
pub mod merge;
pub mod normalize;
pub mod pricing;
pub mod proximity;
pub mod selection;
pub mod sources;
pub mod tour_api;

// Re-export commonly used types from submodules
pub use csv_feed::CsvPoiFeed;
pub use mapping::{FieldMapping, TargetField};
pub use merge::merge;
pub use normalize::{
    CanonicalRecord, Normalized, RawRecord, normalize, normalize_hotels, normalize_pois,
};
pub use pricing::{PricingSource, Quote, SimulatedPricing};
pub use proximity::ProximityFilter;
pub use selection::select_hotel;
pub use sources::{HotelSource, PoiSource};
pub use tour_api::TourApiClient;
