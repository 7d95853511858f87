//! Hotel price and rating source
//!
//! The tourism API publishes neither prices nor ratings. Until a real
//! pricing feed is wired in, [`SimulatedPricing`] draws placeholder values,
//! and every report built from them is flagged as simulated.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Simulated nightly price range in KRW
pub const PRICE_RANGE: RangeInclusive<u32> = 150_000..=300_000;
/// Simulated star rating range
pub const RATING_RANGE: RangeInclusive<f64> = 3.0..=5.0;

/// Price and rating for one hotel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: u32,
    pub rating: f64,
}

/// Supplies a price and rating for a hotel
pub trait PricingSource: Send + Sync {
    fn quote(&self, hotel_name: &str) -> Quote;

    /// Whether quotes are made up rather than read from a real source
    fn is_simulated(&self) -> bool {
        true
    }
}

/// Uniformly random placeholder quotes.
///
/// Values are redrawn each time the hotel list is refetched, so prices and
/// ratings change across cache refreshes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedPricing;

impl PricingSource for SimulatedPricing {
    fn quote(&self, _hotel_name: &str) -> Quote {
        let mut rng = rand::rng();
        let price = rng.random_range(PRICE_RANGE);
        let rating: f64 = rng.random_range(RATING_RANGE);
        Quote {
            price,
            rating: round_to_tenth(rating),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
