//! Hotel model

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A hotel from the tourism API feed.
///
/// `price` and `rating` are simulated placeholders attached by a
/// [`PricingSource`](crate::tourism::PricingSource); the tourism API does not
/// publish either value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelRecord {
    /// Selection key; not guaranteed unique, the first match wins
    pub name: String,
    pub coordinates: Coordinates,
    /// Nightly price in KRW
    pub price: u32,
    /// Star rating in [3.0, 5.0] with one decimal
    pub rating: f64,
}

impl HotelRecord {
    /// Popup/marker label: `name | price | rating`
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} | price: {} KRW | rating: {:.1}",
            self.name, self.price, self.rating
        )
    }
}
