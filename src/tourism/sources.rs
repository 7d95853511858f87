//! Feeds that supply raw hotel items and attraction rows

use async_trait::async_trait;

use super::mapping::FieldMapping;
use super::normalize::RawRecord;
use crate::Result;

/// Supplies raw hotel items for one city
#[async_trait]
pub trait HotelSource: Send + Sync {
    /// Name used in cache keys and logs
    fn name(&self) -> &str;

    /// Which item fields hold the name and coordinates
    fn field_mapping(&self) -> &FieldMapping;

    async fn fetch_hotels(&self) -> Result<Vec<RawRecord>>;
}

/// Supplies raw rows of one attraction dataset
#[async_trait]
pub trait PoiSource: Send + Sync {
    fn label(&self) -> &str;

    /// Which columns hold the name and coordinates
    fn field_mapping(&self) -> &FieldMapping;

    async fn fetch_rows(&self) -> Result<Vec<RawRecord>>;
}
