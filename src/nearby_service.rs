//! Nearby Attraction Service
//!
//! Loads the hotel table and the unified attraction table from their feeds,
//! keeps both in the snapshot cache, and answers "which attractions are
//! within R meters of this hotel" queries.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, SnapshotCache};
use crate::config::StayScopeConfig;
use crate::models::{HotelRecord, PointOfInterest};
use crate::report::NearbyReport;
use crate::tourism::{
    CsvPoiFeed, HotelSource, PoiSource, PricingSource, ProximityFilter, SimulatedPricing,
    TourApiClient, merge, normalize_hotels, normalize_pois, select_hotel,
};
use crate::{Result, StayScopeError};

const HOTELS_OPERATION: &str = "hotels";
const ATTRACTIONS_OPERATION: &str = "attractions";

/// Normalized hotel table as fetched at one point in time
#[derive(Debug, Clone, Default, Serialize)]
pub struct HotelSnapshot {
    pub hotels: Vec<HotelRecord>,
    /// Items dropped for unusable coordinates or a missing name
    pub dropped: usize,
    /// Why the feed produced nothing, if it failed
    pub error: Option<String>,
}

/// Per-dataset load diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub label: String,
    pub loaded: usize,
    pub dropped: usize,
    pub error: Option<String>,
}

/// Unified attraction table plus what each dataset contributed
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoiSnapshot {
    pub attractions: Vec<PointOfInterest>,
    pub sources: Vec<SourceSummary>,
}

impl PoiSnapshot {
    fn has_failures(&self) -> bool {
        self.sources.iter().any(|source| source.error.is_some())
    }
}

/// Diagnostics for every feed, as shown by `stayscope sources`
#[derive(Debug, Clone, Serialize)]
pub struct SourcesOverview {
    pub hotel_feed: SourceSummary,
    pub attraction_feeds: Vec<SourceSummary>,
    pub cache_ttl_seconds: u64,
}

/// Service for hotel lookup and nearby attraction search
pub struct NearbyService {
    hotel_source: Box<dyn HotelSource>,
    poi_sources: Vec<Box<dyn PoiSource>>,
    pricing: Box<dyn PricingSource>,
    hotel_cache: SnapshotCache<Arc<HotelSnapshot>>,
    poi_cache: SnapshotCache<Arc<PoiSnapshot>>,
}

impl NearbyService {
    pub fn new(
        hotel_source: Box<dyn HotelSource>,
        poi_sources: Vec<Box<dyn PoiSource>>,
        pricing: Box<dyn PricingSource>,
        ttl: std::time::Duration,
    ) -> Self {
        Self {
            hotel_source,
            poi_sources,
            pricing,
            hotel_cache: SnapshotCache::new(ttl),
            poi_cache: SnapshotCache::new(ttl),
        }
    }

    /// Wire the tourism API, the configured CSV datasets and simulated pricing
    pub fn from_config(config: &StayScopeConfig) -> Result<Self> {
        let hotel_source = Box::new(TourApiClient::new(&config.hotels)?);

        let poi_sources = config
            .poi_sources
            .iter()
            .map(|source| -> Result<Box<dyn PoiSource>> {
                Ok(Box::new(CsvPoiFeed::from_config(source)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(
            hotel_source,
            poi_sources,
            Box::new(SimulatedPricing),
            config.cache.ttl(),
        ))
    }

    /// Current hotel table, fetched at most once per freshness window.
    ///
    /// A failing feed yields an empty table rather than an error; failed
    /// snapshots are not kept so the next call tries again.
    pub async fn hotel_snapshot(&self) -> Arc<HotelSnapshot> {
        let key = CacheKey::new(HOTELS_OPERATION, self.hotel_source.name());
        let snapshot = self
            .hotel_cache
            .get_or_fetch(key.clone(), || self.load_hotels())
            .await;

        if snapshot.error.is_some() {
            self.hotel_cache.remove(&key).await;
        }
        snapshot
    }

    pub async fn hotels(&self) -> Vec<HotelRecord> {
        self.hotel_snapshot().await.hotels.clone()
    }

    /// Current unified attraction table, fetched at most once per freshness window
    pub async fn attraction_snapshot(&self) -> Arc<PoiSnapshot> {
        let labels: Vec<&str> = self.poi_sources.iter().map(|s| s.label()).collect();
        let key = CacheKey::new(ATTRACTIONS_OPERATION, labels.join("|"));
        let snapshot = self
            .poi_cache
            .get_or_fetch(key.clone(), || self.load_attractions())
            .await;

        if snapshot.has_failures() {
            self.poi_cache.remove(&key).await;
        }
        snapshot
    }

    pub async fn attractions(&self) -> Vec<PointOfInterest> {
        self.attraction_snapshot().await.attractions.clone()
    }

    /// Attractions within `radius_m` meters of the hotel named `hotel_name`
    pub async fn nearby(&self, hotel_name: &str, radius_m: f64) -> Result<NearbyReport> {
        ProximityFilter::validate_radius(radius_m)?;

        let hotels = self.hotel_snapshot().await;
        if hotels.hotels.is_empty() {
            return Err(StayScopeError::empty_feed("hotel list"));
        }

        let attractions = self.attraction_snapshot().await;
        if attractions.attractions.is_empty() {
            return Err(StayScopeError::empty_feed("attraction datasets"));
        }

        let hotel = select_hotel(&hotels.hotels, hotel_name)?;
        let nearby =
            ProximityFilter::within_radius(hotel.coordinates, &attractions.attractions, radius_m)?;

        info!(
            "Found {} of {} attractions within {} m of {}",
            nearby.len(),
            attractions.attractions.len(),
            radius_m,
            hotel.name
        );

        Ok(NearbyReport::new(
            hotel,
            radius_m,
            &nearby,
            self.pricing.is_simulated(),
        ))
    }

    pub async fn sources(&self) -> SourcesOverview {
        let hotels = self.hotel_snapshot().await;
        let attractions = self.attraction_snapshot().await;

        SourcesOverview {
            hotel_feed: SourceSummary {
                label: self.hotel_source.name().to_string(),
                loaded: hotels.hotels.len(),
                dropped: hotels.dropped,
                error: hotels.error.clone(),
            },
            attraction_feeds: attractions.sources.clone(),
            cache_ttl_seconds: self.hotel_cache.ttl().as_secs(),
        }
    }

    async fn load_hotels(&self) -> Arc<HotelSnapshot> {
        let snapshot = match self.hotel_source.fetch_hotels().await {
            Ok(items) => {
                let normalized =
                    normalize_hotels(&items, self.hotel_source.field_mapping(), self.pricing.as_ref());
                info!(
                    "Loaded {} hotels from {} ({} dropped)",
                    normalized.records.len(),
                    self.hotel_source.name(),
                    normalized.dropped
                );
                HotelSnapshot {
                    hotels: normalized.records,
                    dropped: normalized.dropped,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Failed to load hotels from {}: {}", self.hotel_source.name(), e);
                HotelSnapshot {
                    error: Some(e.to_string()),
                    ..HotelSnapshot::default()
                }
            }
        };

        Arc::new(snapshot)
    }

    async fn load_attractions(&self) -> Arc<PoiSnapshot> {
        let mut datasets = Vec::with_capacity(self.poi_sources.len());
        let mut sources = Vec::with_capacity(self.poi_sources.len());

        for source in &self.poi_sources {
            match source.fetch_rows().await {
                Ok(rows) => {
                    let normalized = normalize_pois(&rows, source.field_mapping());
                    info!(
                        "Loaded {} attractions from {} ({} dropped)",
                        normalized.records.len(),
                        source.label(),
                        normalized.dropped
                    );
                    sources.push(SourceSummary {
                        label: source.label().to_string(),
                        loaded: normalized.records.len(),
                        dropped: normalized.dropped,
                        error: None,
                    });
                    datasets.push(normalized.records);
                }
                Err(e) => {
                    // Skip this dataset, the others still contribute
                    warn!("Failed to load attractions from {}: {}", source.label(), e);
                    sources.push(SourceSummary {
                        label: source.label().to_string(),
                        loaded: 0,
                        dropped: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let attractions = merge(datasets);
        debug!("Unified attraction table has {} entries", attractions.len());

        Arc::new(PoiSnapshot {
            attractions,
            sources,
        })
    }
}
