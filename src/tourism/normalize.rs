//! Schema normalization
//!
//! Turns raw records from any feed into canonical `{name, latitude,
//! longitude}` records using the feed's [`FieldMapping`]. Records whose
//! coordinates cannot be read as finite numbers are dropped and counted,
//! never raised as errors.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::mapping::{FieldMapping, TargetField};
use super::pricing::PricingSource;
use crate::models::{Coordinates, HotelRecord, PointOfInterest};

/// One raw row or API item, keyed by the source's own field names
pub type RawRecord = serde_json::Map<String, Value>;

/// A record in the canonical shape shared by every feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// `None` when the mapped name field is absent, null or blank
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

/// Normalizer output together with the number of records it discarded
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub dropped: usize,
}

impl<T> Normalized<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<CanonicalRecord> for PointOfInterest {
    fn from(record: CanonicalRecord) -> Self {
        PointOfInterest {
            name: record.name,
            coordinates: record.coordinates,
        }
    }
}

/// Normalize `raw_records` under `mapping`, preserving input order
#[must_use]
pub fn normalize(raw_records: &[RawRecord], mapping: &FieldMapping) -> Normalized<CanonicalRecord> {
    let records: Vec<CanonicalRecord> = raw_records
        .iter()
        .filter_map(|raw| normalize_record(raw, mapping))
        .collect();

    let dropped = raw_records.len() - records.len();
    if dropped > 0 {
        debug!(
            "Dropped {} of {} records without usable coordinates",
            dropped,
            raw_records.len()
        );
    }

    Normalized { records, dropped }
}

/// Normalize a single record; `None` if either coordinate is missing
#[must_use]
pub fn normalize_record(raw: &RawRecord, mapping: &FieldMapping) -> Option<CanonicalRecord> {
    let field = |target: TargetField| raw.get(mapping.source_field(target));

    let latitude = coerce_coordinate(field(TargetField::Latitude))?;
    let longitude = coerce_coordinate(field(TargetField::Longitude))?;

    Some(CanonicalRecord {
        name: coerce_name(field(TargetField::Name)),
        coordinates: Coordinates::new(latitude, longitude),
    })
}

/// Read a coordinate as a finite `f64`.
///
/// Numbers are taken as they are and strings are trimmed and parsed. Missing
/// fields, nulls, non-numeric text and non-finite values all yield `None`.
#[must_use]
pub fn coerce_coordinate(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

fn coerce_name(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Normalize attraction rows from one dataset
#[must_use]
pub fn normalize_pois(raw_records: &[RawRecord], mapping: &FieldMapping) -> Normalized<PointOfInterest> {
    let Normalized { records, dropped } = normalize(raw_records, mapping);
    Normalized {
        records: records.into_iter().map(PointOfInterest::from).collect(),
        dropped,
    }
}

/// Normalize hotel items and attach a price and rating to each.
///
/// Hotels without a name cannot be selected, so they are dropped alongside
/// the records with unusable coordinates.
#[must_use]
pub fn normalize_hotels(
    raw_records: &[RawRecord],
    mapping: &FieldMapping,
    pricing: &dyn PricingSource,
) -> Normalized<HotelRecord> {
    let Normalized { records, dropped } = normalize(raw_records, mapping);
    let canonical = records.len();

    let hotels: Vec<HotelRecord> = records
        .into_iter()
        .filter_map(|record| {
            let name = record.name?;
            let quote = pricing.quote(&name);
            Some(HotelRecord {
                name,
                coordinates: record.coordinates,
                price: quote.price,
                rating: quote.rating,
            })
        })
        .collect();

    Normalized {
        dropped: dropped + (canonical - hotels.len()),
        records: hotels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tourism::pricing::Quote;
    use rstest::rstest;
    use serde_json::json;

    struct FlatPricing;

    impl PricingSource for FlatPricing {
        fn quote(&self, _hotel_name: &str) -> Quote {
            Quote {
                price: 200_000,
                rating: 4.0,
            }
        }
    }

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn hotel_mapping() -> FieldMapping {
        FieldMapping::new("title", "mapy", "mapx").unwrap()
    }

    #[rstest]
    #[case::json_number(Some(json!(37.5547)), Some(37.5547))]
    #[case::numeric_string(Some(json!("126.9707")), Some(126.9707))]
    #[case::padded_string(Some(json!("  37.5 ")), Some(37.5))]
    #[case::not_available(Some(json!("N/A")), None)]
    #[case::empty_string(Some(json!("")), None)]
    #[case::null(Some(Value::Null), None)]
    #[case::nan_text(Some(json!("NaN")), None)]
    #[case::infinite_text(Some(json!("inf")), None)]
    #[case::boolean(Some(json!(true)), None)]
    #[case::missing(None, None)]
    fn test_coerce_coordinate(#[case] value: Option<Value>, #[case] expected: Option<f64>) {
        assert_eq!(coerce_coordinate(value.as_ref()), expected);
    }

    #[test]
    fn test_tour_api_item_maps_mapx_to_longitude() {
        let item = raw(json!({
            "title": "Seoul Station Hotel",
            "mapx": "126.9707",
            "mapy": "37.5547",
            "addr1": "Seoul"
        }));

        let record = normalize_record(&item, &hotel_mapping()).unwrap();
        assert_eq!(record.name.as_deref(), Some("Seoul Station Hotel"));
        assert_eq!(record.coordinates, Coordinates::new(37.5547, 126.9707));
    }

    #[test]
    fn test_non_numeric_latitude_is_dropped() {
        let items = vec![
            raw(json!({"title": "Good", "mapx": "126.97", "mapy": "37.55"})),
            raw(json!({"title": "Bad", "mapx": "126.97", "mapy": "N/A"})),
        ];

        let normalized = normalize(&items, &hotel_mapping());
        assert_eq!(normalized.records.len(), 1);
        assert_eq!(normalized.dropped, 1);
        assert_eq!(normalized.records[0].name.as_deref(), Some("Good"));
    }

    #[test]
    fn test_missing_source_columns_drop_every_record() {
        let mapping = FieldMapping::new("명칭", "Y 좌표", "X 좌표").unwrap();
        let rows = vec![
            raw(json!({"이름": "Somewhere", "lat": "37.5", "lng": "127.0"})),
            raw(json!({"이름": "Elsewhere", "lat": "37.6", "lng": "127.1"})),
        ];

        let normalized = normalize(&rows, &mapping);
        assert!(normalized.is_empty());
        assert_eq!(normalized.dropped, 2);
    }

    #[test]
    fn test_missing_name_keeps_the_row() {
        let mapping = FieldMapping::new("명칭", "Y 좌표", "X 좌표").unwrap();
        let rows = vec![
            raw(json!({"명칭": null, "Y 좌표": "37.57", "X 좌표": "126.98"})),
            raw(json!({"Y 좌표": "37.58", "X 좌표": "126.99"})),
        ];

        let normalized = normalize_pois(&rows, &mapping);
        assert_eq!(normalized.records.len(), 2);
        assert!(normalized.records.iter().all(|poi| poi.name.is_none()));
    }

    #[test]
    fn test_output_preserves_order_and_only_finite_coordinates() {
        let rows: Vec<RawRecord> = (0..10)
            .map(|i| {
                let lat = if i % 3 == 0 { json!("x") } else { json!(37.0 + f64::from(i) / 100.0) };
                raw(json!({"title": format!("row {i}"), "mapy": lat, "mapx": 127.0}))
            })
            .collect();

        let normalized = normalize(&rows, &hotel_mapping());
        assert!(normalized.records.len() <= rows.len());
        assert_eq!(normalized.records.len() + normalized.dropped, rows.len());
        assert!(normalized.records.iter().all(|r| r.coordinates.is_finite()));

        let names: Vec<_> = normalized
            .records
            .iter()
            .map(|r| r.name.clone().unwrap())
            .collect();
        assert_eq!(
            names,
            ["row 1", "row 2", "row 4", "row 5", "row 7", "row 8"]
        );
    }

    #[test]
    fn test_normalize_hotels_attaches_pricing_and_drops_nameless() {
        let items = vec![
            raw(json!({"title": "Lotte Hotel", "mapx": "126.9810", "mapy": "37.5651"})),
            raw(json!({"title": "", "mapx": "126.9810", "mapy": "37.5651"})),
            raw(json!({"title": "Broken", "mapx": "", "mapy": "37.5651"})),
        ];

        let normalized = normalize_hotels(&items, &hotel_mapping(), &FlatPricing);
        assert_eq!(normalized.records.len(), 1);
        assert_eq!(normalized.dropped, 2);

        let hotel = &normalized.records[0];
        assert_eq!(hotel.name, "Lotte Hotel");
        assert_eq!(hotel.price, 200_000);
        assert_eq!(hotel.rating, 4.0);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let normalized = normalize(&[], &hotel_mapping());
        assert!(normalized.is_empty());
        assert_eq!(normalized.dropped, 0);
    }
}
