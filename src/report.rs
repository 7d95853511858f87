//! Nearby-attraction report
//!
//! The result of one hotel + radius query, serializable for the HTTP API and
//! `--json` output, and renderable as a plain-text table for the terminal.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::models::{Coordinates, HotelRecord, PointOfInterest};
use crate::tourism::ProximityFilter;

/// An attraction inside the search radius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyAttraction {
    pub name: String,
    pub coordinates: Coordinates,
    /// Great-circle distance from the hotel in meters
    pub distance_m: f64,
}

impl NearbyAttraction {
    #[must_use]
    pub fn from_poi(hotel: &HotelRecord, poi: &PointOfInterest) -> Self {
        Self {
            name: poi.label().to_string(),
            coordinates: poi.coordinates,
            distance_m: ProximityFilter::distance_meters(hotel.coordinates, poi.coordinates),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyReport {
    pub hotel: HotelRecord,
    /// `name | price | rating` marker label
    pub hotel_label: String,
    pub radius_m: f64,
    /// In unified-table order, not sorted by distance
    pub attractions: Vec<NearbyAttraction>,
    /// Price and rating are placeholders, not real offers
    pub simulated_pricing: bool,
    pub generated_at: DateTime<Utc>,
}

impl NearbyReport {
    #[must_use]
    pub fn new(
        hotel: &HotelRecord,
        radius_m: f64,
        nearby: &[PointOfInterest],
        simulated_pricing: bool,
    ) -> Self {
        Self {
            hotel: hotel.clone(),
            hotel_label: hotel.label(),
            radius_m,
            attractions: nearby
                .iter()
                .map(|poi| NearbyAttraction::from_poi(hotel, poi))
                .collect(),
            simulated_pricing,
            generated_at: Utc::now(),
        }
    }

    /// Terminal rendering: a header line followed by one row per attraction
    #[must_use]
    pub fn render_table(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.hotel_label);
        let _ = writeln!(
            out,
            "at {} | {} attraction(s) within {} m",
            self.hotel.coordinates.format_coordinates(),
            self.attractions.len(),
            self.radius_m
        );
        if self.simulated_pricing {
            let _ = writeln!(out, "(price and rating are simulated)");
        }

        if self.attractions.is_empty() {
            return out;
        }

        let width = self
            .attractions
            .iter()
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Attraction".len());

        let _ = writeln!(out);
        let _ = writeln!(out, "{:<width$}  {:>10}  Coordinates", "Attraction", "Distance");
        for attraction in &self.attractions {
            let _ = writeln!(
                out,
                "{:<width$}  {:>8.0} m  {}",
                attraction.name,
                attraction.distance_m,
                attraction.coordinates.format_coordinates()
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul_station_hotel() -> HotelRecord {
        HotelRecord {
            name: "Seoul Station Hotel".to_string(),
            coordinates: Coordinates::new(37.5547, 126.9707),
            price: 180_000,
            rating: 4.2,
        }
    }

    #[test]
    fn test_report_carries_distances_in_input_order() {
        let hotel = seoul_station_hotel();
        let nearby = vec![
            PointOfInterest::new("City Hall", 37.5665, 126.9780),
            PointOfInterest::new("Namdaemun", 37.5600, 126.9753),
        ];

        let report = NearbyReport::new(&hotel, 2000.0, &nearby, true);

        assert_eq!(report.hotel_label, "Seoul Station Hotel | price: 180000 KRW | rating: 4.2");
        assert_eq!(report.attractions.len(), 2);
        assert_eq!(report.attractions[0].name, "City Hall");
        assert!(report.attractions[0].distance_m > report.attractions[1].distance_m);
        assert!(report.simulated_pricing);
    }

    #[test]
    fn test_unnamed_attraction_gets_placeholder() {
        let hotel = seoul_station_hotel();
        let nearby = vec![PointOfInterest {
            name: None,
            coordinates: Coordinates::new(37.5550, 126.9710),
        }];

        let report = NearbyReport::new(&hotel, 500.0, &nearby, true);
        assert_eq!(report.attractions[0].name, crate::models::poi::UNNAMED);
    }

    #[test]
    fn test_render_table() {
        let hotel = seoul_station_hotel();
        let nearby = vec![PointOfInterest::new("Namdaemun", 37.5600, 126.9753)];
        let table = NearbyReport::new(&hotel, 1000.0, &nearby, true).render_table();

        assert!(table.starts_with("Seoul Station Hotel | price: 180000 KRW"));
        assert!(table.contains("1 attraction(s) within 1000 m"));
        assert!(table.contains("simulated"));
        assert!(table.contains("Namdaemun"));
        assert!(table.contains("37.5600, 126.9753"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = NearbyReport::new(&seoul_station_hotel(), 500.0, &[], false);
        let table = report.render_table();
        assert!(table.contains("0 attraction(s)"));
        assert!(!table.contains("Distance"));
        assert!(!table.contains("simulated"));
    }

    #[test]
    fn test_report_serializes() {
        let report = NearbyReport::new(&seoul_station_hotel(), 1000.0, &[], true);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["hotel"]["name"], "Seoul Station Hotel");
        assert_eq!(value["radius_m"], 1000.0);
        assert_eq!(value["simulated_pricing"], true);
        assert!(value["generated_at"].is_string());
    }
}
