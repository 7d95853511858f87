//! Per-source field mappings
//!
//! Every dataset names the same three facts differently. A [`FieldMapping`]
//! records which raw column holds each canonical field and is declared per
//! source in the configuration file:
//!
//! ```toml
//! [poi_sources.fields]
//! name = "최종 표기명"
//! latitude = "중심 좌표 Y"
//! longitude = "중심 좌표 X"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::{Result, StayScopeError};

/// A field of the canonical `{name, latitude, longitude}` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetField {
    Name,
    Latitude,
    Longitude,
}

impl TargetField {
    pub const ALL: [TargetField; 3] = [
        TargetField::Name,
        TargetField::Latitude,
        TargetField::Longitude,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TargetField::Name => "name",
            TargetField::Latitude => "latitude",
            TargetField::Longitude => "longitude",
        }
    }

    fn parse(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == target)
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source column name for each canonical field of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct FieldMapping {
    name: String,
    latitude: String,
    longitude: String,
}

impl FieldMapping {
    /// Build a mapping, rejecting blank source column names
    pub fn new(
        name: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Result<Self> {
        let mapping = Self {
            name: name.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        };

        for target in TargetField::ALL {
            if mapping.source_field(target).trim().is_empty() {
                return Err(StayScopeError::config(format!(
                    "Field mapping for '{target}' must name a source column"
                )));
            }
        }

        Ok(mapping)
    }

    /// Built-in mappings whose column names are known to be non-blank
    pub(crate) fn known(name: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }

    /// Raw column that feeds `target`
    #[must_use]
    pub fn source_field(&self, target: TargetField) -> &str {
        match target {
            TargetField::Name => &self.name,
            TargetField::Latitude => &self.latitude,
            TargetField::Longitude => &self.longitude,
        }
    }
}

impl TryFrom<HashMap<String, String>> for FieldMapping {
    type Error = StayScopeError;

    fn try_from(mut entries: HashMap<String, String>) -> Result<Self> {
        if let Some(unknown) = entries.keys().find(|key| TargetField::parse(key).is_none()) {
            return Err(StayScopeError::config(format!(
                "Unknown target field '{unknown}' in field mapping (expected name, latitude, longitude)"
            )));
        }

        let mut take = |target: TargetField| {
            entries.remove(target.as_str()).ok_or_else(|| {
                StayScopeError::config(format!("Field mapping is missing target field '{target}'"))
            })
        };

        let name = take(TargetField::Name)?;
        let latitude = take(TargetField::Latitude)?;
        let longitude = take(TargetField::Longitude)?;

        Self::new(name, latitude, longitude)
    }
}

impl From<FieldMapping> for BTreeMap<String, String> {
    fn from(mapping: FieldMapping) -> Self {
        TargetField::ALL
            .into_iter()
            .map(|target| {
                (
                    target.as_str().to_string(),
                    mapping.source_field(target).to_string(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entries(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_mapping_from_complete_table() {
        let mapping = FieldMapping::try_from(entries(&[
            ("name", "명칭"),
            ("latitude", "Y 좌표"),
            ("longitude", "X 좌표"),
        ]))
        .unwrap();

        assert_eq!(mapping.source_field(TargetField::Name), "명칭");
        assert_eq!(mapping.source_field(TargetField::Latitude), "Y 좌표");
        assert_eq!(mapping.source_field(TargetField::Longitude), "X 좌표");
    }

    #[rstest]
    #[case::missing_target(&[("name", "title"), ("latitude", "mapy")], "missing target field 'longitude'")]
    #[case::unknown_target(&[("name", "title"), ("lat", "mapy"), ("longitude", "mapx")], "Unknown target field 'lat'")]
    #[case::blank_source(&[("name", " "), ("latitude", "mapy"), ("longitude", "mapx")], "'name' must name a source column")]
    fn test_invalid_mappings_are_rejected(#[case] pairs: &[(&str, &str)], #[case] expected: &str) {
        let err = FieldMapping::try_from(entries(pairs)).unwrap_err();
        assert!(err.to_string().contains(expected), "unexpected error: {err}");
    }

    #[test]
    fn test_mapping_deserializes_from_toml_table() {
        #[derive(Deserialize)]
        struct Source {
            fields: FieldMapping,
        }

        let source: Source = serde_json::from_value(serde_json::json!({
            "fields": {"name": "title", "latitude": "mapy", "longitude": "mapx"}
        }))
        .unwrap();
        assert_eq!(source.fields.source_field(TargetField::Latitude), "mapy");

        let bad = serde_json::from_value::<Source>(serde_json::json!({
            "fields": {"name": "title", "latitude": "mapy"}
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_mapping_serializes_as_table() {
        let mapping = FieldMapping::new("title", "mapy", "mapx").unwrap();
        let value = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"latitude": "mapy", "longitude": "mapx", "name": "title"})
        );
    }
}
