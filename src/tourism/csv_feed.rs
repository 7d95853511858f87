//! Attraction datasets stored as CSV files
//!
//! Seoul's open data portal publishes its tourism datasets as CP949
//! (`windows-949`) encoded CSV. Files are decoded with the configured
//! encoding, a byte order mark overrides it, and every row becomes a raw
//! record keyed by the header names. Empty cells become nulls.

use encoding_rs::Encoding;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::mapping::FieldMapping;
use super::normalize::RawRecord;
use super::sources::PoiSource;
use crate::config::PoiSourceConfig;
use crate::{Result, StayScopeError};

/// One CSV attraction dataset
#[derive(Debug, Clone)]
pub struct CsvPoiFeed {
    label: String,
    path: PathBuf,
    encoding: &'static Encoding,
    fields: FieldMapping,
}

impl CsvPoiFeed {
    pub fn new(
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        encoding_label: &str,
        fields: FieldMapping,
    ) -> Result<Self> {
        let encoding = Encoding::for_label(encoding_label.as_bytes()).ok_or_else(|| {
            StayScopeError::config(format!("Unknown encoding '{encoding_label}'"))
        })?;

        Ok(Self {
            label: label.into(),
            path: path.into(),
            encoding,
            fields,
        })
    }

    pub fn from_config(config: &PoiSourceConfig) -> Result<Self> {
        Self::new(
            config.label.clone(),
            config.path.clone(),
            &config.encoding,
            config.fields.clone(),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    #[instrument(skip(self), fields(label = %self.label))]
    pub async fn read_rows(&self) -> Result<Vec<RawRecord>> {
        info!("Loading attraction dataset from {:?}", self.path);

        let bytes = tokio::fs::read(&self.path).await?;
        let text = decode(&bytes, self.encoding);
        let rows = parse_rows(&text)?;

        info!("Read {} rows from {}", rows.len(), self.label);
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl PoiSource for CsvPoiFeed {
    fn label(&self) -> &str {
        &self.label
    }

    fn field_mapping(&self) -> &FieldMapping {
        &self.fields
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRecord>> {
        self.read_rows().await
    }
}

/// Decode file contents; undecodable bytes become U+FFFD
#[must_use]
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Some bytes could not be decoded as {}; they were replaced",
            used.name()
        );
    }
    text.into_owned()
}

/// Parse CSV text with a header row into raw records.
///
/// Short rows are accepted; their missing trailing cells are simply absent
/// from the record.
pub fn parse_rows(text: &str) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| {
                let value = if cell.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (header.to_string(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
