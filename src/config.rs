//! Configuration management for the `StayScope` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::StayScopeError;
use crate::tourism::FieldMapping;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `StayScope` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayScopeConfig {
    /// Hotel feed (tourism API) configuration
    #[serde(default)]
    pub hotels: HotelFeedConfig,
    /// Attraction datasets, merged in this order
    #[serde(default = "default_poi_sources")]
    pub poi_sources: Vec<PoiSourceConfig>,
    /// Snapshot cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Radius search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP API server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Korea Tourism Organization `searchStay2` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelFeedConfig {
    /// Base URL of the tourism API service
    #[serde(default = "default_hotels_base_url")]
    pub base_url: String,
    /// data.go.kr service key (the decoded form; it is URL-encoded on send)
    pub service_key: Option<String>,
    /// Area code of the city to search (1 = Seoul)
    #[serde(default = "default_area_code")]
    pub area_code: u32,
    /// Page size requested from the API
    #[serde(default = "default_num_of_rows")]
    pub num_of_rows: u32,
    #[serde(default = "default_page_no")]
    pub page_no: u32,
    /// Sort order code (A = title)
    #[serde(default = "default_arrange")]
    pub arrange: String,
    /// Application name reported to the API
    #[serde(default = "default_mobile_app")]
    pub mobile_app: String,
    /// Request timeout in seconds
    #[serde(default = "default_hotels_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_hotels_max_retries")]
    pub max_retries: u32,
    /// Which API item fields hold the name and coordinates
    #[serde(default = "default_hotel_fields")]
    pub fields: FieldMapping,
}

/// One attraction dataset (CSV file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiSourceConfig {
    /// Human readable dataset name used in logs and diagnostics
    pub label: String,
    /// Path of the CSV file
    pub path: PathBuf,
    /// Character encoding label of the file (WHATWG label, e.g. `windows-949`, `utf-8`)
    #[serde(default = "default_poi_encoding")]
    pub encoding: String,
    /// Which columns hold the name and coordinates
    pub fields: FieldMapping,
}

/// Snapshot cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a fetched hotel list or attraction set is reused, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Radius limits offered to users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_radius")]
    pub default_radius_m: u32,
    #[serde(default = "default_min_radius")]
    pub min_radius_m: u32,
    #[serde(default = "default_max_radius")]
    pub max_radius_m: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_hotels_base_url() -> String {
    "http://apis.data.go.kr/B551011/KorService2".to_string()
}

fn default_area_code() -> u32 {
    1
}

fn default_num_of_rows() -> u32 {
    50
}

fn default_page_no() -> u32 {
    1
}

fn default_arrange() -> String {
    "A".to_string()
}

fn default_mobile_app() -> String {
    "stayscope".to_string()
}

fn default_hotels_timeout() -> u32 {
    10
}

fn default_hotels_max_retries() -> u32 {
    2
}

fn default_hotel_fields() -> FieldMapping {
    // searchStay2 reports longitude as mapx and latitude as mapy
    FieldMapping::known("title", "mapy", "mapx")
}

fn default_poi_encoding() -> String {
    "windows-949".to_string()
}

fn default_poi_sources() -> Vec<PoiSourceConfig> {
    vec![
        PoiSourceConfig {
            label: "Seoul tourist streets (2015)".to_string(),
            path: PathBuf::from("data/서울시 관광거리 정보 (한국어)(2015년).csv"),
            encoding: default_poi_encoding(),
            fields: FieldMapping::known("최종 표기명", "중심 좌표 Y", "중심 좌표 X"),
        },
        PoiSourceConfig {
            label: "Jongno-gu tourism data".to_string(),
            path: PathBuf::from("data/서울시 종로구 관광데이터 정보 (한국어).csv"),
            encoding: default_poi_encoding(),
            fields: FieldMapping::known("명칭", "Y 좌표", "X 좌표"),
        },
    ]
}

fn default_cache_ttl() -> u64 {
    60 * 60
}

fn default_radius() -> u32 {
    1000
}

fn default_min_radius() -> u32 {
    500
}

fn default_max_radius() -> u32 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HotelFeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_hotels_base_url(),
            service_key: None,
            area_code: default_area_code(),
            num_of_rows: default_num_of_rows(),
            page_no: default_page_no(),
            arrange: default_arrange(),
            mobile_app: default_mobile_app(),
            timeout_seconds: default_hotels_timeout(),
            max_retries: default_hotels_max_retries(),
            fields: default_hotel_fields(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_m: default_radius(),
            min_radius_m: default_min_radius(),
            max_radius_m: default_max_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for StayScopeConfig {
    fn default() -> Self {
        Self {
            hotels: HotelFeedConfig::default(),
            poi_sources: default_poi_sources(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl SearchConfig {
    /// Check a user supplied radius against the offered range
    pub fn check_radius(&self, radius_m: f64) -> crate::Result<()> {
        let min = f64::from(self.min_radius_m);
        let max = f64::from(self.max_radius_m);
        if !(min..=max).contains(&radius_m) {
            return Err(StayScopeError::validation(format!(
                "radius must be between {} and {} m, got {radius_m}",
                self.min_radius_m, self.max_radius_m
            )));
        }
        Ok(())
    }
}

impl StayScopeConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = Self::resolve_path(config_path);

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. STAYSCOPE_HOTELS__SERVICE_KEY
        builder = builder.add_source(
            Environment::with_prefix("STAYSCOPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: StayScopeConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// The file that will be read: the explicit path, else the default location
    #[must_use]
    pub fn resolve_path(config_path: Option<PathBuf>) -> PathBuf {
        config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        })
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stayscope").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.hotels.base_url.is_empty() {
            self.hotels.base_url = default_hotels_base_url();
        }
        if self.hotels.arrange.is_empty() {
            self.hotels.arrange = default_arrange();
        }
        if self.hotels.mobile_app.is_empty() {
            self.hotels.mobile_app = default_mobile_app();
        }
        if self.hotels.timeout_seconds == 0 {
            self.hotels.timeout_seconds = default_hotels_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        for source in &mut self.poi_sources {
            if source.encoding.is_empty() {
                source.encoding = default_poi_encoding();
            }
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_service_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_poi_sources()?;
        Ok(())
    }

    /// The service key is optional, but a configured one must look plausible
    pub fn validate_service_key(&self) -> Result<()> {
        if let Some(service_key) = &self.hotels.service_key {
            if service_key.trim().is_empty() {
                return Err(StayScopeError::config(
                    "Hotel service key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if service_key.len() < 16 {
                return Err(StayScopeError::config(
                    "Hotel service key appears to be invalid (too short). Please check your data.go.kr key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.hotels.timeout_seconds > 300 {
            return Err(StayScopeError::config("Hotel API timeout cannot exceed 300 seconds").into());
        }

        if self.hotels.max_retries > 10 {
            return Err(StayScopeError::config("Hotel API max retries cannot exceed 10").into());
        }

        if self.hotels.num_of_rows == 0 || self.hotels.num_of_rows > 1000 {
            return Err(
                StayScopeError::config("Hotel API num_of_rows must be between 1 and 1000").into(),
            );
        }

        if self.hotels.page_no == 0 {
            return Err(StayScopeError::config("Hotel API page_no starts at 1").into());
        }

        if self.cache.ttl_seconds == 0 {
            return Err(StayScopeError::config("Cache TTL must be at least one second").into());
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(StayScopeError::config("Cache TTL cannot exceed 1 week").into());
        }

        let search = &self.search;
        if search.min_radius_m > search.max_radius_m {
            return Err(StayScopeError::config(format!(
                "Minimum radius ({} m) cannot exceed maximum radius ({} m)",
                search.min_radius_m, search.max_radius_m
            ))
            .into());
        }

        if !(search.min_radius_m..=search.max_radius_m).contains(&search.default_radius_m) {
            return Err(StayScopeError::config(format!(
                "Default radius ({} m) must lie between {} and {} m",
                search.default_radius_m, search.min_radius_m, search.max_radius_m
            ))
            .into());
        }

        if self.server.port == 0 {
            return Err(StayScopeError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(StayScopeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(StayScopeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.hotels.base_url.starts_with("http://")
            && !self.hotels.base_url.starts_with("https://")
        {
            return Err(StayScopeError::config(
                "Hotel API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Every attraction dataset needs a label, a path and a known encoding
    fn validate_poi_sources(&self) -> Result<()> {
        if self.poi_sources.is_empty() {
            return Err(StayScopeError::config("At least one attraction dataset must be configured").into());
        }

        for source in &self.poi_sources {
            if source.label.trim().is_empty() {
                return Err(StayScopeError::config("Attraction dataset label cannot be empty").into());
            }

            if source.path.as_os_str().is_empty() {
                return Err(StayScopeError::config(format!(
                    "Attraction dataset '{}' has no path",
                    source.label
                ))
                .into());
            }

            if encoding_rs::Encoding::for_label(source.encoding.as_bytes()).is_none() {
                return Err(StayScopeError::config(format!(
                    "Unknown encoding '{}' for attraction dataset '{}'",
                    source.encoding, source.label
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tourism::TargetField;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = StayScopeConfig::default();
        assert_eq!(config.hotels.base_url, "http://apis.data.go.kr/B551011/KorService2");
        assert_eq!(config.hotels.area_code, 1);
        assert_eq!(config.hotels.num_of_rows, 50);
        assert_eq!(config.hotels.fields.source_field(TargetField::Longitude), "mapx");
        assert_eq!(config.hotels.fields.source_field(TargetField::Latitude), "mapy");
        assert_eq!(config.cache.ttl(), Duration::from_secs(3600));
        assert_eq!(config.search.default_radius_m, 1000);
        assert_eq!(config.poi_sources.len(), 2);
        assert!(config.hotels.service_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_service_key() {
        let mut config = StayScopeConfig::default();
        config.hotels.service_key = Some("short".to_string());
        let result = config.validate_service_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = StayScopeConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_radius_range() {
        let mut config = StayScopeConfig::default();
        config.search.default_radius_m = 5000;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Default radius"));
    }

    #[test]
    fn test_config_validation_unknown_encoding() {
        let mut config = StayScopeConfig::default();
        config.poi_sources[0].encoding = "klingon".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown encoding"));
    }

    #[test]
    fn test_check_radius() {
        let search = SearchConfig::default();
        assert!(search.check_radius(500.0).is_ok());
        assert!(search.check_radius(2000.0).is_ok());
        assert!(search.check_radius(499.0).is_err());
        assert!(search.check_radius(2500.0).is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[hotels]
area_code = 6
num_of_rows = 20

[cache]
ttl_seconds = 600

[[poi_sources]]
label = "Busan beaches"
path = "data/busan.csv"
encoding = "utf-8"

[poi_sources.fields]
name = "name"
latitude = "lat"
longitude = "lng"
"#
        )
        .unwrap();

        let config = StayScopeConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.hotels.area_code, 6);
        assert_eq!(config.hotels.num_of_rows, 20);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.poi_sources.len(), 1);
        assert_eq!(config.poi_sources[0].label, "Busan beaches");
        assert_eq!(
            config.poi_sources[0].fields.source_field(TargetField::Latitude),
            "lat"
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_rejects_incomplete_field_mapping() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[poi_sources]]
label = "Broken"
path = "data/broken.csv"

[poi_sources.fields]
name = "name"
latitude = "lat"
"#
        )
        .unwrap();

        let result = StayScopeConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = StayScopeConfig::get_config_path();
        if let Some(path) = path {
            assert!(path.to_string_lossy().contains("stayscope"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
