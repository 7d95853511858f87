//! Error types and handling for the `StayScope` application

use thiserror::Error;

/// Main error type for the `StayScope` application
#[derive(Error, Debug)]
pub enum StayScopeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Tourism API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A negative or non-numeric search radius reached the proximity filter
    #[error("Invalid radius: {radius_m} m (radius must be a non-negative number of meters)")]
    InvalidRadius { radius_m: f64 },

    /// The requested hotel name is not part of the current hotel table
    #[error("Hotel not found: {name}")]
    HotelNotFound { name: String },

    /// A source feed produced no usable records for this session
    #[error("No usable records from {feed}")]
    EmptyFeed { feed: String },

    /// Attraction dataset parsing errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl StayScopeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn empty_feed<S: Into<String>>(feed: S) -> Self {
        Self::EmptyFeed { feed: feed.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StayScopeError::Config { .. } => {
                "Configuration error. Please check your config file and service key.".to_string()
            }
            StayScopeError::Api { .. } => {
                "Unable to reach the tourism API. Please check your service key and network."
                    .to_string()
            }
            StayScopeError::Validation { message } => format!("Invalid input: {message}"),
            StayScopeError::InvalidRadius { radius_m } => {
                format!("Search radius must not be negative (got {radius_m} m).")
            }
            StayScopeError::HotelNotFound { name } => {
                format!("No hotel named '{name}' in the current hotel list.")
            }
            StayScopeError::EmptyFeed { feed } => {
                format!("Could not load {feed}. Check the service key, network and data files.")
            }
            StayScopeError::Csv { .. } => {
                "An attraction dataset could not be parsed. Check its encoding and columns."
                    .to_string()
            }
            StayScopeError::Io { .. } => {
                "File operation failed. Please check file paths and permissions.".to_string()
            }
        }
    }
}
