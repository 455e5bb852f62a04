//! Error types and utilities for the Atelier analytics engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AtelierError>;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum AtelierError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An unrecognized report type was requested
    #[error("Invalid report type: {requested}")]
    InvalidReportType { requested: String },

    /// A date range that cannot describe a reporting window
    #[error("Invalid date range: {message}")]
    InvalidDateRange { message: String },

    /// Validation errors for request parameters
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic errors with custom messages
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AtelierError {
    /// Create a new generic error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new generic error with a message and source
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid report type error
    pub fn invalid_report_type(requested: impl Into<String>) -> Self {
        Self::InvalidReportType {
            requested: requested.into(),
        }
    }

    /// Create an invalid date range error
    pub fn invalid_date_range(message: impl Into<String>) -> Self {
        Self::InvalidDateRange {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error for a specific field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_creation() {
        let error = AtelierError::new("test error");
        assert!(error.to_string().contains("test error"));

        let error = AtelierError::config("bad settings");
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("bad settings"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let error = AtelierError::with_source("wrapper", io_error);

        assert!(error.to_string().contains("wrapper"));
        assert!(error.source().is_some());
        assert!(error.source().unwrap().to_string().contains("file missing"));
    }

    #[test]
    fn test_invalid_report_type() {
        let error = AtelierError::invalid_report_type("quarterly_magic");
        assert_eq!(
            error.to_string(),
            "Invalid report type: quarterly_magic"
        );
        assert!(matches!(
            error,
            AtelierError::InvalidReportType { requested } if requested == "quarterly_magic"
        ));
    }

    #[test]
    fn test_invalid_date_range() {
        let error = AtelierError::invalid_date_range("start is after end");
        assert_eq!(error.to_string(), "Invalid date range: start is after end");
    }

    #[test]
    fn test_validation_field() {
        let error = AtelierError::validation_field("must not be empty", "granularity");
        assert!(error.to_string().contains("must not be empty"));
        assert!(matches!(
            error,
            AtelierError::Validation { field: Some(f), .. } if f == "granularity"
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: AtelierError = io_error.into();
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let error: AtelierError = json_error.into();
        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_result_alias() {
        fn parses(input: &str) -> Result<u32> {
            input
                .parse()
                .map_err(|e| AtelierError::with_source("not a number", e))
        }

        assert_eq!(parses("42").unwrap(), 42);
        assert!(parses("nope").is_err());
    }
}
