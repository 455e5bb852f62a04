//! Custom validation functions for settings fields

use validator::ValidationError;

/// Accepted week start labels for weekly bucketing
pub fn validate_week_start(value: &str) -> Result<(), ValidationError> {
    match value {
        "sunday" | "monday" => Ok(()),
        _ => Err(ValidationError::new("invalid_week_start")),
    }
}

/// Accepted tracing level labels
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}
