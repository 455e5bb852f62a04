//! Settings structures for the Atelier analytics engine

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level settings for the analytics engine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Report composition tunables
    #[validate]
    pub report: ReportSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            report: ReportSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AnalyticsSettings {
    /// Validate the entire settings tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

/// Tunables applied during report composition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportSettings {
    /// Number of entries kept in ranked breakdowns such as top clients
    #[validate(range(min = 1, max = 100, message = "Top entry limit must be between 1 and 100"))]
    pub top_limit: usize,

    /// Number of periods projected by the financial forecast
    #[validate(range(min = 1, max = 24, message = "Forecast periods must be between 1 and 24"))]
    pub forecast_periods: usize,

    /// Lower bound applied to forecast confidence scores
    #[validate(range(
        min = 0.0,
        max = 1.0,
        message = "Confidence floor must be between 0.0 and 1.0"
    ))]
    pub confidence_floor: f64,

    /// Confidence lost per projected period
    #[validate(range(
        min = 0.0,
        max = 1.0,
        message = "Confidence decay must be between 0.0 and 1.0"
    ))]
    pub confidence_decay: f64,

    /// Hours a member is expected to track per working day
    #[validate(range(
        min = 1.0,
        max = 24.0,
        message = "Workday hours must be between 1.0 and 24.0"
    ))]
    pub workday_hours: f64,

    /// First day of the week used for weekly bucketing
    #[validate(custom(
        function = "crate::validation::validate_week_start",
        message = "Week start must be 'sunday' or 'monday'"
    ))]
    pub week_start: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_limit: 10,
            forecast_periods: 6,
            confidence_floor: 0.3,
            confidence_decay: 0.1,
            workday_hours: 8.0,
            week_start: "sunday".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Emit JSON formatted logs instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = AnalyticsSettings::default();
        assert!(settings.validate_all().is_ok());

        assert_eq!(settings.report.top_limit, 10);
        assert_eq!(settings.report.forecast_periods, 6);
        assert!((settings.report.confidence_floor - 0.3).abs() < f64::EPSILON);
        assert!((settings.report.confidence_decay - 0.1).abs() < f64::EPSILON);
        assert!((settings.report.workday_hours - 8.0).abs() < f64::EPSILON);
        assert_eq!(settings.report.week_start, "sunday");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_report_settings_rejects_out_of_range() {
        let mut settings = ReportSettings {
            top_limit: 0,
            ..ReportSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.top_limit = 101;
        assert!(settings.validate().is_err());

        settings.top_limit = 10;
        settings.confidence_floor = 1.5;
        assert!(settings.validate().is_err());

        settings.confidence_floor = 0.3;
        settings.workday_hours = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_week_start_labels() {
        let mut settings = ReportSettings::default();
        assert!(settings.validate().is_ok());

        settings.week_start = "monday".to_string();
        assert!(settings.validate().is_ok());

        settings.week_start = "tuesday".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logging_settings_rejects_unknown_level() {
        let settings = LoggingSettings {
            level: "verbose".to_string(),
            json: false,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_nested_validation_propagates() {
        let settings = AnalyticsSettings {
            report: ReportSettings {
                forecast_periods: 0,
                ..ReportSettings::default()
            },
            logging: LoggingSettings::default(),
        };
        assert!(settings.validate_all().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = AnalyticsSettings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let back: AnalyticsSettings = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(back.report.top_limit, settings.report.top_limit);
        assert_eq!(back.report.week_start, settings.report.week_start);
        assert_eq!(back.logging.level, settings.logging.level);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "report:\n  top_limit: 5\n";
        let settings: AnalyticsSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.report.top_limit, 5);
        assert_eq!(settings.report.forecast_periods, 6);
        assert_eq!(settings.logging.level, "info");
    }
}
