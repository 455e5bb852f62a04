//! Settings loading: YAML files, search paths, and environment overrides

use crate::settings::AnalyticsSettings;
use atelier_common::{AtelierError, Result as AtelierResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML settings: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Settings validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for AtelierError {
    fn from(err: ConfigError) -> Self {
        AtelierError::config(err.to_string())
    }
}

/// Settings loader with environment variable override support
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a specific file, apply environment overrides,
    /// and validate the result.
    pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AnalyticsSettings, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings: AnalyticsSettings = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut settings)?;
        settings.validate_all()?;

        debug!(path = %path.as_ref().display(), "settings loaded");
        Ok(settings)
    }

    /// Load settings from the default locations.
    ///
    /// Checks `ATELIER_CONFIG_PATH`, then `atelier.yaml` and `atelier.yml`
    /// in the working directory, and finally falls back to defaults with
    /// environment overrides applied.
    pub fn load() -> AtelierResult<AnalyticsSettings> {
        let settings = if let Ok(path) = env::var("ATELIER_CONFIG_PATH") {
            Self::load_settings(&path)?
        } else if Path::new("atelier.yaml").exists() {
            Self::load_settings("atelier.yaml")?
        } else if Path::new("atelier.yml").exists() {
            Self::load_settings("atelier.yml")?
        } else {
            let mut settings = AnalyticsSettings::default();
            Self::apply_env_overrides(&mut settings)?;
            settings.validate_all().map_err(ConfigError::ValidationError)?;
            settings
        };

        Ok(settings)
    }

    /// Load settings from an explicit file path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AtelierResult<AnalyticsSettings> {
        Ok(Self::load_settings(path)?)
    }

    /// Apply `ATELIER_*` environment variable overrides.
    fn apply_env_overrides(settings: &mut AnalyticsSettings) -> Result<(), ConfigError> {
        if let Ok(value) = env::var("ATELIER_TOP_LIMIT") {
            settings.report.top_limit =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_TOP_LIMIT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(value) = env::var("ATELIER_FORECAST_PERIODS") {
            settings.report.forecast_periods =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_FORECAST_PERIODS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(value) = env::var("ATELIER_CONFIDENCE_FLOOR") {
            settings.report.confidence_floor =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_CONFIDENCE_FLOOR".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(value) = env::var("ATELIER_CONFIDENCE_DECAY") {
            settings.report.confidence_decay =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_CONFIDENCE_DECAY".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(value) = env::var("ATELIER_WORKDAY_HOURS") {
            settings.report.workday_hours =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_WORKDAY_HOURS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(value) = env::var("ATELIER_WEEK_START") {
            settings.report.week_start = value;
        }

        if let Ok(value) = env::var("ATELIER_LOG_LEVEL") {
            settings.logging.level = value;
        }

        if let Ok(value) = env::var("ATELIER_LOG_JSON") {
            settings.logging.json =
                value.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "ATELIER_LOG_JSON".to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }
}
