//! # Atelier Config
//!
//! Settings management for the Atelier analytics engine: typed settings
//! structures, validation, and YAML loading with environment overrides.

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, SettingsLoader};
pub use settings::{AnalyticsSettings, LoggingSettings, ReportSettings};
