//! Structured logging bootstrap for the Atelier analytics engine

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration for the engine
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON formatted logs
    pub json_format: bool,
    /// Emit human-readable multi-line logs
    pub pretty_format: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Include the emitting module target
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: true,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Diagnostics always go to stderr; composed reports are written to stdout
/// by the caller, and the two streams must not interleave.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).init();
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_writer(std::io::stderr);
        registry.with(layer).init();
    }

    Ok(())
}

/// Initialize logging with default settings
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (debug level, pretty output)
pub fn init_dev_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        pretty_format: true,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

/// Initialize logging for production (info level, JSON output)
pub fn init_prod_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig {
        level: "info".to_string(),
        json_format: true,
        pretty_format: false,
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.pretty_format);
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_logging_config_customization() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            json_format: true,
            pretty_format: false,
            ..LoggingConfig::default()
        };
        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert!(!config.pretty_format);
    }
}
