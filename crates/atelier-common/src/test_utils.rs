//! Shared test helpers for the Atelier workspace.
//!
//! Available to other crates through the `testing` feature.

use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging once for the whole test binary.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug. Output goes
/// through the test writer so it stays attached to the owning test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .init();
    });
}

/// Build a date fixture, panicking on invalid input (tests only).
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
