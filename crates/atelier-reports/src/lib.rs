//! # Atelier Reports
//!
//! The report composition pipeline of the Atelier analytics engine.
//!
//! Reports are produced in four deterministic stages: a [`source::RecordSource`]
//! supplies pre-filtered record snapshots, the [`period`] module folds dated
//! records into ordered time buckets, the [`dimension`] module reduces them
//! into grouped and ranked metrics, and a composer in [`reports`] assembles
//! the final result for one report kind. The [`engine::ReportEngine`] facade
//! drives the whole flow; its composition core is pure, so identical inputs
//! always produce identical reports.

pub mod dimension;
pub mod engine;
pub mod forecast;
pub mod period;
pub mod reports;
pub mod request;
pub mod source;

pub use engine::ReportEngine;
pub use forecast::ForecastPoint;
pub use period::{Granularity, PeriodBucket, WeekStart};
pub use reports::ReportResult;
pub use request::{DateRange, FilterSet, RangePreset, ReportKind, ReportRequest};
pub use source::{InMemorySource, RecordSet, RecordSource};
