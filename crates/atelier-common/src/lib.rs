//! # Atelier Common
//!
//! Shared types, utilities, and common functionality for the Atelier
//! analytics engine.
//!
//! This crate provides the foundation the other workspace crates build on:
//! the engine-wide error type, entity identifiers, the immutable record
//! snapshots consumed by the reporting pipeline, and the logging bootstrap.

pub mod error;
pub mod logging;
pub mod records;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{AtelierError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use records::{
    BudgetRecord, ClientRecord, ExpenseRecord, ExpenseStatus, MemberRecord, MonetaryRecord,
    ProjectRecord, RevenueRecord, RevenueStatus, TaskPriority, TaskRecord, TaskStatus,
    TimeEntryRecord,
};
pub use types::{EntityId, Timestamp};
