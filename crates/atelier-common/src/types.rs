//! Common type aliases used across the Atelier analytics engine

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique identifier for platform entities (clients, projects, members, records)
pub type EntityId = Uuid;

/// Timestamp type used throughout the engine
pub type Timestamp = DateTime<Utc>;
