//! Loading of JSON workspace snapshots from disk.

use atelier_common::Result;
use atelier_reports::RecordSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse a workspace snapshot.
///
/// The snapshot is one JSON document holding every record collection;
/// absent collections default to empty, so partial exports load fine.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    let contents = fs::read_to_string(path.as_ref())?;
    let snapshot: RecordSet = serde_json::from_str(&contents)?;

    debug!(
        revenues = snapshot.revenues.len(),
        expenses = snapshot.expenses.len(),
        tasks = snapshot.tasks.len(),
        time_entries = snapshot.time_entries.len(),
        budgets = snapshot.budgets.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
