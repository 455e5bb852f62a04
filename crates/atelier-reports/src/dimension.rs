//! Dimension aggregation: grouped totals, guarded rates, and ranked entries.
//!
//! Grouping remembers first-seen label order. Ranking uses a stable
//! descending sort, so labels with equal totals keep the order in which
//! they first appeared in the input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;

/// Label used when a record is missing a dimension value.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Percentage with a zero-denominator guard.
///
/// Returns exactly 0 when the denominator is 0, never NaN or infinity.
pub fn safe_rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Division with a zero-denominator guard.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// One ranked entry in a top-N breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntry {
    pub label: String,
    pub value: f64,
}

/// Per-label accumulator that remembers first-seen label order.
#[derive(Debug, Clone)]
pub struct GroupedTotals<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

/// Monetary totals grouped by a dimension label.
pub type DimensionTotals = GroupedTotals<f64>;

/// Record counts grouped by a dimension label.
pub type DimensionCounts = GroupedTotals<u64>;

impl<V> Default for GroupedTotals<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Copy + Default + AddAssign> GroupedTotals<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under `label`, creating the label on first sight.
    pub fn add(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.index.get(&label) {
            Some(&position) => self.entries[position].1 += value,
            None => {
                self.index.insert(label.clone(), self.entries.len());
                self.entries.push((label, value));
            }
        }
    }

    /// Add under the dimension label, falling back to [`UNKNOWN_LABEL`]
    /// when the record carries no usable value.
    pub fn add_or_unknown(&mut self, label: Option<&str>, value: V) {
        match label {
            Some(label) if !label.is_empty() => self.add(label, value),
            _ => self.add(UNKNOWN_LABEL, value),
        }
    }

    pub fn get(&self, label: &str) -> Option<V> {
        self.index.get(label).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label-ordered map for report output.
    pub fn into_map(self) -> BTreeMap<String, V> {
        self.entries.into_iter().collect()
    }
}

impl GroupedTotals<f64> {
    /// Sum across all labels.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Ranked top `limit` entries, descending by value.
    ///
    /// The sort is stable, so ties keep first-seen order.
    pub fn top(&self, limit: usize) -> Vec<TopEntry> {
        let mut ranked: Vec<TopEntry> = self
            .entries
            .iter()
            .map(|(label, value)| TopEntry {
                label: label.clone(),
                value: *value,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }
}

impl GroupedTotals<u64> {
    /// Count one occurrence of `label`.
    pub fn increment(&mut self, label: impl Into<String>) {
        self.add(label, 1);
    }

    /// Count one occurrence, falling back to [`UNKNOWN_LABEL`].
    pub fn increment_or_unknown(&mut self, label: Option<&str>) {
        self.add_or_unknown(label, 1);
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}
