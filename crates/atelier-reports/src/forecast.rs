//! Linear projection over an ordered value series.

use serde::{Deserialize, Serialize};

/// A projected value with a decaying confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Continuation period key, when the series carries keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_key: Option<String>,
    /// Projected value, clamped at zero.
    pub value: f64,
    /// Confidence in the projection, between the configured floor and 1.
    pub confidence: f64,
}

/// Average per-period growth of a series: `(last - first) / (len - 1)`.
///
/// A series shorter than two points has no measurable growth.
pub fn average_growth(history: &[f64]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }
    let first = history[0];
    let last = history[history.len() - 1];
    (last - first) / (history.len() - 1) as f64
}

/// Project `periods` values past the end of `history`.
///
/// Projection `i` (1-based) extends the last observed value by `i` times
/// the average growth, clamped at zero. Confidence starts at `1 - decay`
/// and loses `decay` per period, never dropping below `floor`.
pub fn linear_forecast(history: &[f64], periods: usize, floor: f64, decay: f64) -> Vec<ForecastPoint> {
    let growth = average_growth(history);
    let last = history.last().copied().unwrap_or(0.0);

    (1..=periods)
        .map(|i| ForecastPoint {
            period_key: None,
            value: (last + growth * i as f64).max(0.0),
            confidence: (1.0 - decay * i as f64).max(floor),
        })
        .collect()
}
