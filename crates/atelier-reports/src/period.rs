//! Period bucketing: canonical period keys and ordered accumulation.
//!
//! Every dated record is assigned a string period key whose lexicographic
//! order matches chronological order. Folding records through a `BTreeMap`
//! keyed by those strings therefore yields an ascending time series without
//! a separate sort step.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time-series granularity for bucketed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Default for Granularity {
    fn default() -> Self {
        Self::Day
    }
}

impl Granularity {
    /// Canonical label for the granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

/// First day of the week used for weekly bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl Default for WeekStart {
    fn default() -> Self {
        Self::Sunday
    }
}

impl WeekStart {
    /// Parse a settings label into a week start.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sunday" => Some(Self::Sunday),
            "monday" => Some(Self::Monday),
            _ => None,
        }
    }

    fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// A single time bucket in a report series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Canonical period key; series are ordered by this key.
    pub period_key: String,
    /// Accumulated value for the period.
    pub value: f64,
    /// Number of records that contributed.
    pub count: u64,
}

/// Date of the most recent week-start day on or before `date`.
pub fn week_start_of(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let target = week_start.weekday().num_days_from_sunday();
    let offset = (7 + date.weekday().num_days_from_sunday() - target) % 7;
    date - Duration::days(i64::from(offset))
}

/// Calendar quarter (1 through 4) containing `date`.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// `YYYY-MM` key for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Canonical period key for a date under the given granularity.
///
/// Day and week keys are `YYYY-MM-DD` (weeks keyed by their start day),
/// months are `YYYY-MM`, quarters `YYYY-Qn`, years `YYYY`.
pub fn period_key(date: NaiveDate, granularity: Granularity, week_start: WeekStart) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => week_start_of(date, week_start)
            .format("%Y-%m-%d")
            .to_string(),
        Granularity::Month => month_key(date),
        Granularity::Quarter => format!("{}-Q{}", date.year(), quarter_of(date)),
        Granularity::Year => date.format("%Y").to_string(),
    }
}

/// Fold records into ordered period buckets.
///
/// Only periods that actually contain records appear; gaps are not filled.
pub fn bucket_by_period<T>(
    records: &[T],
    granularity: Granularity,
    week_start: WeekStart,
    date_fn: impl Fn(&T) -> NaiveDate,
    value_fn: impl Fn(&T) -> f64,
) -> Vec<PeriodBucket> {
    let mut buckets: BTreeMap<String, (f64, u64)> = BTreeMap::new();

    for record in records {
        let key = period_key(date_fn(record), granularity, week_start);
        let slot = buckets.entry(key).or_insert((0.0, 0));
        slot.0 += value_fn(record);
        slot.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(period_key, (value, count))| PeriodBucket {
            period_key,
            value,
            count,
        })
        .collect()
}

/// Every `YYYY-MM` key from the month of `from` through the month of `to`.
///
/// Returns an empty list when `from` is in a later month than `to`.
pub fn month_keys_between(from: NaiveDate, to: NaiveDate) -> Vec<String> {
    let mut keys = Vec::new();
    let (mut year, mut month) = (from.year(), from.month());

    while (year, month) <= (to.year(), to.month()) {
        keys.push(format!("{year:04}-{month:02}"));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    keys
}

/// `count` month keys continuing after the month containing `last`.
pub fn month_keys_after(last: NaiveDate, count: usize) -> Vec<String> {
    let mut keys = Vec::with_capacity(count);
    let (mut year, mut month) = (last.year(), last.month());

    for _ in 0..count {
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
        keys.push(format!("{year:04}-{month:02}"));
    }

    keys
}

/// Number of Monday through Friday days in the inclusive range.
pub fn working_days(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut days = 0;
    let mut current = from;

    while current <= to {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days += 1;
        }
        current += Duration::days(1);
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::test_utils::date;

    #[test]
    fn test_day_key() {
        assert_eq!(
            period_key(date(2024, 3, 5), Granularity::Day, WeekStart::Sunday),
            "2024-03-05"
        );
    }

    #[test]
    fn test_week_key_sunday_start() {
        // 2024-03-05 is a Tuesday; the preceding Sunday is 2024-03-03
        assert_eq!(
            period_key(date(2024, 3, 5), Granularity::Week, WeekStart::Sunday),
            "2024-03-03"
        );
        // a Sunday keys its own week
        assert_eq!(
            period_key(date(2024, 3, 3), Granularity::Week, WeekStart::Sunday),
            "2024-03-03"
        );
    }

    #[test]
    fn test_week_key_monday_start() {
        assert_eq!(
            period_key(date(2024, 3, 5), Granularity::Week, WeekStart::Monday),
            "2024-03-04"
        );
        // a Sunday belongs to the week started the previous Monday
        assert_eq!(
            period_key(date(2024, 3, 10), Granularity::Week, WeekStart::Monday),
            "2024-03-04"
        );
    }

    #[test]
    fn test_month_quarter_year_keys() {
        let d = date(2024, 3, 31);
        assert_eq!(period_key(d, Granularity::Month, WeekStart::Sunday), "2024-03");
        assert_eq!(period_key(d, Granularity::Quarter, WeekStart::Sunday), "2024-Q1");
        assert_eq!(period_key(d, Granularity::Year, WeekStart::Sunday), "2024");
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(quarter_of(date(2024, 1, 1)), 1);
        assert_eq!(quarter_of(date(2024, 3, 31)), 1);
        assert_eq!(quarter_of(date(2024, 4, 1)), 2);
        assert_eq!(quarter_of(date(2024, 9, 30)), 3);
        assert_eq!(quarter_of(date(2024, 12, 31)), 4);
    }

    #[test]
    fn test_bucket_accumulates_and_orders() {
        let records = vec![
            (date(2024, 1, 3), 10.0),
            (date(2024, 1, 1), 5.0),
            (date(2024, 1, 3), 2.5),
        ];

        let buckets = bucket_by_period(
            &records,
            Granularity::Day,
            WeekStart::Sunday,
            |r| r.0,
            |r| r.1,
        );

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].period_key, "2024-01-01");
        assert!((buckets[0].value - 5.0).abs() < f64::EPSILON);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].period_key, "2024-01-03");
        assert!((buckets[1].value - 12.5).abs() < f64::EPSILON);
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_bucket_empty_input() {
        let records: Vec<(NaiveDate, f64)> = Vec::new();
        let buckets = bucket_by_period(
            &records,
            Granularity::Month,
            WeekStart::Sunday,
            |r| r.0,
            |r| r.1,
        );
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_bucket_does_not_fill_gaps() {
        let records = vec![(date(2024, 1, 15), 1.0), (date(2024, 4, 15), 1.0)];
        let buckets = bucket_by_period(
            &records,
            Granularity::Month,
            WeekStart::Sunday,
            |r| r.0,
            |r| r.1,
        );

        let keys: Vec<&str> = buckets.iter().map(|b| b.period_key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-04"]);
    }

    #[test]
    fn test_month_keys_between_spans_year_boundary() {
        let keys = month_keys_between(date(2023, 11, 20), date(2024, 2, 3));
        assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_month_keys_between_single_month() {
        let keys = month_keys_between(date(2024, 6, 1), date(2024, 6, 30));
        assert_eq!(keys, vec!["2024-06"]);
    }

    #[test]
    fn test_month_keys_between_inverted_is_empty() {
        assert!(month_keys_between(date(2024, 6, 1), date(2024, 5, 1)).is_empty());
    }

    #[test]
    fn test_month_keys_after_rolls_over_year() {
        let keys = month_keys_after(date(2024, 11, 12), 3);
        assert_eq!(keys, vec!["2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_working_days_full_week() {
        // 2024-03-03 (Sunday) through 2024-03-09 (Saturday)
        assert_eq!(working_days(date(2024, 3, 3), date(2024, 3, 9)), 5);
    }

    #[test]
    fn test_working_days_weekend_only() {
        assert_eq!(working_days(date(2024, 3, 9), date(2024, 3, 10)), 0);
    }

    #[test]
    fn test_working_days_single_weekday() {
        assert_eq!(working_days(date(2024, 3, 5), date(2024, 3, 5)), 1);
    }

    #[test]
    fn test_week_start_from_label() {
        assert_eq!(WeekStart::from_label("sunday"), Some(WeekStart::Sunday));
        assert_eq!(WeekStart::from_label("monday"), Some(WeekStart::Monday));
        assert_eq!(WeekStart::from_label("saturday"), None);
    }
}
