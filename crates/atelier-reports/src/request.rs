//! Report requests: kinds, date ranges, presets, and dimension filters.

use crate::period::Granularity;
use atelier_common::{AtelierError, EntityId, Result};
use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every report the engine can compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    RevenueAnalysis,
    ExpenseAnalysis,
    ProjectPerformance,
    TeamProductivity,
    ClientProfitability,
    BudgetVariance,
    TimeTracking,
    TaskCompletion,
    FinancialTrend,
    ResourceUtilization,
}

impl ReportKind {
    /// Every kind, in presentation order.
    pub const ALL: [ReportKind; 10] = [
        Self::RevenueAnalysis,
        Self::ExpenseAnalysis,
        Self::ProjectPerformance,
        Self::TeamProductivity,
        Self::ClientProfitability,
        Self::BudgetVariance,
        Self::TimeTracking,
        Self::TaskCompletion,
        Self::FinancialTrend,
        Self::ResourceUtilization,
    ];

    /// Canonical request label for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RevenueAnalysis => "revenue_analysis",
            Self::ExpenseAnalysis => "expense_analysis",
            Self::ProjectPerformance => "project_performance",
            Self::TeamProductivity => "team_productivity",
            Self::ClientProfitability => "client_profitability",
            Self::BudgetVariance => "budget_variance",
            Self::TimeTracking => "time_tracking",
            Self::TaskCompletion => "task_completion",
            Self::FinancialTrend => "financial_trend",
            Self::ResourceUtilization => "resource_utilization",
        }
    }

    /// Human readable name for logs and UI surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RevenueAnalysis => "Revenue Analysis",
            Self::ExpenseAnalysis => "Expense Analysis",
            Self::ProjectPerformance => "Project Performance",
            Self::TeamProductivity => "Team Productivity",
            Self::ClientProfitability => "Client Profitability",
            Self::BudgetVariance => "Budget Variance",
            Self::TimeTracking => "Time Tracking",
            Self::TaskCompletion => "Task Completion",
            Self::FinancialTrend => "Financial Trend",
            Self::ResourceUtilization => "Resource Utilization",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = AtelierError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == value)
            .copied()
            .ok_or_else(|| AtelierError::invalid_report_type(value))
    }
}

/// An inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting windows that end before they start.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(AtelierError::invalid_date_range(format!(
                "start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// The widest possible window, for lookup fetches that must not be
    /// date-scoped.
    pub fn unbounded() -> Self {
        Self {
            from: NaiveDate::MIN,
            to: NaiveDate::MAX,
        }
    }

    /// Number of days in the window, inclusive of both endpoints.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// Named relative reporting windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePreset {
    #[serde(rename = "last_7_days")]
    LastSevenDays,
    #[serde(rename = "last_30_days")]
    LastThirtyDays,
    #[serde(rename = "last_90_days")]
    LastNinetyDays,
    #[serde(rename = "last_6_months")]
    LastSixMonths,
    #[serde(rename = "last_year")]
    LastYear,
}

impl RangePreset {
    /// Resolve the preset into a concrete window ending at `today`.
    ///
    /// Resolution is pure: the same `today` always yields the same range.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let from = match self {
            Self::LastSevenDays => today - Duration::days(7),
            Self::LastThirtyDays => today - Duration::days(30),
            Self::LastNinetyDays => today - Duration::days(90),
            Self::LastSixMonths => today
                .checked_sub_months(Months::new(6))
                .unwrap_or(NaiveDate::MIN),
            Self::LastYear => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        };
        DateRange { from, to: today }
    }

    /// Canonical request label for the preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastSevenDays => "last_7_days",
            Self::LastThirtyDays => "last_30_days",
            Self::LastNinetyDays => "last_90_days",
            Self::LastSixMonths => "last_6_months",
            Self::LastYear => "last_year",
        }
    }

    /// Human readable name for logs and UI surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LastSevenDays => "Last 7 days",
            Self::LastThirtyDays => "Last 30 days",
            Self::LastNinetyDays => "Last 90 days",
            Self::LastSixMonths => "Last 6 months",
            Self::LastYear => "Last year",
        }
    }
}

impl FromStr for RangePreset {
    type Err = AtelierError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "last_7_days" => Ok(Self::LastSevenDays),
            "last_30_days" => Ok(Self::LastThirtyDays),
            "last_90_days" => Ok(Self::LastNinetyDays),
            "last_6_months" => Ok(Self::LastSixMonths),
            "last_year" => Ok(Self::LastYear),
            other => Err(AtelierError::validation_field(
                format!("unknown range preset '{other}'"),
                "preset",
            )),
        }
    }
}

impl FromStr for Granularity {
    type Err = AtelierError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(AtelierError::validation_field(
                format!("unknown granularity '{other}'"),
                "granularity",
            )),
        }
    }
}

/// Dimension filters applied by the record source at fetch time.
///
/// `None` means the dimension is unconstrained. A set filter only matches
/// records that actually carry the dimension, so filtering on clients
/// excludes records without a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub clients: Option<Vec<EntityId>>,
    pub projects: Option<Vec<EntityId>>,
    pub users: Option<Vec<EntityId>>,
    pub categories: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub priorities: Option<Vec<String>>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.clients.is_none()
            && self.projects.is_none()
            && self.users.is_none()
            && self.categories.is_none()
            && self.statuses.is_none()
            && self.priorities.is_none()
    }
}

/// Everything needed to compose one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub kind: ReportKind,
    /// Explicit window; takes precedence over `preset`.
    #[serde(default)]
    pub range: Option<DateRange>,
    /// Named relative window, resolved against the caller's today.
    #[serde(default)]
    pub preset: Option<RangePreset>,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub filters: FilterSet,
}

impl ReportRequest {
    /// Request for `kind` with the default window and no filters.
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            range: None,
            preset: None,
            granularity: Granularity::default(),
            filters: FilterSet::default(),
        }
    }

    /// Resolve the concrete reporting window.
    ///
    /// An explicit range wins over a preset; with neither, the window
    /// defaults to the last 30 days ending at `today`. Explicit ranges are
    /// re-validated here because deserialized requests bypass
    /// [`DateRange::new`].
    pub fn resolve_range(&self, today: NaiveDate) -> Result<DateRange> {
        if let Some(range) = self.range {
            return DateRange::new(range.from, range.to);
        }
        if let Some(preset) = self.preset {
            return Ok(preset.resolve(today));
        }
        Ok(RangePreset::LastThirtyDays.resolve(today))
    }

    /// Soft checks surfaced as log warnings.
    ///
    /// Hard failures come from [`Self::resolve_range`]; nothing here stops
    /// composition.
    pub fn validation_warnings(&self, range: &DateRange, today: NaiveDate) -> Vec<String> {
        let mut warnings = Vec::new();

        if range.to > today {
            warnings.push(format!("date range ends in the future ({})", range.to));
        }
        if range.days() > 1096 {
            warnings.push(format!(
                "date range spans {} days; composition may be slow",
                range.days()
            ));
        }

        warnings
    }
}
