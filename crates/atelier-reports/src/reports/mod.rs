//! Report composers: one module per report family.
//!
//! Composers are pure functions from record snapshots to result structs.
//! They never fetch, never look at the clock, and never fail: an empty
//! snapshot composes into a report full of zeros.

pub mod budget;
pub mod client;
pub mod financial;
pub mod monetary;
pub mod project;
pub mod resource;
pub mod tasks;
pub mod team;
pub mod time_tracking;

pub use budget::{BudgetStatus, BudgetVarianceReport, BudgetVarianceRow};
pub use client::{ClientProfitabilityReport, ClientProfitabilityRow};
pub use financial::{FinancialTrendReport, TrendPoint};
pub use monetary::{ExpenseReport, MonetarySummary, RevenueReport};
pub use project::{ProjectPerformanceReport, ProjectPerformanceRow};
pub use resource::{MemberUtilizationRow, ResourceUtilizationReport};
pub use tasks::{CompletionStats, TaskCompletionReport};
pub use team::{MemberProductivityRow, TeamProductivityReport};
pub use time_tracking::TimeTrackingReport;

use crate::request::ReportKind;
use serde::{Deserialize, Serialize};

/// Composed result of one report invocation.
///
/// Serializes with a `reportType` tag carrying the request label, so
/// consumers can dispatch on the payload alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reportType", rename_all = "snake_case")]
pub enum ReportResult {
    RevenueAnalysis(RevenueReport),
    ExpenseAnalysis(ExpenseReport),
    ProjectPerformance(ProjectPerformanceReport),
    TeamProductivity(TeamProductivityReport),
    ClientProfitability(ClientProfitabilityReport),
    BudgetVariance(BudgetVarianceReport),
    TimeTracking(TimeTrackingReport),
    TaskCompletion(TaskCompletionReport),
    FinancialTrend(FinancialTrendReport),
    ResourceUtilization(ResourceUtilizationReport),
}

impl ReportResult {
    /// The report kind this result was composed for.
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::RevenueAnalysis(_) => ReportKind::RevenueAnalysis,
            Self::ExpenseAnalysis(_) => ReportKind::ExpenseAnalysis,
            Self::ProjectPerformance(_) => ReportKind::ProjectPerformance,
            Self::TeamProductivity(_) => ReportKind::TeamProductivity,
            Self::ClientProfitability(_) => ReportKind::ClientProfitability,
            Self::BudgetVariance(_) => ReportKind::BudgetVariance,
            Self::TimeTracking(_) => ReportKind::TimeTracking,
            Self::TaskCompletion(_) => ReportKind::TaskCompletion,
            Self::FinancialTrend(_) => ReportKind::FinancialTrend,
            Self::ResourceUtilization(_) => ReportKind::ResourceUtilization,
        }
    }
}
