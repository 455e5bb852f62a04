//! Revenue and expense analysis.
//!
//! Both sides of the ledger share the same shape: an ordered time series
//! of gross values, a summary, and breakdowns by status and category. They
//! differ only in their ranked entries, which is why the core is generic
//! over [`MonetaryRecord`].

use crate::dimension::{safe_div, DimensionTotals, TopEntry};
use crate::period::{bucket_by_period, Granularity, PeriodBucket, WeekStart};
use atelier_common::{ClientRecord, EntityId, ExpenseRecord, MonetaryRecord, RevenueRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Totals for one side of the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetarySummary {
    /// Sum of gross values.
    pub total: f64,
    /// Mean gross value per record, 0 when there are no records.
    pub average: f64,
    /// Number of records in the window.
    pub count: u64,
}

/// Composed revenue analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub time_series: Vec<PeriodBucket>,
    pub summary: MonetarySummary,
    pub by_status: BTreeMap<String, f64>,
    pub by_category: BTreeMap<String, f64>,
    /// Clients ranked by gross revenue.
    pub top_clients: Vec<TopEntry>,
}

/// Composed expense analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub time_series: Vec<PeriodBucket>,
    pub summary: MonetarySummary,
    pub by_status: BTreeMap<String, f64>,
    pub by_category: BTreeMap<String, f64>,
    /// Categories ranked by gross spend.
    pub top_categories: Vec<TopEntry>,
}

struct MonetaryCore {
    time_series: Vec<PeriodBucket>,
    summary: MonetarySummary,
    by_status: BTreeMap<String, f64>,
    by_category: BTreeMap<String, f64>,
}

fn monetary_core<T: MonetaryRecord>(
    records: &[T],
    granularity: Granularity,
    week_start: WeekStart,
) -> MonetaryCore {
    let time_series = bucket_by_period(
        records,
        granularity,
        week_start,
        |r| r.record_date(),
        |r| r.effective_value(),
    );

    let total: f64 = records.iter().map(MonetaryRecord::effective_value).sum();
    let count = records.len() as u64;

    let mut by_status = DimensionTotals::new();
    let mut by_category = DimensionTotals::new();
    for record in records {
        by_status.add(record.status_label(), record.effective_value());
        by_category.add_or_unknown(record.category(), record.effective_value());
    }

    MonetaryCore {
        time_series,
        summary: MonetarySummary {
            total,
            average: safe_div(total, count as f64),
            count,
        },
        by_status: by_status.into_map(),
        by_category: by_category.into_map(),
    }
}

/// Compose the revenue analysis report.
pub fn revenue_analysis(
    revenues: &[RevenueRecord],
    clients: &[ClientRecord],
    granularity: Granularity,
    week_start: WeekStart,
    top_limit: usize,
) -> RevenueReport {
    let core = monetary_core(revenues, granularity, week_start);

    let client_names: HashMap<EntityId, &str> = clients
        .iter()
        .map(|client| (client.id, client.name.as_str()))
        .collect();

    let mut by_client = DimensionTotals::new();
    for revenue in revenues {
        let name = revenue
            .client_id
            .and_then(|id| client_names.get(&id).copied());
        by_client.add_or_unknown(name, revenue.effective_value());
    }

    RevenueReport {
        time_series: core.time_series,
        summary: core.summary,
        by_status: core.by_status,
        by_category: core.by_category,
        top_clients: by_client.top(top_limit),
    }
}

/// Compose the expense analysis report.
pub fn expense_analysis(
    expenses: &[ExpenseRecord],
    granularity: Granularity,
    week_start: WeekStart,
    top_limit: usize,
) -> ExpenseReport {
    let core = monetary_core(expenses, granularity, week_start);

    let mut by_category = DimensionTotals::new();
    for expense in expenses {
        by_category.add_or_unknown(expense.category.as_deref(), expense.effective_value());
    }

    ExpenseReport {
        time_series: core.time_series,
        summary: core.summary,
        by_status: core.by_status,
        by_category: core.by_category,
        top_categories: by_category.top(top_limit),
    }
}
