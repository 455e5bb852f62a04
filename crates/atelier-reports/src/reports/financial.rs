//! Financial trend: continuous monthly revenue/expense series plus a
//! linear forecast continuing past the end of the range.

use crate::dimension::safe_div;
use crate::forecast::{linear_forecast, ForecastPoint};
use crate::period::{month_key, month_keys_after, month_keys_between};
use crate::request::DateRange;
use atelier_common::{ExpenseRecord, MonetaryRecord, RevenueRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One month of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period_key: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Totals across the whole trend window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    /// Mean profit per month in the series, 0 for an empty series.
    pub average_monthly_profit: f64,
}

/// Composed financial trend report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTrendReport {
    /// One point per month in the range, months without records included
    /// with zero values.
    pub trend: Vec<TrendPoint>,
    /// Revenue projection continuing the trend, keyed by month.
    pub forecast: Vec<ForecastPoint>,
    pub summary: FinancialSummary,
}

/// Compose the financial trend report.
///
/// Unlike the bucketed series elsewhere, the trend synthesizes every month
/// between the range bounds so the chart has no gaps; the forecast then
/// extends the revenue line month by month.
pub fn financial_trend(
    revenues: &[RevenueRecord],
    expenses: &[ExpenseRecord],
    range: DateRange,
    forecast_periods: usize,
    confidence_floor: f64,
    confidence_decay: f64,
) -> FinancialTrendReport {
    let mut months: BTreeMap<String, (f64, f64)> = month_keys_between(range.from, range.to)
        .into_iter()
        .map(|key| (key, (0.0, 0.0)))
        .collect();

    for revenue in revenues {
        if let Some(slot) = months.get_mut(&month_key(revenue.record_date())) {
            slot.0 += revenue.effective_value();
        }
    }
    for expense in expenses {
        if let Some(slot) = months.get_mut(&month_key(expense.record_date())) {
            slot.1 += expense.effective_value();
        }
    }

    let trend: Vec<TrendPoint> = months
        .into_iter()
        .map(|(period_key, (revenue, expenses))| TrendPoint {
            period_key,
            revenue,
            expenses,
            profit: revenue - expenses,
        })
        .collect();

    let revenue_history: Vec<f64> = trend.iter().map(|point| point.revenue).collect();
    let mut forecast = linear_forecast(
        &revenue_history,
        forecast_periods,
        confidence_floor,
        confidence_decay,
    );
    for (point, key) in forecast
        .iter_mut()
        .zip(month_keys_after(range.to, forecast_periods))
    {
        point.period_key = Some(key);
    }

    let total_revenue: f64 = trend.iter().map(|point| point.revenue).sum();
    let total_expenses: f64 = trend.iter().map(|point| point.expenses).sum();
    let total_profit = total_revenue - total_expenses;

    FinancialTrendReport {
        forecast,
        summary: FinancialSummary {
            total_revenue,
            total_expenses,
            total_profit,
            average_monthly_profit: safe_div(total_profit, trend.len() as f64),
        },
        trend,
    }
}
