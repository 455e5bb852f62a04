//! Client profitability: revenue against expenses per client.

use crate::dimension::safe_rate;
use atelier_common::{ClientRecord, EntityId, ExpenseRecord, MonetaryRecord, RevenueRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-client profitability metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfitabilityRow {
    pub client_id: EntityId,
    pub name: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    /// Profit as a percent of revenue, 0 for clients without revenue.
    pub margin: f64,
}

/// Aggregate profitability across all listed clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfitabilitySummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub overall_margin: f64,
}

/// Composed client profitability report, rows ordered by profit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfitabilityReport {
    pub clients: Vec<ClientProfitabilityRow>,
    pub summary: ClientProfitabilitySummary,
}

/// Compose the client profitability report.
///
/// Only records attributed to a known client contribute; unattributed
/// revenue or spend has no client to land on.
pub fn client_profitability(
    clients: &[ClientRecord],
    revenues: &[RevenueRecord],
    expenses: &[ExpenseRecord],
) -> ClientProfitabilityReport {
    let mut revenue_by_client: HashMap<EntityId, f64> = HashMap::new();
    for revenue in revenues {
        if let Some(client_id) = revenue.client_id {
            *revenue_by_client.entry(client_id).or_insert(0.0) += revenue.effective_value();
        }
    }

    let mut expenses_by_client: HashMap<EntityId, f64> = HashMap::new();
    for expense in expenses {
        if let Some(client_id) = expense.client_id {
            *expenses_by_client.entry(client_id).or_insert(0.0) += expense.effective_value();
        }
    }

    let mut rows: Vec<ClientProfitabilityRow> = clients
        .iter()
        .map(|client| {
            let revenue = revenue_by_client.get(&client.id).copied().unwrap_or(0.0);
            let spent = expenses_by_client.get(&client.id).copied().unwrap_or(0.0);
            let profit = revenue - spent;

            ClientProfitabilityRow {
                client_id: client.id,
                name: client.name.clone(),
                revenue,
                expenses: spent,
                profit,
                margin: safe_rate(profit, revenue),
            }
        })
        .collect();

    // stable sort keeps the client table order for equal profits
    rows.sort_by(|a, b| {
        b.profit
            .partial_cmp(&a.profit)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_revenue: f64 = rows.iter().map(|row| row.revenue).sum();
    let total_expenses: f64 = rows.iter().map(|row| row.expenses).sum();
    let total_profit = total_revenue - total_expenses;

    ClientProfitabilityReport {
        summary: ClientProfitabilitySummary {
            total_revenue,
            total_expenses,
            total_profit,
            overall_margin: safe_rate(total_profit, total_revenue),
        },
        clients: rows,
    }
}
