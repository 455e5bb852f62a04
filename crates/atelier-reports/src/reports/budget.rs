//! Budget variance: actual spend against budgeted envelopes, with a
//! burn-rate projection to the end of each budget window.

use crate::dimension::safe_rate;
use atelier_common::{BudgetRecord, EntityId, ExpenseRecord, MonetaryRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Traffic-light classification of a budget, derived from utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    OnTrack,
    AtRisk,
    OverBudget,
}

impl BudgetStatus {
    /// Classify a utilization percentage.
    pub fn from_utilization(utilization_rate: f64) -> Self {
        if utilization_rate > 100.0 {
            Self::OverBudget
        } else if utilization_rate > 80.0 {
            Self::AtRisk
        } else {
            Self::OnTrack
        }
    }
}

/// Per-budget variance metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVarianceRow {
    pub budget_id: EntityId,
    pub name: String,
    pub total_amount: f64,
    /// Gross spend matched against the budget so far.
    pub actual_spent: f64,
    /// Remaining headroom; negative when overspent.
    pub variance: f64,
    /// Spend as a percent of the budgeted amount.
    pub utilization_rate: f64,
    pub is_over_budget: bool,
    /// Average spend per elapsed day of the budget window.
    pub daily_burn_rate: f64,
    /// Expected additional spend over the remaining days at the current burn.
    pub projected_spend: f64,
    /// How far the projection lands past the budget, never negative.
    pub projected_overrun: f64,
    pub status: BudgetStatus,
}

/// Aggregate variance across all listed budgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVarianceSummary {
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub total_variance: f64,
    pub over_budget_count: u64,
}

/// Composed budget variance report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVarianceReport {
    pub budgets: Vec<BudgetVarianceRow>,
    pub summary: BudgetVarianceSummary,
}

/// Whether an expense counts against a budget.
///
/// The expense must fall inside the budget window and match every scoping
/// dimension the budget sets: project, client, and category list.
fn expense_matches(budget: &BudgetRecord, expense: &ExpenseRecord) -> bool {
    if expense.date < budget.start_date || expense.date > budget.end_date {
        return false;
    }
    if budget.project_id.is_some() && expense.project_id != budget.project_id {
        return false;
    }
    if budget.client_id.is_some() && expense.client_id != budget.client_id {
        return false;
    }
    if !budget.categories.is_empty() {
        match expense.category.as_deref() {
            Some(category) => {
                if !budget.categories.iter().any(|c| c == category) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Compose the budget variance report as of a reference date.
///
/// `as_of` anchors the burn-rate math: elapsed days are counted from the
/// window start to `as_of`, remaining days from `as_of` to the window end.
pub fn budget_variance(
    budgets: &[BudgetRecord],
    expenses: &[ExpenseRecord],
    as_of: NaiveDate,
) -> BudgetVarianceReport {
    let mut rows = Vec::with_capacity(budgets.len());
    let mut total_budgeted = 0.0f64;
    let mut total_spent = 0.0f64;
    let mut over_budget_count = 0u64;

    for budget in budgets {
        let actual_spent: f64 = expenses
            .iter()
            .filter(|expense| expense_matches(budget, expense))
            .map(MonetaryRecord::effective_value)
            .sum();

        let variance = budget.total_amount - actual_spent;
        let utilization_rate = safe_rate(actual_spent, budget.total_amount);
        let is_over_budget = actual_spent > budget.total_amount;

        let days_elapsed = (as_of - budget.start_date).num_days().max(1);
        let days_remaining = (budget.end_date - as_of).num_days().max(0);
        let daily_burn_rate = actual_spent / days_elapsed as f64;
        let projected_spend = daily_burn_rate * days_remaining as f64;
        let projected_overrun =
            (actual_spent + projected_spend - budget.total_amount).max(0.0);

        total_budgeted += budget.total_amount;
        total_spent += actual_spent;
        if is_over_budget {
            over_budget_count += 1;
        }

        rows.push(BudgetVarianceRow {
            budget_id: budget.id,
            name: budget.name.clone(),
            total_amount: budget.total_amount,
            actual_spent,
            variance,
            utilization_rate,
            is_over_budget,
            daily_burn_rate,
            projected_spend,
            projected_overrun,
            status: BudgetStatus::from_utilization(utilization_rate),
        });
    }

    BudgetVarianceReport {
        summary: BudgetVarianceSummary {
            total_budgeted,
            total_spent,
            total_variance: total_budgeted - total_spent,
            over_budget_count,
        },
        budgets: rows,
    }
}
