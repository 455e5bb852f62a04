//! Record acquisition seam between storage and the composition pipeline.
//!
//! A [`RecordSource`] hands the engine snapshots that are already filtered
//! by date range and dimension filters. The engine trusts what it receives
//! and never re-filters, so every implementation must apply the same
//! matching rules [`InMemorySource`] does.

use crate::request::{DateRange, FilterSet};
use async_trait::async_trait;
use atelier_common::{
    BudgetRecord, ClientRecord, EntityId, ExpenseRecord, MemberRecord, ProjectRecord, Result,
    RevenueRecord, TaskRecord, TimeEntryRecord,
};
use serde::{Deserialize, Serialize};

/// Everything a single report invocation works from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSet {
    pub revenues: Vec<RevenueRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub tasks: Vec<TaskRecord>,
    pub time_entries: Vec<TimeEntryRecord>,
    pub budgets: Vec<BudgetRecord>,
    pub projects: Vec<ProjectRecord>,
    pub clients: Vec<ClientRecord>,
    pub members: Vec<MemberRecord>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.revenues.is_empty()
            && self.expenses.is_empty()
            && self.tasks.is_empty()
            && self.time_entries.is_empty()
            && self.budgets.is_empty()
            && self.projects.is_empty()
            && self.clients.is_empty()
            && self.members.is_empty()
    }
}

/// Storage-facing seam supplying pre-filtered record snapshots.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Revenue records dated within `range`, matching `filters`.
    async fn fetch_revenues(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<RevenueRecord>>;

    /// Expense records dated within `range`, matching `filters`.
    async fn fetch_expenses(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<ExpenseRecord>>;

    /// Tasks created within `range`, matching `filters`.
    async fn fetch_tasks(&self, range: &DateRange, filters: &FilterSet)
        -> Result<Vec<TaskRecord>>;

    /// Standalone time entries dated within `range`, matching `filters`.
    async fn fetch_time_entries(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<TimeEntryRecord>>;

    /// Budgets whose window overlaps `range`, matching `filters`.
    async fn fetch_budgets(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<BudgetRecord>>;

    /// Projects matching `filters`. Projects are dimension entities, so no
    /// date range applies.
    async fn fetch_projects(&self, filters: &FilterSet) -> Result<Vec<ProjectRecord>>;

    /// The client lookup table.
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>>;

    /// The member lookup table.
    async fn fetch_members(&self) -> Result<Vec<MemberRecord>>;
}

/// In-memory source over a pre-loaded snapshot, used by the CLI and tests.
///
/// Filtering happens here at fetch time, mirroring what a storage-backed
/// implementation would push into its queries.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: RecordSet,
}

impl InMemorySource {
    pub fn new(data: RecordSet) -> Self {
        Self { data }
    }

    fn matches_id(allowed: &Option<Vec<EntityId>>, id: Option<EntityId>) -> bool {
        match allowed {
            None => true,
            Some(ids) => id.map_or(false, |id| ids.contains(&id)),
        }
    }

    fn matches_label(allowed: &Option<Vec<String>>, label: Option<&str>) -> bool {
        match allowed {
            None => true,
            Some(labels) => label.map_or(false, |label| labels.iter().any(|l| l == label)),
        }
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch_revenues(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<RevenueRecord>> {
        Ok(self
            .data
            .revenues
            .iter()
            .filter(|r| range.contains(r.date))
            .filter(|r| Self::matches_id(&filters.clients, r.client_id))
            .filter(|r| Self::matches_id(&filters.projects, r.project_id))
            .filter(|r| Self::matches_label(&filters.categories, r.category.as_deref()))
            .filter(|r| Self::matches_label(&filters.statuses, Some(r.status.as_str())))
            .cloned()
            .collect())
    }

    async fn fetch_expenses(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .data
            .expenses
            .iter()
            .filter(|e| range.contains(e.date))
            .filter(|e| Self::matches_id(&filters.clients, e.client_id))
            .filter(|e| Self::matches_id(&filters.projects, e.project_id))
            .filter(|e| Self::matches_id(&filters.users, e.user_id))
            .filter(|e| Self::matches_label(&filters.categories, e.category.as_deref()))
            .filter(|e| Self::matches_label(&filters.statuses, Some(e.status.as_str())))
            .cloned()
            .collect())
    }

    async fn fetch_tasks(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<TaskRecord>> {
        Ok(self
            .data
            .tasks
            .iter()
            .filter(|t| range.contains(t.created_at))
            .filter(|t| Self::matches_id(&filters.projects, t.project_id))
            .filter(|t| Self::matches_id(&filters.users, t.assignee_id))
            .filter(|t| Self::matches_label(&filters.statuses, Some(t.status.as_str())))
            .filter(|t| Self::matches_label(&filters.priorities, Some(t.priority.as_str())))
            .cloned()
            .collect())
    }

    async fn fetch_time_entries(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<TimeEntryRecord>> {
        Ok(self
            .data
            .time_entries
            .iter()
            .filter(|e| range.contains(e.date))
            .filter(|e| Self::matches_id(&filters.users, e.user_id))
            .cloned()
            .collect())
    }

    async fn fetch_budgets(
        &self,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<Vec<BudgetRecord>> {
        Ok(self
            .data
            .budgets
            .iter()
            .filter(|b| b.start_date <= range.to && b.end_date >= range.from)
            .filter(|b| Self::matches_id(&filters.projects, b.project_id))
            .filter(|b| Self::matches_id(&filters.clients, b.client_id))
            .cloned()
            .collect())
    }

    async fn fetch_projects(&self, filters: &FilterSet) -> Result<Vec<ProjectRecord>> {
        Ok(self
            .data
            .projects
            .iter()
            .filter(|p| Self::matches_id(&filters.projects, Some(p.id)))
            .filter(|p| Self::matches_id(&filters.clients, p.client_id))
            .cloned()
            .collect())
    }

    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>> {
        Ok(self.data.clients.clone())
    }

    async fn fetch_members(&self) -> Result<Vec<MemberRecord>> {
        Ok(self.data.members.clone())
    }
}
