//! Immutable record snapshots consumed by the reporting pipeline.
//!
//! These structs mirror the JSON documents the Atelier platform stores for
//! each workspace. The engine treats them as read-only input: composers
//! never mutate a record, so the same snapshot always yields the same
//! report.

use crate::types::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Common surface of revenue and expense line items.
///
/// Both sides of the ledger bucket and rank the same way, so the monetary
/// composers are generic over this trait.
pub trait MonetaryRecord {
    /// Gross value of the line item: net amount plus tax.
    fn effective_value(&self) -> f64;

    /// Date the line item applies to.
    fn record_date(&self) -> NaiveDate;

    /// Category label, if one was assigned.
    fn category(&self) -> Option<&str>;

    /// Canonical status label used in breakdowns.
    fn status_label(&self) -> &'static str;
}

/// Lifecycle state of a revenue line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevenueStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl RevenueStatus {
    /// Canonical label, matching the platform's stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sent => "SENT",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Lifecycle state of an expense line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl ExpenseStatus {
    /// Canonical label, matching the platform's stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Paid => "PAID",
            Self::Rejected => "REJECTED",
        }
    }
}

/// A revenue line item (invoice or recorded payment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub id: EntityId,
    /// Net amount before tax.
    pub amount: f64,
    /// Tax portion, non-negative.
    #[serde(default)]
    pub tax_amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    pub status: RevenueStatus,
    #[serde(default)]
    pub client_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
}

impl MonetaryRecord for RevenueRecord {
    fn effective_value(&self) -> f64 {
        self.amount + self.tax_amount
    }

    fn record_date(&self) -> NaiveDate {
        self.date
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

/// An expense line item submitted against the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: EntityId,
    /// Net amount before tax.
    pub amount: f64,
    /// Tax portion, non-negative.
    #[serde(default)]
    pub tax_amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub client_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    /// Member who submitted the expense.
    #[serde(default)]
    pub user_id: Option<EntityId>,
}

impl MonetaryRecord for ExpenseRecord {
    fn effective_value(&self) -> f64 {
        self.amount + self.tax_amount
    }

    fn record_date(&self) -> NaiveDate {
        self.date
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Cancelled,
}

impl TaskStatus {
    /// Canonical label, matching the platform's stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the task still counts toward a member's active workload.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Review)
    }
}

/// Priority assigned to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Every priority, in escalation order. Histograms seed all four keys
    /// so empty buckets still appear with a zero count.
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Canonical label, matching the platform's stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// A single tracked block of working time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRecord {
    pub id: EntityId,
    /// Hours tracked, non-negative.
    pub hours: f64,
    pub date: NaiveDate,
    /// Member who tracked the time.
    #[serde(default)]
    pub user_id: Option<EntityId>,
    /// Task the time was tracked against.
    #[serde(default)]
    pub task_id: Option<EntityId>,
}

/// A unit of work assigned within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: EntityId,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
    /// Time tracked directly against this task.
    #[serde(default)]
    pub time_entries: Vec<TimeEntryRecord>,
}

impl TaskRecord {
    /// Total hours tracked against this task.
    pub fn tracked_hours(&self) -> f64 {
        self.time_entries.iter().map(|entry| entry.hours).sum()
    }
}

/// A spending envelope covering a window of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: EntityId,
    pub name: String,
    /// Budgeted spend for the whole window.
    pub total_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// When set, only expenses on this project count against the budget.
    #[serde(default)]
    pub project_id: Option<EntityId>,
    /// When set, only expenses for this client count against the budget.
    #[serde(default)]
    pub client_id: Option<EntityId>,
    /// When non-empty, only expenses in these categories count.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A client engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub client_id: Option<EntityId>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ProjectRecord {
    /// Project duration in days, or 0 when either boundary is missing.
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 0,
        }
    }
}

/// A client the workspace bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: EntityId,
    pub name: String,
}

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: EntityId,
    pub name: String,
}
