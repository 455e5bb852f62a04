//! Resource utilization: tracked hours measured against working-day
//! capacity for each member.

use crate::dimension::{safe_div, safe_rate};
use crate::period::working_days;
use crate::request::DateRange;
use atelier_common::{EntityId, MemberRecord, TaskRecord, TaskStatus, TimeEntryRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Utilization metrics for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUtilizationRow {
    pub user_id: EntityId,
    pub name: String,
    pub tracked_hours: f64,
    /// Working days in the range times the configured workday length.
    pub expected_hours: f64,
    /// Tracked over expected as a percentage, 0 when expected is 0.
    pub utilization_rate: f64,
    /// Assigned tasks still open (todo, in progress, or review).
    pub active_tasks: u64,
    pub completed_tasks: u64,
}

/// Totals across all member rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationSummary {
    pub total_members: u64,
    /// Mean of the per-member utilization rates, 0 without members.
    pub average_utilization_rate: f64,
    /// Hours tracked by listed members.
    pub total_tracked_hours: f64,
    /// Capacity every member is measured against in this range.
    pub expected_hours_per_member: f64,
}

/// Composed resource utilization report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUtilizationReport {
    pub members: Vec<MemberUtilizationRow>,
    pub summary: UtilizationSummary,
}

/// Compose the resource utilization report.
///
/// Capacity only counts Monday through Friday; a weekend-only range gives
/// every member zero expected hours and a guarded zero rate.
pub fn resource_utilization(
    members: &[MemberRecord],
    tasks: &[TaskRecord],
    entries: &[TimeEntryRecord],
    range: DateRange,
    workday_hours: f64,
) -> ResourceUtilizationReport {
    let expected_hours = f64::from(working_days(range.from, range.to)) * workday_hours;

    let mut hours_by_user: HashMap<EntityId, f64> = HashMap::new();
    for entry in entries {
        if let Some(user_id) = entry.user_id {
            *hours_by_user.entry(user_id).or_default() += entry.hours;
        }
    }

    let mut tasks_by_assignee: HashMap<EntityId, (u64, u64)> = HashMap::new();
    for task in tasks {
        if let Some(assignee_id) = task.assignee_id {
            let slot = tasks_by_assignee.entry(assignee_id).or_default();
            slot.0 += u64::from(task.status.is_open());
            slot.1 += u64::from(task.status == TaskStatus::Done);
        }
    }

    let rows: Vec<MemberUtilizationRow> = members
        .iter()
        .map(|member| {
            let tracked_hours = hours_by_user.get(&member.id).copied().unwrap_or(0.0);
            let (active_tasks, completed_tasks) = tasks_by_assignee
                .get(&member.id)
                .copied()
                .unwrap_or((0, 0));

            MemberUtilizationRow {
                user_id: member.id,
                name: member.name.clone(),
                tracked_hours,
                expected_hours,
                utilization_rate: safe_rate(tracked_hours, expected_hours),
                active_tasks,
                completed_tasks,
            }
        })
        .collect();

    let total_tracked_hours: f64 = rows.iter().map(|row| row.tracked_hours).sum();
    let rate_sum: f64 = rows.iter().map(|row| row.utilization_rate).sum();

    ResourceUtilizationReport {
        summary: UtilizationSummary {
            total_members: rows.len() as u64,
            average_utilization_rate: safe_div(rate_sum, rows.len() as f64),
            total_tracked_hours,
            expected_hours_per_member: expected_hours,
        },
        members: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::test_utils::date;
    use atelier_common::utils::new_entity_id;
    use atelier_common::{TaskPriority, TaskStatus};
    use chrono::NaiveDate;

    const WORKDAY_HOURS: f64 = 8.0;

    fn member(name: &str) -> MemberRecord {
        MemberRecord {
            id: new_entity_id(),
            name: name.to_string(),
        }
    }

    fn entry_for(user_id: EntityId, hours: f64, day: NaiveDate) -> TimeEntryRecord {
        TimeEntryRecord {
            id: new_entity_id(),
            hours,
            date: day,
            user_id: Some(user_id),
            task_id: None,
        }
    }

    fn task_for(assignee_id: EntityId, status: TaskStatus) -> TaskRecord {
        TaskRecord {
            id: new_entity_id(),
            status,
            priority: TaskPriority::Medium,
            assignee_id: Some(assignee_id),
            project_id: None,
            due_date: None,
            created_at: date(2024, 3, 1),
            time_entries: Vec::new(),
        }
    }

    fn full_week() -> DateRange {
        // 2024-03-03 (Sunday) through 2024-03-09 (Saturday): 5 working days
        DateRange::new(date(2024, 3, 3), date(2024, 3, 9)).expect("test range")
    }

    #[test]
    fn test_expected_hours_and_rate() {
        let lena = member("Lena");
        let entries = vec![
            entry_for(lena.id, 20.0, date(2024, 3, 4)),
            entry_for(lena.id, 10.0, date(2024, 3, 6)),
        ];

        let report = resource_utilization(&[lena], &[], &entries, full_week(), WORKDAY_HOURS);

        let row = &report.members[0];
        assert!((row.expected_hours - 40.0).abs() < f64::EPSILON);
        assert!((row.tracked_hours - 30.0).abs() < f64::EPSILON);
        assert!((row.utilization_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weekend_range_guards_rate() {
        let lena = member("Lena");
        let entries = vec![entry_for(lena.id, 4.0, date(2024, 3, 9))];
        let weekend = DateRange::new(date(2024, 3, 9), date(2024, 3, 10)).expect("test range");

        let report = resource_utilization(&[lena], &[], &entries, weekend, WORKDAY_HOURS);

        let row = &report.members[0];
        assert!((row.expected_hours - 0.0).abs() < f64::EPSILON);
        assert!((row.utilization_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_task_counts_by_status() {
        let theo = member("Theo");
        let tasks = vec![
            task_for(theo.id, TaskStatus::Todo),
            task_for(theo.id, TaskStatus::InProgress),
            task_for(theo.id, TaskStatus::Review),
            task_for(theo.id, TaskStatus::Done),
            task_for(theo.id, TaskStatus::Cancelled),
        ];

        let report = resource_utilization(&[theo], &tasks, &[], full_week(), WORKDAY_HOURS);

        let row = &report.members[0];
        assert_eq!(row.active_tasks, 3);
        assert_eq!(row.completed_tasks, 1);
    }

    #[test]
    fn test_summary_averages_member_rates() {
        let lena = member("Lena");
        let theo = member("Theo");
        let entries = vec![
            entry_for(lena.id, 40.0, date(2024, 3, 4)),
            entry_for(theo.id, 20.0, date(2024, 3, 4)),
        ];

        let report = resource_utilization(
            &[lena, theo],
            &[],
            &entries,
            full_week(),
            WORKDAY_HOURS,
        );

        assert_eq!(report.summary.total_members, 2);
        // rates are 100 and 50
        assert!((report.summary.average_utilization_rate - 75.0).abs() < f64::EPSILON);
        assert!((report.summary.total_tracked_hours - 60.0).abs() < f64::EPSILON);
        assert!((report.summary.expected_hours_per_member - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unlisted_user_hours_ignored() {
        let lena = member("Lena");
        let entries = vec![
            entry_for(lena.id, 8.0, date(2024, 3, 4)),
            entry_for(new_entity_id(), 99.0, date(2024, 3, 4)),
        ];

        let report = resource_utilization(&[lena], &[], &entries, full_week(), WORKDAY_HOURS);

        assert!((report.summary.total_tracked_hours - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_members() {
        let report = resource_utilization(&[], &[], &[], full_week(), WORKDAY_HOURS);

        assert!(report.members.is_empty());
        assert_eq!(report.summary.total_members, 0);
        assert!((report.summary.average_utilization_rate - 0.0).abs() < f64::EPSILON);
    }
}
