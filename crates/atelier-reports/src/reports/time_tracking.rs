//! Time tracking: tracked hours over time and across members and projects.

use crate::dimension::{safe_div, DimensionTotals};
use crate::period::{bucket_by_period, Granularity, PeriodBucket, WeekStart};
use atelier_common::{EntityId, MemberRecord, ProjectRecord, TaskRecord, TimeEntryRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Totals across every entry in the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingSummary {
    pub total_hours: f64,
    pub entry_count: u64,
    /// Mean hours per entry, 0 without entries.
    pub average_hours_per_entry: f64,
}

/// Composed time tracking report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingReport {
    /// Hours per period; bucket values are hours, counts are entries.
    pub time_series: Vec<PeriodBucket>,
    /// Hours per member name.
    pub by_user: BTreeMap<String, f64>,
    /// Hours per project name, resolved through each entry's task.
    pub by_project: BTreeMap<String, f64>,
    pub summary: TimeTrackingSummary,
}

/// Compose the time tracking report.
///
/// Project attribution walks entry to task to project; an entry whose
/// task or project link is missing lands under the unknown label.
pub fn time_tracking(
    entries: &[TimeEntryRecord],
    tasks: &[TaskRecord],
    projects: &[ProjectRecord],
    members: &[MemberRecord],
    granularity: Granularity,
    week_start: WeekStart,
) -> TimeTrackingReport {
    let time_series = bucket_by_period(
        entries,
        granularity,
        week_start,
        |entry| entry.date,
        |entry| entry.hours,
    );

    let member_names: HashMap<EntityId, &str> = members
        .iter()
        .map(|member| (member.id, member.name.as_str()))
        .collect();
    let task_projects: HashMap<EntityId, Option<EntityId>> = tasks
        .iter()
        .map(|task| (task.id, task.project_id))
        .collect();
    let project_names: HashMap<EntityId, &str> = projects
        .iter()
        .map(|project| (project.id, project.name.as_str()))
        .collect();

    let mut by_user = DimensionTotals::new();
    let mut by_project = DimensionTotals::new();

    for entry in entries {
        let user_name = entry
            .user_id
            .and_then(|id| member_names.get(&id).copied());
        by_user.add_or_unknown(user_name, entry.hours);

        let project_name = entry
            .task_id
            .and_then(|task_id| task_projects.get(&task_id).copied())
            .flatten()
            .and_then(|project_id| project_names.get(&project_id).copied());
        by_project.add_or_unknown(project_name, entry.hours);
    }

    let total_hours: f64 = entries.iter().map(|entry| entry.hours).sum();
    let entry_count = entries.len() as u64;

    TimeTrackingReport {
        time_series,
        by_user: by_user.into_map(),
        by_project: by_project.into_map(),
        summary: TimeTrackingSummary {
            total_hours,
            entry_count,
            average_hours_per_entry: safe_div(total_hours, entry_count as f64),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::test_utils::date;
    use atelier_common::utils::new_entity_id;
    use atelier_common::{TaskPriority, TaskStatus};
    use chrono::NaiveDate;

    fn entry(
        hours: f64,
        day: NaiveDate,
        user_id: Option<EntityId>,
        task_id: Option<EntityId>,
    ) -> TimeEntryRecord {
        TimeEntryRecord {
            id: new_entity_id(),
            hours,
            date: day,
            user_id,
            task_id,
        }
    }

    fn task_on_project(project_id: Option<EntityId>) -> TaskRecord {
        TaskRecord {
            id: new_entity_id(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assignee_id: None,
            project_id,
            due_date: None,
            created_at: date(2024, 1, 1),
            time_entries: Vec::new(),
        }
    }

    #[test]
    fn test_series_and_summary() {
        let entries = vec![
            entry(2.0, date(2024, 1, 8), None, None),
            entry(3.0, date(2024, 1, 8), None, None),
            entry(5.0, date(2024, 1, 9), None, None),
        ];

        let report = time_tracking(
            &entries,
            &[],
            &[],
            &[],
            Granularity::Day,
            WeekStart::Sunday,
        );

        assert_eq!(report.time_series.len(), 2);
        assert!((report.time_series[0].value - 5.0).abs() < f64::EPSILON);
        assert_eq!(report.time_series[0].count, 2);

        assert!((report.summary.total_hours - 10.0).abs() < f64::EPSILON);
        assert_eq!(report.summary.entry_count, 3);
        assert!((report.summary.average_hours_per_entry - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_grouped_by_member_name() {
        let mara = MemberRecord {
            id: new_entity_id(),
            name: "Mara".to_string(),
        };
        let entries = vec![
            entry(4.0, date(2024, 1, 8), Some(mara.id), None),
            entry(2.0, date(2024, 1, 9), Some(mara.id), None),
            entry(1.0, date(2024, 1, 9), None, None),
        ];

        let report = time_tracking(
            &entries,
            &[],
            &[],
            &[mara],
            Granularity::Day,
            WeekStart::Sunday,
        );

        assert!((report.by_user["Mara"] - 6.0).abs() < f64::EPSILON);
        assert!((report.by_user["Unknown"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_project_resolution_through_tasks() {
        let project = ProjectRecord {
            id: new_entity_id(),
            name: "Migration".to_string(),
            client_id: None,
            start_date: None,
            end_date: None,
        };
        let linked_task = task_on_project(Some(project.id));
        let orphan_task = task_on_project(None);

        let entries = vec![
            entry(3.0, date(2024, 1, 8), None, Some(linked_task.id)),
            entry(2.0, date(2024, 1, 8), None, Some(orphan_task.id)),
            entry(1.0, date(2024, 1, 8), None, Some(new_entity_id())),
            entry(0.5, date(2024, 1, 8), None, None),
        ];

        let report = time_tracking(
            &entries,
            &[linked_task, orphan_task],
            &[project],
            &[],
            Granularity::Day,
            WeekStart::Sunday,
        );

        assert!((report.by_project["Migration"] - 3.0).abs() < f64::EPSILON);
        // orphan task, unknown task id, and task-less entry all fall back
        assert!((report.by_project["Unknown"] - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_entries() {
        let report = time_tracking(&[], &[], &[], &[], Granularity::Day, WeekStart::Sunday);

        assert!(report.time_series.is_empty());
        assert!(report.by_user.is_empty());
        assert!((report.summary.average_hours_per_entry - 0.0).abs() < f64::EPSILON);
    }
}
