//! Task completion: how much of the tracked work actually gets finished.

use crate::dimension::{safe_rate, UNKNOWN_LABEL};
use crate::period::{bucket_by_period, Granularity, PeriodBucket, WeekStart};
use atelier_common::{EntityId, MemberRecord, TaskPriority, TaskRecord, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Completion tally for one slice of the task set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total: u64,
    pub completed: u64,
    /// Percentage of completed tasks, 0 when the slice is empty.
    pub completion_rate: f64,
}

impl CompletionStats {
    fn from_counts(total: u64, completed: u64) -> Self {
        Self {
            total,
            completed,
            completion_rate: safe_rate(completed as f64, total as f64),
        }
    }
}

/// Composed task completion report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionReport {
    /// Tasks created per period; value mirrors count.
    pub time_series: Vec<PeriodBucket>,
    /// Stats per priority label; all four priorities are always present.
    pub by_priority: BTreeMap<String, CompletionStats>,
    /// Stats per assignee name.
    pub by_assignee: BTreeMap<String, CompletionStats>,
    pub summary: CompletionStats,
}

/// Compose the task completion report.
///
/// A task counts as completed only in the `done` status; cancelled tasks
/// stay in the totals but never in the completed tally.
pub fn task_completion(
    tasks: &[TaskRecord],
    members: &[MemberRecord],
    granularity: Granularity,
    week_start: WeekStart,
) -> TaskCompletionReport {
    let time_series = bucket_by_period(
        tasks,
        granularity,
        week_start,
        |task| task.created_at,
        |_| 1.0,
    );

    let member_names: HashMap<EntityId, &str> = members
        .iter()
        .map(|member| (member.id, member.name.as_str()))
        .collect();

    let mut priority_counts: BTreeMap<String, (u64, u64)> = TaskPriority::ALL
        .iter()
        .map(|priority| (priority.as_str().to_string(), (0, 0)))
        .collect();
    let mut assignee_counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    let mut completed_total = 0u64;
    for task in tasks {
        let done = task.status == TaskStatus::Done;
        if done {
            completed_total += 1;
        }

        let priority_slot = priority_counts
            .entry(task.priority.as_str().to_string())
            .or_default();
        priority_slot.0 += 1;
        priority_slot.1 += u64::from(done);

        let assignee = task
            .assignee_id
            .and_then(|id| member_names.get(&id).copied())
            .unwrap_or(UNKNOWN_LABEL);
        let assignee_slot = assignee_counts.entry(assignee.to_string()).or_default();
        assignee_slot.0 += 1;
        assignee_slot.1 += u64::from(done);
    }

    let into_stats = |(label, (total, completed)): (String, (u64, u64))| {
        (label, CompletionStats::from_counts(total, completed))
    };

    TaskCompletionReport {
        time_series,
        by_priority: priority_counts.into_iter().map(into_stats).collect(),
        by_assignee: assignee_counts.into_iter().map(into_stats).collect(),
        summary: CompletionStats::from_counts(tasks.len() as u64, completed_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::test_utils::date;
    use atelier_common::utils::new_entity_id;
    use chrono::NaiveDate;

    fn task(
        status: TaskStatus,
        priority: TaskPriority,
        assignee_id: Option<EntityId>,
        created_at: NaiveDate,
    ) -> TaskRecord {
        TaskRecord {
            id: new_entity_id(),
            status,
            priority,
            assignee_id,
            project_id: None,
            due_date: None,
            created_at,
            time_entries: Vec::new(),
        }
    }

    #[test]
    fn test_overall_rate() {
        let tasks = vec![
            task(TaskStatus::Done, TaskPriority::High, None, date(2024, 2, 1)),
            task(TaskStatus::Done, TaskPriority::Low, None, date(2024, 2, 2)),
            task(
                TaskStatus::InProgress,
                TaskPriority::Medium,
                None,
                date(2024, 2, 3),
            ),
            task(
                TaskStatus::Cancelled,
                TaskPriority::Low,
                None,
                date(2024, 2, 4),
            ),
        ];

        let report = task_completion(&tasks, &[], Granularity::Day, WeekStart::Sunday);

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.completed, 2);
        assert!((report.summary.completion_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.time_series.len(), 4);
        assert_eq!(report.time_series[0].count, 1);
    }

    #[test]
    fn test_all_priorities_present() {
        let tasks = vec![task(
            TaskStatus::Done,
            TaskPriority::Urgent,
            None,
            date(2024, 2, 1),
        )];

        let report = task_completion(&tasks, &[], Granularity::Day, WeekStart::Sunday);

        assert_eq!(report.by_priority.len(), 4);
        assert_eq!(report.by_priority["urgent"].total, 1);
        assert_eq!(report.by_priority["urgent"].completed, 1);
        assert_eq!(report.by_priority["low"].total, 0);
        assert!((report.by_priority["low"].completion_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_assignee_breakdown() {
        let rio = MemberRecord {
            id: new_entity_id(),
            name: "Rio".to_string(),
        };
        let tasks = vec![
            task(
                TaskStatus::Done,
                TaskPriority::Medium,
                Some(rio.id),
                date(2024, 2, 1),
            ),
            task(
                TaskStatus::Todo,
                TaskPriority::Medium,
                Some(rio.id),
                date(2024, 2, 1),
            ),
            task(TaskStatus::Done, TaskPriority::Low, None, date(2024, 2, 2)),
        ];

        let report = task_completion(&tasks, &[rio], Granularity::Day, WeekStart::Sunday);

        let rio_stats = &report.by_assignee["Rio"];
        assert_eq!(rio_stats.total, 2);
        assert_eq!(rio_stats.completed, 1);
        assert!((rio_stats.completion_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.by_assignee["Unknown"].total, 1);
    }

    #[test]
    fn test_unresolvable_assignee_id() {
        let tasks = vec![task(
            TaskStatus::Done,
            TaskPriority::Medium,
            Some(new_entity_id()),
            date(2024, 2, 1),
        )];

        let report = task_completion(&tasks, &[], Granularity::Day, WeekStart::Sunday);

        assert_eq!(report.by_assignee["Unknown"].total, 1);
    }

    #[test]
    fn test_empty_tasks() {
        let report = task_completion(&[], &[], Granularity::Day, WeekStart::Sunday);

        assert!(report.time_series.is_empty());
        assert_eq!(report.summary.total, 0);
        assert!((report.summary.completion_rate - 0.0).abs() < f64::EPSILON);
        assert!(report.by_assignee.is_empty());
        // priority rows stay seeded even without tasks
        assert_eq!(report.by_priority.len(), 4);
    }
}
