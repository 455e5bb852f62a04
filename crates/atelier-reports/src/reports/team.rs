//! Team productivity: per-member task throughput and tracked hours.

use crate::dimension::{safe_div, safe_rate};
use atelier_common::{EntityId, MemberRecord, TaskPriority, TaskRecord, TaskStatus, TimeEntryRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-member productivity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProductivityRow {
    pub user_id: EntityId,
    pub name: String,
    /// Tasks assigned to the member.
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// Percent of assigned tasks completed, 0 without assignments.
    pub completion_rate: f64,
    /// Hours the member tracked in the window.
    pub total_hours: f64,
    /// Tracked hours per assigned task, 0 without assignments.
    pub average_hours_per_task: f64,
    /// Assigned tasks per priority; every priority appears, even at zero.
    pub tasks_by_priority: BTreeMap<String, u64>,
}

/// Aggregate metrics across the whole team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProductivitySummary {
    pub total_members: u64,
    /// Completion rate across every assigned task.
    pub overall_completion_rate: f64,
    /// Hours tracked by all members combined.
    pub total_hours: f64,
}

/// Composed team productivity report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProductivityReport {
    pub members: Vec<MemberProductivityRow>,
    pub summary: TeamProductivitySummary,
}

/// Compose the team productivity report.
///
/// Task ownership follows the assignee; tracked hours follow the entry
/// author. A member reviewing a colleague's task therefore contributes
/// hours without inheriting the task.
pub fn team_productivity(
    members: &[MemberRecord],
    tasks: &[TaskRecord],
    entries: &[TimeEntryRecord],
) -> TeamProductivityReport {
    let mut rows = Vec::with_capacity(members.len());
    let mut all_tasks = 0u64;
    let mut all_completed = 0u64;
    let mut all_hours = 0.0f64;

    for member in members {
        let assigned: Vec<&TaskRecord> = tasks
            .iter()
            .filter(|task| task.assignee_id == Some(member.id))
            .collect();

        let total_tasks = assigned.len() as u64;
        let completed_tasks = assigned
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count() as u64;

        let total_hours: f64 = entries
            .iter()
            .filter(|entry| entry.user_id == Some(member.id))
            .map(|entry| entry.hours)
            .sum();

        let mut tasks_by_priority: BTreeMap<String, u64> = TaskPriority::ALL
            .iter()
            .map(|priority| (priority.as_str().to_string(), 0))
            .collect();
        for task in &assigned {
            *tasks_by_priority
                .entry(task.priority.as_str().to_string())
                .or_insert(0) += 1;
        }

        all_tasks += total_tasks;
        all_completed += completed_tasks;
        all_hours += total_hours;

        rows.push(MemberProductivityRow {
            user_id: member.id,
            name: member.name.clone(),
            total_tasks,
            completed_tasks,
            completion_rate: safe_rate(completed_tasks as f64, total_tasks as f64),
            total_hours,
            average_hours_per_task: safe_div(total_hours, total_tasks as f64),
            tasks_by_priority,
        });
    }

    TeamProductivityReport {
        summary: TeamProductivitySummary {
            total_members: members.len() as u64,
            overall_completion_rate: safe_rate(all_completed as f64, all_tasks as f64),
            total_hours: all_hours,
        },
        members: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::test_utils::date;
    use atelier_common::utils::new_entity_id;

    fn member(name: &str) -> MemberRecord {
        MemberRecord {
            id: new_entity_id(),
            name: name.to_string(),
        }
    }

    fn task(assignee: Option<EntityId>, status: TaskStatus, priority: TaskPriority) -> TaskRecord {
        TaskRecord {
            id: new_entity_id(),
            status,
            priority,
            assignee_id: assignee,
            project_id: None,
            due_date: None,
            created_at: date(2024, 1, 1),
            time_entries: Vec::new(),
        }
    }

    fn entry(user: EntityId, hours: f64) -> TimeEntryRecord {
        TimeEntryRecord {
            id: new_entity_id(),
            hours,
            date: date(2024, 1, 5),
            user_id: Some(user),
            task_id: None,
        }
    }

    #[test]
    fn test_member_metrics() {
        let dana = member("Dana");
        let tasks = vec![
            task(Some(dana.id), TaskStatus::Done, TaskPriority::High),
            task(Some(dana.id), TaskStatus::InProgress, TaskPriority::High),
            task(Some(dana.id), TaskStatus::Done, TaskPriority::Low),
            task(None, TaskStatus::Done, TaskPriority::Urgent),
        ];
        let entries = vec![entry(dana.id, 5.0), entry(dana.id, 7.0)];

        let report = team_productivity(&[dana], &tasks, &entries);
        let row = &report.members[0];

        assert_eq!(row.total_tasks, 3);
        assert_eq!(row.completed_tasks, 2);
        assert!((row.completion_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((row.total_hours - 12.0).abs() < f64::EPSILON);
        assert!((row.average_hours_per_task - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_priority_histogram_seeds_all_buckets() {
        let lee = member("Lee");
        let tasks = vec![
            task(Some(lee.id), TaskStatus::Todo, TaskPriority::Urgent),
            task(Some(lee.id), TaskStatus::Todo, TaskPriority::Urgent),
        ];

        let report = team_productivity(&[lee], &tasks, &[]);
        let histogram = &report.members[0].tasks_by_priority;

        assert_eq!(histogram["urgent"], 2);
        assert_eq!(histogram["low"], 0);
        assert_eq!(histogram["medium"], 0);
        assert_eq!(histogram["high"], 0);
        assert_eq!(histogram.len(), 4);
    }

    #[test]
    fn test_member_without_tasks_keeps_zero_rates() {
        let idle = member("Idle");
        let entries = vec![entry(idle.id, 3.0)];

        let report = team_productivity(&[idle], &[], &entries);
        let row = &report.members[0];

        assert_eq!(row.total_tasks, 0);
        assert!((row.completion_rate - 0.0).abs() < f64::EPSILON);
        // hours still count even with no assigned tasks
        assert!((row.total_hours - 3.0).abs() < f64::EPSILON);
        assert!((row.average_hours_per_task - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_spans_members() {
        let ana = member("Ana");
        let ben = member("Ben");
        let tasks = vec![
            task(Some(ana.id), TaskStatus::Done, TaskPriority::Medium),
            task(Some(ben.id), TaskStatus::Todo, TaskPriority::Medium),
        ];
        let entries = vec![entry(ana.id, 2.0), entry(ben.id, 6.0)];

        let report = team_productivity(&[ana, ben], &tasks, &entries);

        assert_eq!(report.summary.total_members, 2);
        assert!((report.summary.overall_completion_rate - 50.0).abs() < f64::EPSILON);
        assert!((report.summary.total_hours - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_team() {
        let report = team_productivity(&[], &[], &[]);
        assert!(report.members.is_empty());
        assert_eq!(report.summary.total_members, 0);
        assert!((report.summary.overall_completion_rate - 0.0).abs() < f64::EPSILON);
    }
}
