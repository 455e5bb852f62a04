//! Project performance: per-project task completion, hours, and duration.

use crate::dimension::{safe_div, safe_rate};
use atelier_common::{EntityId, ProjectRecord, TaskRecord, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-project performance metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPerformanceRow {
    pub project_id: EntityId,
    pub name: String,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// Percent of tasks completed, 0 for projects without tasks.
    pub completion_rate: f64,
    /// Hours tracked against the project's tasks.
    pub total_hours: f64,
    /// Days between project start and end, 0 when either is missing.
    pub duration_days: i64,
}

/// Aggregate metrics across all listed projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPerformanceSummary {
    pub total_projects: u64,
    /// Completion rate across every task attached to a listed project.
    pub overall_completion_rate: f64,
    /// Mean duration over projects with a known positive duration.
    pub average_duration_days: f64,
}

/// Composed project performance report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPerformanceReport {
    pub projects: Vec<ProjectPerformanceRow>,
    pub summary: ProjectPerformanceSummary,
}

/// Compose the project performance report.
pub fn project_performance(
    projects: &[ProjectRecord],
    tasks: &[TaskRecord],
) -> ProjectPerformanceReport {
    let mut tasks_by_project: HashMap<EntityId, Vec<&TaskRecord>> = HashMap::new();
    for task in tasks {
        if let Some(project_id) = task.project_id {
            tasks_by_project.entry(project_id).or_default().push(task);
        }
    }

    let mut rows = Vec::with_capacity(projects.len());
    let mut all_tasks = 0u64;
    let mut all_completed = 0u64;

    for project in projects {
        let project_tasks = tasks_by_project
            .get(&project.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let total_tasks = project_tasks.len() as u64;
        let completed_tasks = project_tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count() as u64;
        let total_hours: f64 = project_tasks.iter().map(|task| task.tracked_hours()).sum();

        all_tasks += total_tasks;
        all_completed += completed_tasks;

        rows.push(ProjectPerformanceRow {
            project_id: project.id,
            name: project.name.clone(),
            total_tasks,
            completed_tasks,
            completion_rate: safe_rate(completed_tasks as f64, total_tasks as f64),
            total_hours,
            duration_days: project.duration_days(),
        });
    }

    let durations: Vec<i64> = rows
        .iter()
        .map(|row| row.duration_days)
        .filter(|days| *days > 0)
        .collect();
    let average_duration_days = safe_div(
        durations.iter().sum::<i64>() as f64,
        durations.len() as f64,
    );

    ProjectPerformanceReport {
        summary: ProjectPerformanceSummary {
            total_projects: projects.len() as u64,
            overall_completion_rate: safe_rate(all_completed as f64, all_tasks as f64),
            average_duration_days,
        },
        projects: rows,
    }
}
