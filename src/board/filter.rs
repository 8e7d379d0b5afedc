//! Order-stable filter chain and total stable sort for task lists.
//!
//! Filters run in a fixed sequence, each independently toggleable, and
//! never reorder the tasks they keep. The sort comparator is a total
//! order: missing values substitute a documented per-field floor and
//! equal keys tie-break on task ID, so repeated sorts of the same input
//! always produce the same output.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Task};

/// The caller's access role, used when resolving the assignee filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Restricted role: always scoped to their own tasks.
    Member,
    /// Full visibility across assignees.
    Manager,
}

/// Resolves which user ID the assignee filter targets.
///
/// An explicit selection always wins; otherwise a member role is forced
/// onto the session user's own tasks; otherwise no assignee filter. The
/// session user arrives as an explicit argument — the engine never
/// reaches into ambient session storage.
#[must_use]
pub fn resolve_assignee_filter(
    selected: Option<u64>,
    role: Role,
    session_user: Option<u64>,
) -> Option<u64> {
    match (selected, role) {
        (Some(id), _) => Some(id),
        (None, Role::Member) => session_user,
        (None, Role::Manager) => None,
    }
}

/// Active filters. Default is "everything except completed tasks".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    /// Keep tasks whose team set contains this team.
    pub team_id: Option<u64>,
    /// Keep tasks whose assignee set contains this user.
    pub assignee_id: Option<u64>,
    /// Keep tasks with exactly this priority.
    pub priority: Option<Priority>,
    /// Include terminal completed tasks.
    pub show_completed: bool,
}

/// Applies the filter chain, preserving input order.
#[must_use]
pub fn apply_filters(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| filters.team_id.is_none_or(|team| t.team_ids.contains(&team)))
        .filter(|t| filters.assignee_id.is_none_or(|user| t.is_assigned_to(user)))
        .filter(|t| filters.priority.is_none_or(|p| t.priority == p))
        .filter(|t| filters.show_completed || !t.status.is_completed())
        .cloned()
        .collect()
}

/// Caller-selectable sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Task title, case-insensitive.
    Title,
    /// Project name, case-insensitive; tasks without a project sort as
    /// the empty string.
    Project,
    /// First assignee's name, case-insensitive; unassigned tasks sort as
    /// the empty string.
    Assignee,
    /// Priority rank, low to high ascending.
    Priority,
    /// Status rank in the fixed workflow order.
    Status,
    /// Due day; tasks without a due date sort as the day floor.
    Due,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}

/// Sorts tasks in place by the selected field and direction.
///
/// The direction reverses only the field comparison; the task-ID
/// tie-break stays ascending either way, keeping the order total and
/// repeatable.
pub fn sort_tasks(tasks: &mut [Task], field: SortField, direction: SortDirection) {
    tasks.sort_by(|a, b| {
        let ord = compare_field(a, b, field);
        let ord = match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    });
}

fn compare_field(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::Title => ci_cmp(&a.title, &b.title),
        SortField::Project => {
            ci_cmp(project_name(a), project_name(b))
        }
        SortField::Assignee => ci_cmp(a.primary_assignee_name(), b.primary_assignee_name()),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Status => a.status.rank().cmp(&b.status.rank()),
        SortField::Due => {
            let floor = NaiveDate::MIN;
            a.due_day().unwrap_or(floor).cmp(&b.due_day().unwrap_or(floor))
        }
    }
}

fn project_name(task: &Task) -> &str {
    task.project.as_ref().map_or("", |p| p.name.as_str())
}

fn ci_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
