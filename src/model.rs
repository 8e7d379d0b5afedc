//! Task data model shared by the pipeline, the board, and the store port.
//!
//! Enum variants carry the remote store's wire values (the Portuguese
//! status/priority strings) via serde renames; anything outside the known
//! sets deserializes into an `Unknown` catch-all instead of failing the
//! whole fetch.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Status {
    /// `pendente` — captured but not yet triaged.
    #[serde(rename = "pendente")]
    Pending,
    /// `a_fazer` — triaged and ready to start.
    #[serde(rename = "a_fazer")]
    Todo,
    /// `em_andamento` — actively being worked.
    #[serde(rename = "em_andamento")]
    InProgress,
    /// `em_revisao` — finished, awaiting review.
    #[serde(rename = "em_revisao")]
    InReview,
    /// `aguardando_cliente` — blocked on a client response.
    #[serde(rename = "aguardando_cliente")]
    AwaitingClient,
    /// `concluido` — terminal completed state.
    #[serde(rename = "concluido")]
    Done,
    /// `cancelado` — terminal abandoned state.
    #[serde(rename = "cancelado")]
    Cancelled,
    /// Any wire value outside the known set.
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

impl Status {
    /// Position in the fixed status total order. Unknown sorts last.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Status::Pending => 0,
            Status::Todo => 1,
            Status::InProgress => 2,
            Status::InReview => 3,
            Status::AwaitingClient => 4,
            Status::Done => 5,
            Status::Cancelled => 6,
            Status::Unknown => 99,
        }
    }

    /// The wire value sent to and received from the remote store.
    #[must_use]
    pub fn wire_value(self) -> &'static str {
        match self {
            Status::Pending => "pendente",
            Status::Todo => "a_fazer",
            Status::InProgress => "em_andamento",
            Status::InReview => "em_revisao",
            Status::AwaitingClient => "aguardando_cliente",
            Status::Done => "concluido",
            Status::Cancelled => "cancelado",
            Status::Unknown => "desconhecido",
        }
    }

    /// Whether this status is the terminal "completed" value excluded by
    /// the completion filter.
    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Status::Done
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Priority {
    /// `baixa`.
    #[serde(rename = "baixa")]
    Low,
    /// `media`.
    #[serde(rename = "media")]
    Medium,
    /// `alta`.
    #[serde(rename = "alta")]
    High,
    /// `urgente`.
    #[serde(rename = "urgente")]
    Urgent,
    /// Any wire value outside the known set; ranks as `media`.
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

impl Priority {
    /// Numeric rank used for priority sorting; higher is more urgent.
    /// Unknown ranks as `media`.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium | Priority::Unknown => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }

    /// The wire value sent to and received from the remote store.
    #[must_use]
    pub fn wire_value(self) -> &'static str {
        match self {
            Priority::Low => "baixa",
            Priority::Medium => "media",
            Priority::High => "alta",
            Priority::Urgent => "urgente",
            Priority::Unknown => "desconhecida",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Reference to a user as embedded in a task's assignee set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Unique user ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// Reference to the project a task belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Unique project ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// A work item as served by the remote task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable, server-assigned ID.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status; missing or unrecognized values become `Unknown`.
    #[serde(default)]
    pub status: Status,
    /// Priority; missing values default to `media`.
    #[serde(default)]
    pub priority: Priority,
    /// Optional due timestamp, nullable on the wire.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Project this task belongs to, if any.
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// Assigned users (zero or more).
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    /// Teams/occupations this task is associated with.
    #[serde(default)]
    pub team_ids: Vec<u64>,
    /// Accumulated work-timer total in seconds.
    #[serde(default)]
    pub elapsed_seconds: i64,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Calendar-day projection of the due timestamp in UTC.
    ///
    /// Date-bucket classification compares these day projections (the
    /// `YYYY-MM-DD` part) rather than raw timestamps, so the hour
    /// component can never push a task across a bucket boundary.
    #[must_use]
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|d| d.date_naive())
    }

    /// Whether the given user is in the assignee set.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: u64) -> bool {
        self.assignees.iter().any(|u| u.id == user_id)
    }

    /// Name of the first assignee, used as the sort key for assignee
    /// sorting. Empty when unassigned.
    #[must_use]
    pub fn primary_assignee_name(&self) -> &str {
        self.assignees.first().map_or("", |u| u.name.as_str())
    }
}

/// Fields for creating a new task. The server assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status.
    pub status: Status,
    /// Initial priority.
    pub priority: Priority,
    /// Optional due timestamp.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Project to attach the task to.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Teams the task is associated with.
    #[serde(default)]
    pub team_ids: Vec<u64>,
}

/// A partial update carrying only the changed fields of one mutation.
///
/// Unset fields are omitted from the wire payload entirely; the double
/// option on `due_date` distinguishes "leave unchanged" (outer `None`)
/// from "clear the date" (`Some(None)`, serialized as `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New due date; `Some(None)` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// User to add to the assignee set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_assignee: Option<UserRef>,
    /// User ID to remove from the assignee set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_assignee: Option<u64>,
    /// New accumulated work-timer total in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,
}

impl TaskPatch {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Applies the patch to a task in place. This is the local optimistic
    /// application; the server response later overwrites the task with
    /// its authoritative copy on success.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(user) = &self.add_assignee {
            if !task.is_assigned_to(user.id) {
                task.assignees.push(user.clone());
            }
        }
        if let Some(user_id) = self.remove_assignee {
            task.assignees.retain(|u| u.id != user_id);
        }
        if let Some(elapsed) = self.elapsed_seconds {
            task.elapsed_seconds = elapsed;
        }
    }

    /// Short human-readable summary of the changed fields, used in
    /// success/failure notifications.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status -> {}", status.wire_value()));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("priority -> {}", priority.wire_value()));
        }
        match self.due_date {
            Some(Some(due)) => parts.push(format!("due -> {}", due.date_naive())),
            Some(None) => parts.push("due cleared".into()),
            None => {}
        }
        if let Some(user) = &self.add_assignee {
            parts.push(format!("assigned {}", user.name));
        }
        if let Some(user_id) = self.remove_assignee {
            parts.push(format!("unassigned user {user_id}"));
        }
        if let Some(elapsed) = self.elapsed_seconds {
            parts.push(format!("elapsed -> {elapsed}s"));
        }
        if parts.is_empty() {
            "no changes".into()
        } else {
            parts.join(", ")
        }
    }
}
