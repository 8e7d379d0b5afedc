//! Pure classifier mapping a task and bucketing mode to a bucket and
//! sort key.
//!
//! Classification is total: every task lands in exactly one bucket of
//! the active mode, and unknown field values resolve to documented
//! defaults instead of errors. Date buckets compare calendar-day
//! projections (`NaiveDate`, the `YYYY-MM-DD` part of the timestamp in
//! UTC), never raw timestamp differences, so the hour component of
//! either "now" or the due date can never shift a task across a bucket
//! boundary.

use chrono::{NaiveDate, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Status, Task, TaskPatch};

/// How the board groups tasks into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// One column per workflow stage.
    Status,
    /// One bucket per due-date range.
    Date,
}

/// Identifier of one board bucket.
///
/// The first four variants belong to status mode, the rest to date mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketId {
    /// "A Fazer" — to-do column, also the fallback for unknown statuses.
    Todo,
    /// "Em Progresso".
    InProgress,
    /// "Revisão".
    Review,
    /// "Concluído".
    Done,
    /// "Atrasadas" — due before today.
    Overdue,
    /// "Hoje".
    Today,
    /// "Amanhã".
    Tomorrow,
    /// "Futuras" — due after tomorrow.
    Future,
    /// "Sem Data".
    NoDate,
}

/// Status-mode buckets in render order.
const STATUS_BUCKETS: [BucketId; 4] =
    [BucketId::Todo, BucketId::InProgress, BucketId::Review, BucketId::Done];

/// Date-mode buckets in render order.
const DATE_BUCKETS: [BucketId; 5] = [
    BucketId::Overdue,
    BucketId::Today,
    BucketId::Tomorrow,
    BucketId::Future,
    BucketId::NoDate,
];

impl BucketId {
    /// The canonical bucket set of a mode, in render order.
    #[must_use]
    pub fn canonical(mode: GroupMode) -> &'static [BucketId] {
        match mode {
            GroupMode::Status => &STATUS_BUCKETS,
            GroupMode::Date => &DATE_BUCKETS,
        }
    }

    /// The mode this bucket belongs to.
    #[must_use]
    pub fn mode(self) -> GroupMode {
        match self {
            BucketId::Todo | BucketId::InProgress | BucketId::Review | BucketId::Done => {
                GroupMode::Status
            }
            _ => GroupMode::Date,
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            BucketId::Todo => "A Fazer",
            BucketId::InProgress => "Em Progresso",
            BucketId::Review => "Revisão",
            BucketId::Done => "Concluído",
            BucketId::Overdue => "Atrasadas",
            BucketId::Today => "Hoje",
            BucketId::Tomorrow => "Amanhã",
            BucketId::Future => "Futuras",
            BucketId::NoDate => "Sem Data",
        }
    }

    /// Stable machine-readable name, used on the CLI.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            BucketId::Todo => "todo",
            BucketId::InProgress => "in-progress",
            BucketId::Review => "review",
            BucketId::Done => "done",
            BucketId::Overdue => "overdue",
            BucketId::Today => "today",
            BucketId::Tomorrow => "tomorrow",
            BucketId::Future => "future",
            BucketId::NoDate => "no-date",
        }
    }

    /// Parses a CLI slug back into a bucket.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<BucketId> {
        let all = STATUS_BUCKETS.iter().chain(DATE_BUCKETS.iter());
        all.copied().find(|b| b.slug() == slug)
    }

    /// Whether this bucket enforces ascending due-date order, re-sorting
    /// any manual reordering.
    #[must_use]
    pub fn enforces_date_order(self) -> bool {
        matches!(self, BucketId::Overdue | BucketId::Future)
    }

    /// The field change implied by dropping a task into this bucket.
    ///
    /// Status columns imply their status; date buckets imply a due date
    /// synthesized safely inside the bucket's range (noon UTC, so the
    /// day projection is unambiguous), and "Sem Data" clears the date.
    #[must_use]
    pub fn implied_patch(self, today: NaiveDate) -> TaskPatch {
        let due = |day: NaiveDate| {
            day.and_hms_opt(12, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
        };
        match self {
            BucketId::Todo => TaskPatch { status: Some(Status::Todo), ..TaskPatch::default() },
            BucketId::InProgress => {
                TaskPatch { status: Some(Status::InProgress), ..TaskPatch::default() }
            }
            BucketId::Review => {
                TaskPatch { status: Some(Status::InReview), ..TaskPatch::default() }
            }
            BucketId::Done => TaskPatch { status: Some(Status::Done), ..TaskPatch::default() },
            BucketId::Overdue => TaskPatch {
                due_date: Some(due(today.pred_opt().unwrap_or(today))),
                ..TaskPatch::default()
            },
            BucketId::Today => {
                TaskPatch { due_date: Some(due(today)), ..TaskPatch::default() }
            }
            BucketId::Tomorrow => TaskPatch {
                due_date: Some(due(today.succ_opt().unwrap_or(today))),
                ..TaskPatch::default()
            },
            BucketId::Future => TaskPatch {
                due_date: Some(due(today.checked_add_days(chrono::Days::new(7)).unwrap_or(today))),
                ..TaskPatch::default()
            },
            BucketId::NoDate => TaskPatch { due_date: Some(None), ..TaskPatch::default() },
        }
    }
}

/// Result of classifying one task: the bucket it belongs to and the key
/// its bucket sorts by.
///
/// Buckets without an enforced order carry key 0; ties are broken by
/// roster (insertion) order via stable sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The single bucket the task belongs to.
    pub bucket: BucketId,
    /// Sort key within the bucket.
    pub sort_key: i64,
}

/// The fixed status-to-column table.
///
/// `aguardando_cliente` counts as in-progress work and `cancelado` as
/// terminal; unknown or missing statuses land in the to-do column.
#[must_use]
pub fn status_bucket(status: Status) -> BucketId {
    match status {
        Status::Pending | Status::Todo | Status::Unknown => BucketId::Todo,
        Status::InProgress | Status::AwaitingClient => BucketId::InProgress,
        Status::InReview => BucketId::Review,
        Status::Done | Status::Cancelled => BucketId::Done,
    }
}

/// Assigns a task to exactly one bucket of `mode`, with its sort key.
///
/// `today` is the calendar-day projection of the reference clock in UTC;
/// callers obtain it from the `Clock` port so a whole build pass shares
/// one consistent day.
#[must_use]
pub fn classify(task: &Task, mode: GroupMode, today: NaiveDate) -> Classification {
    match mode {
        GroupMode::Status => Classification {
            bucket: status_bucket(task.status),
            sort_key: i64::from(task.status.rank()),
        },
        GroupMode::Date => {
            let tomorrow = today.succ_opt().unwrap_or(today);
            match task.due_day() {
                None => Classification { bucket: BucketId::NoDate, sort_key: 0 },
                Some(day) if day < today => {
                    Classification { bucket: BucketId::Overdue, sort_key: day_key(day) }
                }
                Some(day) if day == today => {
                    Classification { bucket: BucketId::Today, sort_key: 0 }
                }
                Some(day) if day == tomorrow => {
                    Classification { bucket: BucketId::Tomorrow, sort_key: 0 }
                }
                Some(day) => Classification { bucket: BucketId::Future, sort_key: day_key(day) },
            }
        }
    }
}

/// Monotonic per-day key: ascending key order is ascending calendar
/// order.
fn day_key(day: NaiveDate) -> i64 {
    i64::from(chrono::Datelike::num_days_from_ce(&day))
}
