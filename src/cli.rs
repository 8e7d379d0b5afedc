//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::board::{GroupMode, SortField};
use crate::model::{Priority, Status};

/// Top-level CLI parser for `taskboard`.
#[derive(Debug, Parser)]
#[command(
    name = "taskboard",
    version,
    about = "Board and list views over a remote task store"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the board, grouped into status columns or date buckets.
    Board(BoardArgs),
    /// List tasks as a flat table.
    List(ListArgs),
    /// Move a task into a bucket (the drag-and-drop equivalent).
    Move(MoveArgs),
    /// Update fields on a task.
    Set(SetArgs),
    /// Create a task.
    Add(AddArgs),
    /// Delete a task.
    Rm(RmArgs),
    /// List the directory's users and teams.
    Users,
}

/// Filters shared by the `board` and `list` views.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only tasks in this project.
    #[arg(long)]
    pub project: Option<u64>,
    /// Only tasks whose team set contains this team ID.
    #[arg(long)]
    pub team: Option<u64>,
    /// Only tasks assigned to this user ID.
    #[arg(long)]
    pub assignee: Option<u64>,
    /// Only tasks with this priority.
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,
    /// Include completed tasks.
    #[arg(long)]
    pub show_completed: bool,
}

/// Sort selection shared by the `board` and `list` views.
#[derive(Debug, Args)]
pub struct SortArgs {
    /// Sort field, applied before classification.
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,
    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

/// Arguments for `taskboard board`.
#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Bucketing mode.
    #[arg(long, value_enum)]
    pub group_by: Option<GroupMode>,
    /// Filter selection.
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Sort selection.
    #[command(flatten)]
    pub sorting: SortArgs,
}

/// Arguments for `taskboard list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter selection.
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Sort selection.
    #[command(flatten)]
    pub sorting: SortArgs,
}

/// Arguments for `taskboard move`.
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Task ID.
    pub id: u64,
    /// Destination bucket slug, e.g. `in-progress` or `today`.
    pub bucket: String,
}

/// Arguments for `taskboard set`.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Task ID.
    pub id: u64,
    /// New status.
    #[arg(long, value_enum)]
    pub status: Option<Status>,
    /// New priority.
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,
    /// New due date as YYYY-MM-DD.
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Clear the due date.
    #[arg(long)]
    pub clear_due: bool,
    /// Add this user ID to the assignee set.
    #[arg(long)]
    pub assign: Option<u64>,
    /// Remove this user ID from the assignee set.
    #[arg(long)]
    pub unassign: Option<u64>,
    /// Set the accumulated work-timer total, in seconds.
    #[arg(long)]
    pub elapsed: Option<i64>,
}

/// Arguments for `taskboard add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title.
    pub title: String,
    /// Longer description.
    #[arg(long)]
    pub description: Option<String>,
    /// Initial status.
    #[arg(long, value_enum, default_value = "todo")]
    pub status: Status,
    /// Initial priority.
    #[arg(long, value_enum, default_value = "medium")]
    pub priority: Priority,
    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,
    /// Project to attach the task to.
    #[arg(long)]
    pub project: Option<u64>,
    /// Team IDs to associate (repeatable).
    #[arg(long)]
    pub team: Vec<u64>,
}

/// Arguments for `taskboard rm`.
#[derive(Debug, Args)]
pub struct RmArgs {
    /// Task ID.
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_board_with_mode_and_filters() {
        let cli = Cli::parse_from([
            "taskboard",
            "board",
            "--group-by",
            "date",
            "--team",
            "5",
            "--show-completed",
        ]);
        let Command::Board(args) = cli.command else { panic!("expected board") };
        assert_eq!(args.group_by, Some(GroupMode::Date));
        assert_eq!(args.filters.team, Some(5));
        assert!(args.filters.show_completed);
    }

    #[test]
    fn parses_move_with_bucket_slug() {
        let cli = Cli::parse_from(["taskboard", "move", "7", "in-progress"]);
        let Command::Move(args) = cli.command else { panic!("expected move") };
        assert_eq!(args.id, 7);
        assert_eq!(args.bucket, "in-progress");
    }

    #[test]
    fn set_rejects_due_combined_with_clear_due() {
        let result = Cli::try_parse_from([
            "taskboard",
            "set",
            "7",
            "--due",
            "2024-06-15",
            "--clear-due",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_task_id_is_rejected() {
        let result = Cli::try_parse_from(["taskboard", "set", "seven", "--status", "done"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_statuses_are_not_accepted_on_the_cli() {
        let result = Cli::try_parse_from(["taskboard", "set", "7", "--status", "unknown"]);
        assert!(result.is_err());
    }
}
