//! Command dispatch and handlers.

pub mod add;
pub mod board;
pub mod list;
pub mod move_task;
pub mod rm;
pub mod set;
pub mod users;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::board::{
    apply_filters, resolve_assignee_filter, sort_tasks, Role, SortDirection, TaskFilters,
};
use crate::cli::{Command, FilterArgs, SortArgs};
use crate::config::BoardConfig;
use crate::context::ServiceContext;
use crate::model::Task;

/// Dispatch a parsed command to its handler.
///
/// Handlers run on a current-thread runtime: the engine is single-owner
/// and event-driven, suspending only at remote calls, so one thread is
/// all it gets.
///
/// # Errors
///
/// Returns an error string if configuration loading, runtime setup, or
/// the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = BoardConfig::load()?;
    let ctx = ServiceContext::from_config(&config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &config, &ctx))
}

/// Dispatch a command with the given configuration and service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context(
    command: &Command,
    config: &BoardConfig,
    ctx: &ServiceContext,
) -> Result<(), String> {
    match command {
        Command::Board(args) => board::run(ctx, config, args).await,
        Command::List(args) => list::run(ctx, config, args).await,
        Command::Move(args) => move_task::run(ctx, args).await,
        Command::Set(args) => set::run(ctx, args).await,
        Command::Add(args) => add::run(ctx, args).await,
        Command::Rm(args) => rm::run(ctx, args).await,
        Command::Users => users::run(ctx).await,
    }
}

/// Fetches the raw task collection, scoped to a project when given.
pub(crate) async fn fetch_tasks(
    ctx: &ServiceContext,
    project: Option<u64>,
) -> Result<Vec<Task>, String> {
    let result = match project {
        Some(id) => ctx.store.list_tasks_by_project(id).await,
        None => ctx.store.list_tasks().await,
    };
    result.map_err(|e| format!("Failed to fetch tasks: {e}"))
}

/// Builds engine filters from CLI arguments plus the configured role and
/// acting user, which are passed explicitly into assignee resolution.
pub(crate) fn build_filters(args: &FilterArgs, config: &BoardConfig) -> TaskFilters {
    let role = config.role.unwrap_or(Role::Manager);
    TaskFilters {
        team_id: args.team,
        assignee_id: resolve_assignee_filter(args.assignee, role, config.user_id),
        priority: args.priority,
        show_completed: args.show_completed,
    }
}

/// Applies the filter chain and the selected sort.
pub(crate) fn filter_and_sort(
    tasks: &[Task],
    filters: &TaskFilters,
    sorting: &SortArgs,
    config: &BoardConfig,
) -> Vec<Task> {
    let mut filtered = apply_filters(tasks, filters);
    if let Some(field) = sorting.sort.or(config.sort) {
        let direction =
            if sorting.desc { SortDirection::Descending } else { SortDirection::Ascending };
        sort_tasks(&mut filtered, field, direction);
    }
    filtered
}

/// Parses a `YYYY-MM-DD` argument into a due timestamp at noon UTC.
///
/// # Errors
///
/// Malformed dates are validation errors; the caller issues no mutation.
pub(crate) fn parse_due(value: &str) -> Result<DateTime<Utc>, String> {
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid due date '{value}' (expected YYYY-MM-DD): {e}"))?;
    day.and_hms_opt(12, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| format!("Invalid due date '{value}'"))
}
