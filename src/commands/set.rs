//! `taskboard set` command.

use crate::board::{apply_filters, BoardState, GroupMode, MutationCoordinator, TaskFilters};
use crate::cli::SetArgs;
use crate::context::ServiceContext;
use crate::model::{TaskPatch, UserRef};

/// Execute the `set` command: build the patch from the flags, then apply
/// it through the optimistic protocol.
///
/// A rejected mutation is reported through the notifier and reverted;
/// the command itself still completes.
///
/// # Errors
///
/// Returns an error string for validation failures: a malformed date, an
/// unknown user, an empty patch, a task not on the board, or a failed
/// fetch.
pub async fn run(ctx: &ServiceContext, args: &SetArgs) -> Result<(), String> {
    let patch = build_patch(ctx, args).await?;
    let tasks = super::fetch_tasks(ctx, None).await?;
    let filters = TaskFilters { show_completed: true, ..TaskFilters::default() };
    let filtered = apply_filters(&tasks, &filters);
    let mut board = BoardState::build(filtered, GroupMode::Status, ctx.clock.today());

    let coordinator = MutationCoordinator::new(ctx.store.as_ref(), ctx.notifier.as_ref());
    coordinator.mutate(&mut board, args.id, patch).await?;
    Ok(())
}

async fn build_patch(ctx: &ServiceContext, args: &SetArgs) -> Result<TaskPatch, String> {
    let due_date = if args.clear_due {
        Some(None)
    } else {
        match &args.due {
            Some(value) => Some(Some(super::parse_due(value)?)),
            None => None,
        }
    };
    let add_assignee = match args.assign {
        Some(user_id) => {
            let user = ctx
                .directory
                .get_user(user_id)
                .await
                .map_err(|e| format!("Failed to look up user {user_id}: {e}"))?;
            Some(UserRef { id: user.id, name: user.name })
        }
        None => None,
    };
    Ok(TaskPatch {
        status: args.status,
        priority: args.priority,
        due_date,
        add_assignee,
        remove_assignee: args.unassign,
        elapsed_seconds: args.elapsed,
    })
}
