//! `taskboard move` command — the drag-and-drop equivalent.

use crate::board::{apply_filters, BoardState, BucketId, MutationCoordinator, TaskFilters};
use crate::cli::MoveArgs;
use crate::context::ServiceContext;

/// Execute the `move` command: build the board in the destination
/// bucket's mode, then move the task through the optimistic protocol.
///
/// A rejected mutation is reported through the notifier and reverted;
/// the command itself still completes, because the board settled in a
/// consistent state.
///
/// # Errors
///
/// Returns an error string for validation failures: an unknown bucket
/// slug, a task not on the board, or a failed fetch.
pub async fn run(ctx: &ServiceContext, args: &MoveArgs) -> Result<(), String> {
    let dest = BucketId::from_slug(&args.bucket)
        .ok_or_else(|| format!("Unknown bucket '{}'", args.bucket))?;
    let tasks = super::fetch_tasks(ctx, None).await?;
    let filters = TaskFilters { show_completed: true, ..TaskFilters::default() };
    let filtered = apply_filters(&tasks, &filters);
    let mut board = BoardState::build(filtered, dest.mode(), ctx.clock.today());

    let coordinator = MutationCoordinator::new(ctx.store.as_ref(), ctx.notifier.as_ref());
    coordinator.move_to_bucket(&mut board, args.id, dest).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_to_done_column_runs_against_the_demo_context() {
        let ctx = ServiceContext::demo();
        let args = MoveArgs { id: 101, bucket: "done".into() };
        assert!(run(&ctx, &args).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_bucket_slug_is_a_validation_error() {
        let ctx = ServiceContext::demo();
        let args = MoveArgs { id: 101, bucket: "limbo".into() };
        assert!(run(&ctx, &args).await.is_err());
    }

    #[tokio::test]
    async fn unknown_task_is_a_validation_error() {
        let ctx = ServiceContext::demo();
        let args = MoveArgs { id: 9999, bucket: "done".into() };
        assert!(run(&ctx, &args).await.is_err());
    }
}
