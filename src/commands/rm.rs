//! `taskboard rm` command.

use crate::cli::RmArgs;
use crate::context::ServiceContext;

/// Execute the `rm` command: delete a task through the store port.
///
/// # Errors
///
/// Returns an error string if the delete fails.
pub async fn run(ctx: &ServiceContext, args: &RmArgs) -> Result<(), String> {
    ctx.store
        .delete_task(args.id)
        .await
        .map_err(|e| format!("Failed to delete task {}: {e}", args.id))?;
    ctx.notifier.data_changed();
    ctx.notifier.success(&format!("Task {} deleted", args.id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rm_deletes_a_seeded_task() {
        let ctx = ServiceContext::demo();
        assert!(run(&ctx, &RmArgs { id: 106 }).await.is_ok());
        // Deleting again fails: the task is gone.
        assert!(run(&ctx, &RmArgs { id: 106 }).await.is_err());
    }
}
