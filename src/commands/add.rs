//! `taskboard add` command.

use crate::cli::AddArgs;
use crate::context::ServiceContext;
use crate::model::TaskDraft;

/// Execute the `add` command: create a task through the store port.
///
/// # Errors
///
/// Returns an error string for a malformed due date or a failed create.
pub async fn run(ctx: &ServiceContext, args: &AddArgs) -> Result<(), String> {
    let due_date = args.due.as_deref().map(super::parse_due).transpose()?;
    let draft = TaskDraft {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status,
        priority: args.priority,
        due_date,
        project_id: args.project,
        team_ids: args.team.clone(),
    };
    let task = ctx
        .store
        .create_task(&draft)
        .await
        .map_err(|e| format!("Failed to create task: {e}"))?;
    ctx.notifier.data_changed();
    ctx.notifier.success(&format!("Task {} created: {}", task.id, task.title));
    Ok(())
}
