//! `taskboard list` command.

use crate::cli::ListArgs;
use crate::config::BoardConfig;
use crate::context::ServiceContext;
use crate::model::Task;

/// Execute the `list` command: fetch, filter, sort, print a flat table.
///
/// # Errors
///
/// Returns an error string if the task fetch fails.
pub async fn run(
    ctx: &ServiceContext,
    config: &BoardConfig,
    args: &ListArgs,
) -> Result<(), String> {
    let tasks = super::fetch_tasks(ctx, args.filters.project).await?;
    let filters = super::build_filters(&args.filters, config);
    let filtered = super::filter_and_sort(&tasks, &filters, &args.sorting, config);
    print_table(&filtered);
    Ok(())
}

fn print_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }
    println!(
        "{:<6} {:<19} {:<8} {:<11} {:<12} {:<12} TITLE",
        "ID", "STATUS", "PRIORITY", "DUE", "PROJECT", "ASSIGNEE"
    );
    for task in tasks {
        let due = task.due_day().map_or_else(|| "-".to_string(), |d| d.to_string());
        let project = task.project.as_ref().map_or("-", |p| p.name.as_str());
        let assignee = if task.assignees.is_empty() { "-" } else { task.primary_assignee_name() };
        println!(
            "{:<6} {:<19} {:<8} {:<11} {:<12} {:<12} {}",
            task.id,
            task.status.wire_value(),
            task.priority.wire_value(),
            due,
            project,
            assignee,
            task.title
        );
    }
}
