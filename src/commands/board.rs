//! `taskboard board` command.

use crate::board::{BoardState, GroupMode};
use crate::cli::BoardArgs;
use crate::config::BoardConfig;
use crate::context::ServiceContext;

/// Execute the `board` command: fetch, filter, sort, classify, render.
///
/// # Errors
///
/// Returns an error string if the task fetch fails.
pub async fn run(
    ctx: &ServiceContext,
    config: &BoardConfig,
    args: &BoardArgs,
) -> Result<(), String> {
    let tasks = super::fetch_tasks(ctx, args.filters.project).await?;
    let filters = super::build_filters(&args.filters, config);
    let filtered = super::filter_and_sort(&tasks, &filters, &args.sorting, config);
    let mode = args.group_by.or(config.group_by).unwrap_or(GroupMode::Status);
    let board = BoardState::build(filtered, mode, ctx.clock.today());
    print_board(&board);
    Ok(())
}

fn print_board(board: &BoardState) {
    for bucket_id in board.bucket_order() {
        let Some(bucket) = board.bucket(*bucket_id) else { continue };
        println!("== {} ({}) ==", bucket.title, bucket.task_ids.len());
        for task_id in &bucket.task_ids {
            if let Some(task) = board.task(*task_id) {
                let due = task.due_day().map_or_else(|| "-".to_string(), |d| d.to_string());
                println!(
                    "  #{:<5} {:<8} {:<11} {}",
                    task.id,
                    task.priority.wire_value(),
                    due,
                    task.title
                );
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FilterArgs, SortArgs};

    fn default_args() -> BoardArgs {
        BoardArgs {
            group_by: None,
            filters: FilterArgs {
                project: None,
                team: None,
                assignee: None,
                priority: None,
                show_completed: false,
            },
            sorting: SortArgs { sort: None, desc: false },
        }
    }

    #[tokio::test]
    async fn board_renders_against_the_demo_context() {
        let ctx = ServiceContext::demo();
        let config = BoardConfig::default();
        assert!(run(&ctx, &config, &default_args()).await.is_ok());
    }

    #[tokio::test]
    async fn date_mode_board_renders_too() {
        let ctx = ServiceContext::demo();
        let config = BoardConfig::default();
        let mut args = default_args();
        args.group_by = Some(GroupMode::Date);
        assert!(run(&ctx, &config, &args).await.is_ok());
    }
}
