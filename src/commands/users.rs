//! `taskboard users` command.

use crate::context::ServiceContext;

/// Execute the `users` command: print the directory's users and teams.
///
/// # Errors
///
/// Returns an error string if the directory fetches fail.
pub async fn run(ctx: &ServiceContext) -> Result<(), String> {
    let users = ctx
        .directory
        .list_users()
        .await
        .map_err(|e| format!("Failed to fetch users: {e}"))?;
    let teams = ctx
        .directory
        .list_teams()
        .await
        .map_err(|e| format!("Failed to fetch teams: {e}"))?;

    println!("Users:");
    for user in &users {
        println!("  #{:<4} {}", user.id, user.name);
    }
    println!();
    println!("Teams:");
    for team in &teams {
        println!("  #{:<4} {}", team.id, team.name);
    }
    Ok(())
}
