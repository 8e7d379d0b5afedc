//! User and team directory port.

use serde::{Deserialize, Serialize};

use super::task_store::StoreFuture;

/// A user as known to the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// A team (occupation group) as known to the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// Looks up users and teams in an external directory.
pub trait UserDirectory: Send + Sync {
    /// Fetches a single user by ID.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the user cannot be found.
    fn get_user(&self, id: u64) -> StoreFuture<'_, User>;

    /// Lists all known users.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the users cannot be listed.
    fn list_users(&self) -> StoreFuture<'_, Vec<User>>;

    /// Lists all known teams.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the teams cannot be listed.
    fn list_teams(&self) -> StoreFuture<'_, Vec<Team>>;
}
