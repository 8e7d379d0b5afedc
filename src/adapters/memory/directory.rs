//! In-memory adapter for the `UserDirectory` port.

use crate::ports::directory::{Team, User, UserDirectory};
use crate::ports::task_store::StoreFuture;

/// Directory serving a fixed set of users and teams.
pub struct StaticDirectory {
    users: Vec<User>,
    teams: Vec<Team>,
}

impl StaticDirectory {
    /// Creates a directory over the given users and teams.
    #[must_use]
    pub fn new(users: Vec<User>, teams: Vec<Team>) -> Self {
        Self { users, teams }
    }

    /// The directory matching the demo task fixture.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            vec![
                User { id: 10, name: "Ana".into() },
                User { id: 11, name: "Bruno".into() },
                User { id: 12, name: "Carla".into() },
            ],
            vec![
                Team { id: 5, name: "Comercial".into() },
                Team { id: 7, name: "Engenharia".into() },
            ],
        )
    }
}

impl UserDirectory for StaticDirectory {
    fn get_user(&self, id: u64) -> StoreFuture<'_, User> {
        Box::pin(async move {
            self.users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| format!("User {id} not found").into())
        })
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move { Ok(self.users.clone()) })
    }

    fn list_teams(&self) -> StoreFuture<'_, Vec<Team>> {
        Box::pin(async move { Ok(self.teams.clone()) })
    }
}
