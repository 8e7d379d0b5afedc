//! Remote task store port.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use crate::model::{Task, TaskDraft, TaskPatch};

/// Boxed future type alias used by the async ports to keep the traits
/// dyn-compatible.
pub type StoreFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Persists tasks in an external store.
///
/// The store is an opaque request/response boundary: the engine never
/// assumes anything about its internals beyond these operations, and all
/// mutations send only the changed fields.
pub trait TaskStore: Send + Sync {
    /// Lists every task visible to the caller.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the tasks cannot be fetched.
    fn list_tasks(&self) -> StoreFuture<'_, Vec<Task>>;

    /// Lists the tasks belonging to one project.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the tasks cannot be fetched.
    fn list_tasks_by_project(&self, project_id: u64) -> StoreFuture<'_, Vec<Task>>;

    /// Creates a new task and returns it with its server-assigned ID and
    /// timestamps.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the task cannot be created.
    fn create_task(&self, draft: &TaskDraft) -> StoreFuture<'_, Task>;

    /// Updates only the fields set in `patch` and returns the server's
    /// authoritative copy of the task.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the task cannot be found or
    /// updated.
    fn update_task(&self, id: u64, patch: &TaskPatch) -> StoreFuture<'_, Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the task cannot be found or
    /// deleted.
    fn delete_task(&self, id: u64) -> StoreFuture<'_, ()>;
}
