//! Optimistic mutation coordinator.
//!
//! Every field edit and bucket move funnels through one protocol:
//! snapshot the affected task, apply the change locally so the caller
//! sees it before the network round-trip, issue the remote update with
//! only the changed fields, then keep the optimistic state on success or
//! restore the snapshot on failure. Failures are never retried
//! automatically.

use std::error::Error;
use std::future::Future;

use super::classify::BucketId;
use super::state::{BoardState, ReorderOutcome, TaskSnapshot};
use crate::model::{Task, TaskPatch};
use crate::ports::{Notifier, TaskStore};

/// Outcome of one mutation attempt that got past validation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The remote store accepted the change; the board keeps the
    /// optimistic state overlaid with the server's authoritative copy.
    Committed(Task),
    /// The remote store rejected the change; the board was restored to
    /// the pre-mutation snapshot. Carries the reported reason.
    RolledBack(String),
}

impl MutationOutcome {
    /// True when the mutation committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, MutationOutcome::Committed(_))
    }
}

/// Runs one optimistic mutation against arbitrary snapshot/apply/restore
/// functions and a remote call.
///
/// The sequence is: take the snapshot, apply locally, await the remote
/// call, and on failure hand the snapshot back to `restore`. Both the
/// snapshot getter and the local apply may refuse with a validation
/// error, in which case nothing was changed and the remote call is never
/// issued.
///
/// # Errors
///
/// Returns `Err` only for those validation failures. A remote failure is
/// not an `Err`: it resolves to `Ok(Err(reason))` after the rollback.
pub async fn run_optimistic<Out, Fut>(
    board: &mut BoardState,
    take_snapshot: impl FnOnce(&BoardState) -> Result<TaskSnapshot, String>,
    apply: impl FnOnce(&mut BoardState) -> Result<(), String>,
    remote: Fut,
) -> Result<Result<Out, String>, String>
where
    Fut: Future<Output = Result<Out, Box<dyn Error + Send + Sync>>>,
{
    let snapshot = take_snapshot(board)?;
    apply(board)?;
    match remote.await {
        Ok(out) => Ok(Ok(out)),
        Err(err) => {
            board.restore(snapshot);
            Ok(Err(err.to_string()))
        }
    }
}

/// Coordinates optimistic mutations between one board and the remote
/// store, reporting every attempt's outcome through the notifier.
///
/// The coordinator borrows the board per call rather than owning it, so
/// there is exactly one writer at a time; a second mutation on the same
/// task simply re-runs the protocol against the latest optimistic state
/// (last writer wins locally, the remote store is the final arbiter).
pub struct MutationCoordinator<'a> {
    store: &'a dyn TaskStore,
    notifier: &'a dyn Notifier,
}

impl<'a> MutationCoordinator<'a> {
    /// Creates a coordinator over the given store and notifier.
    #[must_use]
    pub fn new(store: &'a dyn TaskStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Applies a field patch to one task through the optimistic
    /// protocol.
    ///
    /// # Errors
    ///
    /// Returns an error for validation failures (empty patch, task not
    /// on the board); the optimistic step is skipped entirely and no
    /// remote call is made.
    pub async fn mutate(
        &self,
        board: &mut BoardState,
        task_id: u64,
        patch: TaskPatch,
    ) -> Result<MutationOutcome, String> {
        if patch.is_empty() {
            return Err(format!("Task {task_id}: nothing to update"));
        }
        let described = patch.describe();
        let result = run_optimistic(
            board,
            |b| {
                b.snapshot(task_id).ok_or_else(|| format!("Task {task_id} is not on the board"))
            },
            |b| b.apply_patch(task_id, &patch),
            self.store.update_task(task_id, &patch),
        )
        .await?;

        match result {
            Ok(server_task) => {
                board.absorb(server_task.clone());
                self.notifier.data_changed();
                self.notifier.success(&format!("Task {task_id}: {described}"));
                Ok(MutationOutcome::Committed(server_task))
            }
            Err(reason) => {
                let message =
                    format!("Task {task_id}: {described} failed ({reason}); change reverted");
                self.notifier.failure(&message);
                Ok(MutationOutcome::RolledBack(message))
            }
        }
    }

    /// Drag-equivalent move: computes the destination bucket's implied
    /// field change and runs it through the same protocol.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination bucket does not belong to the
    /// board's active mode, or for the same validation failures as
    /// [`MutationCoordinator::mutate`].
    pub async fn move_to_bucket(
        &self,
        board: &mut BoardState,
        task_id: u64,
        dest: BucketId,
    ) -> Result<MutationOutcome, String> {
        if dest.mode() != board.mode() {
            return Err(format!(
                "Bucket {} does not exist in {:?} mode",
                dest.slug(),
                board.mode()
            ));
        }
        let patch = dest.implied_patch(board.today());
        self.mutate(board, task_id, patch).await
    }

    /// Local-only reorder within a bucket. No remote call is made; a
    /// bucket with an enforced date order re-sorts immediately and the
    /// user is informed the manual order was not honored.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-range positions or an unknown bucket.
    pub fn reorder(
        &self,
        board: &mut BoardState,
        bucket: BucketId,
        from: usize,
        to: usize,
    ) -> Result<ReorderOutcome, String> {
        let outcome = board.reorder(bucket, from, to)?;
        if outcome == ReorderOutcome::Resorted {
            self.notifier.info(&format!(
                "{} keeps due-date order; manual order was not kept",
                bucket.title()
            ));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryTaskStore, RecordingNotifier};
    use crate::board::classify::GroupMode;
    use crate::model::{Priority, Status};
    use crate::ports::NullNotifier;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(id: u64, status: Status) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            status,
            priority: Priority::Medium,
            due_date: None,
            project: None,
            assignees: vec![],
            team_ids: vec![],
            elapsed_seconds: 0,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn board_with(tasks: Vec<Task>, mode: GroupMode) -> BoardState {
        BoardState::build(tasks, mode, today())
    }

    #[tokio::test]
    async fn committed_mutation_keeps_optimistic_state() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        let patch = TaskPatch { status: Some(Status::InProgress), ..TaskPatch::default() };
        let outcome = coordinator.mutate(&mut board, 1, patch).await.unwrap();

        assert!(outcome.is_committed());
        assert_eq!(board.task(1).unwrap().status, Status::InProgress);
        assert_eq!(board.bucket_of(1), Some(BucketId::InProgress));
        assert_eq!(store.task(1).unwrap().status, Status::InProgress);
        assert_eq!(notifier.successes().len(), 1);
        assert!(notifier.data_changed_count() > 0);
    }

    #[tokio::test]
    async fn failed_mutation_rolls_back_to_snapshot() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        store.fail_next("server exploded");
        let patch = TaskPatch { status: Some(Status::InProgress), ..TaskPatch::default() };
        let outcome = coordinator.mutate(&mut board, 1, patch).await.unwrap();

        assert!(matches!(outcome, MutationOutcome::RolledBack(_)));
        // Observable status settles back to a_fazer.
        assert_eq!(board.task(1).unwrap().status, Status::Todo);
        assert_eq!(board.bucket_of(1), Some(BucketId::Todo));
        assert_eq!(store.task(1).unwrap().status, Status::Todo);
        let failures = notifier.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("reverted"));
        assert_eq!(notifier.data_changed_count(), 0);
    }

    #[tokio::test]
    async fn validation_failure_skips_the_optimistic_step() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        assert!(coordinator.mutate(&mut board, 1, TaskPatch::default()).await.is_err());
        let patch = TaskPatch { status: Some(Status::Done), ..TaskPatch::default() };
        assert!(coordinator.mutate(&mut board, 42, patch).await.is_err());

        // No optimistic change, no notification of any kind.
        assert_eq!(board.task(1).unwrap().status, Status::Todo);
        assert!(notifier.successes().is_empty());
        assert!(notifier.failures().is_empty());
    }

    #[tokio::test]
    async fn rollback_is_scoped_to_the_failed_mutation() {
        let tasks = vec![task(1, Status::Todo), task(2, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        // A later mutation on task 2 commits...
        let patch = TaskPatch { status: Some(Status::Done), ..TaskPatch::default() };
        coordinator.mutate(&mut board, 2, patch).await.unwrap();

        // ...then a mutation on task 1 fails. Only task 1 rolls back.
        store.fail_next("timeout");
        let patch = TaskPatch { status: Some(Status::InProgress), ..TaskPatch::default() };
        coordinator.mutate(&mut board, 1, patch).await.unwrap();

        assert_eq!(board.task(1).unwrap().status, Status::Todo);
        assert_eq!(board.task(2).unwrap().status, Status::Done);
        assert_eq!(board.bucket_of(2), Some(BucketId::Done));
    }

    #[tokio::test]
    async fn second_mutation_reapplies_over_latest_state() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        let first = TaskPatch { status: Some(Status::InProgress), ..TaskPatch::default() };
        coordinator.mutate(&mut board, 1, first).await.unwrap();
        let second = TaskPatch { priority: Some(Priority::Urgent), ..TaskPatch::default() };
        coordinator.mutate(&mut board, 1, second).await.unwrap();

        let settled = board.task(1).unwrap();
        assert_eq!(settled.status, Status::InProgress);
        assert_eq!(settled.priority, Priority::Urgent);
    }

    #[tokio::test]
    async fn move_to_done_column_synthesizes_concluido() {
        let tasks = vec![task(1, Status::Todo), task(2, Status::InProgress)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        let outcome = coordinator.move_to_bucket(&mut board, 1, BucketId::Done).await.unwrap();

        assert!(outcome.is_committed());
        assert_eq!(store.task(1).unwrap().status, Status::Done);
        assert_eq!(board.bucket(BucketId::Done).unwrap().task_ids, vec![1]);
        assert!(!board.bucket(BucketId::Todo).unwrap().task_ids.contains(&1));
    }

    #[tokio::test]
    async fn move_into_date_bucket_synthesizes_a_due_date() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Date);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        coordinator.move_to_bucket(&mut board, 1, BucketId::Today).await.unwrap();

        assert_eq!(board.bucket_of(1), Some(BucketId::Today));
        assert_eq!(store.task(1).unwrap().due_date.unwrap().date_naive(), today());
    }

    #[tokio::test]
    async fn move_to_foreign_mode_bucket_is_rejected_up_front() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        assert!(coordinator.move_to_bucket(&mut board, 1, BucketId::Today).await.is_err());
        assert_eq!(board.bucket_of(1), Some(BucketId::Todo));
    }

    #[tokio::test]
    async fn failed_move_restores_the_source_bucket() {
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = RecordingNotifier::new();
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        store.fail_next("conflict");
        let outcome =
            coordinator.move_to_bucket(&mut board, 1, BucketId::Review).await.unwrap();

        assert!(matches!(outcome, MutationOutcome::RolledBack(_)));
        assert_eq!(board.bucket_of(1), Some(BucketId::Todo));
    }

    #[tokio::test]
    async fn abandoned_view_keeps_mutating_silently() {
        // An unmounted view swaps in the null notifier; the in-flight
        // mutation still settles against the store with no one listening.
        let tasks = vec![task(1, Status::Todo)];
        let store = InMemoryTaskStore::with_tasks(tasks.clone());
        let notifier = NullNotifier;
        let mut board = board_with(tasks, GroupMode::Status);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        let patch = TaskPatch { status: Some(Status::Done), ..TaskPatch::default() };
        let outcome = coordinator.mutate(&mut board, 1, patch).await.unwrap();
        assert!(outcome.is_committed());
        assert_eq!(store.task(1).unwrap().status, Status::Done);
    }

    #[test]
    fn reorder_in_date_bucket_informs_about_the_sort_law() {
        let mut t1 = task(1, Status::Todo);
        t1.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let mut t2 = task(2, Status::Todo);
        t2.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap());
        let store = InMemoryTaskStore::with_tasks(vec![t1.clone(), t2.clone()]);
        let notifier = RecordingNotifier::new();
        let mut board = board_with(vec![t1, t2], GroupMode::Date);
        let coordinator = MutationCoordinator::new(&store, &notifier);

        let outcome = coordinator.reorder(&mut board, BucketId::Overdue, 0, 1).unwrap();
        assert_eq!(outcome, ReorderOutcome::Resorted);
        assert_eq!(notifier.infos().len(), 1);
    }
}
