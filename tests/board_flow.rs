//! End-to-end engine flows: fetch, filter, classify, mutate, and roll
//! back over the in-memory adapters with a fixed clock.

use chrono::NaiveDate;

use taskboard::adapters::memory::{FixedClock, InMemoryTaskStore, RecordingNotifier};
use taskboard::board::{
    apply_filters, sort_tasks, BoardState, BucketId, GroupMode, MutationCoordinator,
    SortDirection, SortField, TaskFilters,
};
use taskboard::model::Status;
use taskboard::ports::{Clock, TaskStore};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Fetch → filter → sort → build, the way the views assemble a board.
async fn build_board(
    store: &InMemoryTaskStore,
    clock: &FixedClock,
    filters: &TaskFilters,
    mode: GroupMode,
) -> BoardState {
    let tasks = store.list_tasks().await.unwrap();
    let mut filtered = apply_filters(&tasks, filters);
    sort_tasks(&mut filtered, SortField::Due, SortDirection::Ascending);
    BoardState::build(filtered, mode, clock.today())
}

#[tokio::test]
async fn seeded_board_populates_every_date_bucket() {
    let store = InMemoryTaskStore::seeded(today());
    let clock = FixedClock::at_noon(today());
    let filters = TaskFilters { show_completed: true, ..TaskFilters::default() };

    let board = build_board(&store, &clock, &filters, GroupMode::Date).await;

    assert_eq!(board.bucket(BucketId::Overdue).unwrap().task_ids, vec![101, 105]);
    assert_eq!(board.bucket(BucketId::Today).unwrap().task_ids, vec![102]);
    assert_eq!(board.bucket(BucketId::Tomorrow).unwrap().task_ids, vec![103]);
    assert_eq!(board.bucket(BucketId::Future).unwrap().task_ids, vec![104]);
    assert_eq!(board.bucket(BucketId::NoDate).unwrap().task_ids, vec![106]);
}

#[tokio::test]
async fn team_filter_flows_through_to_bucket_membership() {
    let store = InMemoryTaskStore::seeded(today());
    let clock = FixedClock::at_noon(today());
    let filters = TaskFilters { team_id: Some(7), ..TaskFilters::default() };

    let board = build_board(&store, &clock, &filters, GroupMode::Status).await;

    // Only the two team-7 tasks survive: 103 (pendente) and 104 (em_revisao).
    assert_eq!(board.len(), 2);
    assert_eq!(board.bucket(BucketId::Todo).unwrap().task_ids, vec![103]);
    assert_eq!(board.bucket(BucketId::Review).unwrap().task_ids, vec![104]);
}

#[tokio::test]
async fn mode_switch_discards_and_reclassifies() {
    let store = InMemoryTaskStore::seeded(today());
    let clock = FixedClock::at_noon(today());
    let filters = TaskFilters { show_completed: true, ..TaskFilters::default() };

    let board = build_board(&store, &clock, &filters, GroupMode::Status).await;
    let switched = board.rebuilt(GroupMode::Date, clock.today());

    assert_eq!(switched.bucket_order(), BucketId::canonical(GroupMode::Date));
    assert_eq!(switched.len(), board.len());
    // Same membership as a from-scratch date build.
    let fresh = build_board(&store, &clock, &filters, GroupMode::Date).await;
    for bucket in fresh.bucket_order() {
        assert_eq!(
            switched.bucket(*bucket).unwrap().task_ids,
            fresh.bucket(*bucket).unwrap().task_ids
        );
    }
}

#[tokio::test]
async fn drag_commit_and_rollback_settle_consistently() {
    let store = InMemoryTaskStore::seeded(today());
    let clock = FixedClock::at_noon(today());
    let notifier = RecordingNotifier::new();
    let filters = TaskFilters::default();

    let mut board = build_board(&store, &clock, &filters, GroupMode::Status).await;
    let coordinator = MutationCoordinator::new(&store, &notifier);

    // Committed drag: 101 lands in the done column locally and remotely.
    coordinator.move_to_bucket(&mut board, 101, BucketId::Done).await.unwrap();
    assert!(board.bucket(BucketId::Done).unwrap().task_ids.contains(&101));
    assert_eq!(store.task(101).unwrap().status, Status::Done);

    // Failed drag: 103 bounces back and the store never changes.
    store.fail_next("gateway timeout");
    coordinator.move_to_bucket(&mut board, 103, BucketId::Done).await.unwrap();
    assert_eq!(board.bucket_of(103), Some(BucketId::Todo));
    assert_eq!(store.task(103).unwrap().status, Status::Pending);

    assert_eq!(notifier.successes().len(), 1);
    assert_eq!(notifier.failures().len(), 1);
    assert!(notifier.failures()[0].contains("reverted"));

    // The board invariant held throughout: every task in exactly one bucket.
    let flat = board.flattened_ids();
    let mut unique = flat.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(flat.len(), unique.len());
    assert_eq!(flat.len(), board.len());
}
