//! The board engine: pure classification, filtering, bucket state, and
//! the optimistic mutation coordinator.
//!
//! Layered bottom-up: `classify` and `filter` are pure functions,
//! `state` derives bucket membership from them, and `mutate` is the only
//! path through which bucket state changes once built.

pub mod classify;
pub mod filter;
pub mod mutate;
pub mod state;

pub use classify::{classify, BucketId, Classification, GroupMode};
pub use filter::{
    apply_filters, resolve_assignee_filter, sort_tasks, Role, SortDirection, SortField,
    TaskFilters,
};
pub use mutate::{run_optimistic, MutationCoordinator, MutationOutcome};
pub use state::{BoardState, Bucket, ReorderOutcome, TaskSnapshot};
