//! Board state: ordered buckets of task IDs plus the task record.
//!
//! The state is derived — built in full from the classifier whenever the
//! task set, filters, or mode change — and locally patched while
//! optimistic mutations are in flight. The union of all bucket lists is
//! always exactly the filtered task set, with every task in exactly one
//! bucket.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::classify::{classify, BucketId, GroupMode};
use crate::model::{Task, TaskPatch};

/// One board column/bucket: an identifier, a display title, and the IDs
/// of its tasks in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Bucket identifier.
    pub id: BucketId,
    /// Display title.
    pub title: &'static str,
    /// Member task IDs in render order.
    pub task_ids: Vec<u64>,
}

impl Bucket {
    fn empty(id: BucketId) -> Self {
        Self { id, title: id.title(), task_ids: Vec::new() }
    }
}

/// Pre-mutation snapshot of one task: its data, bucket, and position.
///
/// Snapshots are per-task rather than whole-board so that rolling back
/// one failed mutation never undoes an unrelated, later, successful
/// mutation on another task.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    task: Task,
    bucket: BucketId,
    index: usize,
}

/// Outcome of a manual reorder within one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The new local order was kept.
    Applied,
    /// The bucket enforces date order and re-sorted the manual order
    /// away.
    Resorted,
}

/// In-memory board: bucket membership derived from the classifier.
#[derive(Debug, Clone)]
pub struct BoardState {
    mode: GroupMode,
    today: NaiveDate,
    order: Vec<BucketId>,
    buckets: HashMap<BucketId, Bucket>,
    tasks: HashMap<u64, Task>,
    roster: Vec<u64>,
}

impl BoardState {
    /// Builds a board from an already filtered and sorted task list.
    ///
    /// Classification is total, so a degenerate task can never abort the
    /// build; it lands in its documented fallback bucket. Building twice
    /// from the same inputs yields identical bucket contents and order.
    #[must_use]
    pub fn build(filtered: Vec<Task>, mode: GroupMode, today: NaiveDate) -> Self {
        let order: Vec<BucketId> = BucketId::canonical(mode).to_vec();
        let mut buckets: HashMap<BucketId, Bucket> =
            order.iter().map(|&id| (id, Bucket::empty(id))).collect();
        let mut tasks = HashMap::with_capacity(filtered.len());
        let mut roster = Vec::with_capacity(filtered.len());

        for task in filtered {
            let c = classify(&task, mode, today);
            if let Some(bucket) = buckets.get_mut(&c.bucket) {
                bucket.task_ids.push(task.id);
            }
            roster.push(task.id);
            tasks.insert(task.id, task);
        }

        let mut board = Self { mode, today, order, buckets, tasks, roster };
        board.enforce_sort_laws();
        board
    }

    /// Discards every bucket and reclassifies all known tasks under a new
    /// mode. No bucket assignment carries over.
    #[must_use]
    pub fn rebuilt(&self, mode: GroupMode, today: NaiveDate) -> Self {
        let filtered: Vec<Task> =
            self.roster.iter().filter_map(|id| self.tasks.get(id)).cloned().collect();
        Self::build(filtered, mode, today)
    }

    /// The active bucketing mode.
    #[must_use]
    pub fn mode(&self) -> GroupMode {
        self.mode
    }

    /// The reference day the board was classified against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Bucket identifiers in render order.
    #[must_use]
    pub fn bucket_order(&self) -> &[BucketId] {
        &self.order
    }

    /// Looks up one bucket.
    #[must_use]
    pub fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        self.buckets.get(&id)
    }

    /// Looks up one task's data.
    #[must_use]
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The bucket a task currently sits in.
    #[must_use]
    pub fn bucket_of(&self, task_id: u64) -> Option<BucketId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.buckets.get(id).is_some_and(|b| b.task_ids.contains(&task_id)))
    }

    /// All member task IDs, bucket by bucket in render order.
    #[must_use]
    pub fn flattened_ids(&self) -> Vec<u64> {
        self.order
            .iter()
            .filter_map(|id| self.buckets.get(id))
            .flat_map(|b| b.task_ids.iter().copied())
            .collect()
    }

    /// Takes the pre-mutation snapshot of one task.
    #[must_use]
    pub fn snapshot(&self, task_id: u64) -> Option<TaskSnapshot> {
        let task = self.tasks.get(&task_id)?.clone();
        let bucket = self.bucket_of(task_id)?;
        let index = self
            .buckets
            .get(&bucket)
            .and_then(|b| b.task_ids.iter().position(|&id| id == task_id))?;
        Some(TaskSnapshot { task, bucket, index })
    }

    /// Restores a task to its snapshotted data, bucket, and position.
    pub fn restore(&mut self, snapshot: TaskSnapshot) {
        let id = snapshot.task.id;
        self.detach(id);
        self.tasks.insert(id, snapshot.task);
        if let Some(bucket) = self.buckets.get_mut(&snapshot.bucket) {
            let at = snapshot.index.min(bucket.task_ids.len());
            bucket.task_ids.insert(at, id);
        }
        self.enforce_sort_laws();
    }

    /// Applies a field patch locally and reclassifies the task, moving it
    /// between buckets when the patch changes its classification.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is not on the board. The board is not
    /// modified in that case.
    pub fn apply_patch(&mut self, task_id: u64, patch: &TaskPatch) -> Result<(), String> {
        let task = self
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| format!("Task {task_id} is not on the board"))?;
        patch.apply_to(task);
        self.reclassify(task_id);
        Ok(())
    }

    /// Replaces a task with the server's authoritative copy and
    /// reclassifies it. Used after a committed mutation so that
    /// server-assigned fields win over the optimistic guess.
    pub fn absorb(&mut self, task: Task) {
        let id = task.id;
        if !self.tasks.contains_key(&id) {
            return;
        }
        self.tasks.insert(id, task);
        self.reclassify(id);
    }

    /// Moves a task within one bucket by list position.
    ///
    /// Buckets with an enforced date order immediately re-sort; the
    /// caller is told when the manual order was not honored.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket is not on this board or either
    /// position is out of range.
    pub fn reorder(
        &mut self,
        bucket_id: BucketId,
        from: usize,
        to: usize,
    ) -> Result<ReorderOutcome, String> {
        let bucket = self
            .buckets
            .get_mut(&bucket_id)
            .ok_or_else(|| format!("Bucket {} is not on this board", bucket_id.slug()))?;
        let len = bucket.task_ids.len();
        if from >= len || to >= len {
            return Err(format!("Reorder positions {from}->{to} out of range for {len} tasks"));
        }
        let id = bucket.task_ids.remove(from);
        bucket.task_ids.insert(to, id);

        if bucket_id.enforces_date_order() {
            let manual = bucket.task_ids.clone();
            self.enforce_sort_laws();
            let enforced =
                self.buckets.get(&bucket_id).map(|b| b.task_ids.clone()).unwrap_or_default();
            if enforced != manual {
                return Ok(ReorderOutcome::Resorted);
            }
        }
        Ok(ReorderOutcome::Applied)
    }

    /// Removes a task from the board entirely (bucket list, roster, and
    /// task record), e.g. after a remote delete.
    pub fn remove_task(&mut self, task_id: u64) {
        self.detach(task_id);
        self.tasks.remove(&task_id);
        self.roster.retain(|&id| id != task_id);
    }

    fn detach(&mut self, task_id: u64) {
        for bucket in self.buckets.values_mut() {
            bucket.task_ids.retain(|&id| id != task_id);
        }
    }

    fn reclassify(&mut self, task_id: u64) {
        let Some(task) = self.tasks.get(&task_id) else { return };
        let c = classify(task, self.mode, self.today);
        let current = self.bucket_of(task_id);
        if current != Some(c.bucket) {
            self.detach(task_id);
            if let Some(bucket) = self.buckets.get_mut(&c.bucket) {
                bucket.task_ids.push(task_id);
            }
        }
        self.enforce_sort_laws();
    }

    /// Re-applies the per-bucket ordering laws: date-ordered buckets sort
    /// ascending by due day, everything else keeps list order. The sort
    /// is stable, so ties keep their relative order.
    fn enforce_sort_laws(&mut self) {
        for bucket_id in &self.order {
            if !bucket_id.enforces_date_order() {
                continue;
            }
            if let Some(bucket) = self.buckets.get_mut(bucket_id) {
                bucket.task_ids.sort_by_key(|id| {
                    self.tasks
                        .get(id)
                        .and_then(Task::due_day)
                        .unwrap_or(NaiveDate::MIN)
                });
            }
        }
    }
}
