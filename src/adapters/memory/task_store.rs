//! In-memory adapter for the `TaskStore` port.
//!
//! Backs the engine tests and the CLI's demo mode. Failure injection
//! makes the next call error, which is how rollback paths are exercised
//! deterministically.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::model::{Priority, ProjectRef, Status, Task, TaskDraft, TaskPatch, UserRef};
use crate::ports::task_store::{StoreFuture, TaskStore};

/// Task store held entirely in memory.
pub struct InMemoryTaskStore {
    tasks: Mutex<HashMap<u64, Task>>,
    next_id: Mutex<u64>,
    fail_next: Mutex<Option<String>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a store holding the given tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let map = tasks.into_iter().map(|t| (t.id, t)).collect();
        Self {
            tasks: Mutex::new(map),
            next_id: Mutex::new(next_id),
            fail_next: Mutex::new(None),
        }
    }

    /// Creates a store seeded with the demo fixture, dated relative to
    /// `today` so every date bucket has something to show.
    #[must_use]
    pub fn seeded(today: NaiveDate) -> Self {
        Self::with_tasks(demo_tasks(today))
    }

    /// Makes the next store call fail with the given message.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().expect("fail_next lock poisoned") = Some(message.to_string());
    }

    /// Test/demo inspection: current copy of a task.
    #[must_use]
    pub fn task(&self, id: u64) -> Option<Task> {
        self.tasks.lock().expect("task store lock poisoned").get(&id).cloned()
    }

    fn take_failure(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let injected = self.fail_next.lock().expect("fail_next lock poisoned").take();
        match injected {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn list_tasks(&self) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move {
            self.take_failure()?;
            let tasks = self.tasks.lock().expect("task store lock poisoned");
            let mut all: Vec<Task> = tasks.values().cloned().collect();
            all.sort_by_key(|t| t.id);
            Ok(all)
        })
    }

    fn list_tasks_by_project(&self, project_id: u64) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move {
            self.take_failure()?;
            let tasks = self.tasks.lock().expect("task store lock poisoned");
            let mut matched: Vec<Task> = tasks
                .values()
                .filter(|t| t.project.as_ref().is_some_and(|p| p.id == project_id))
                .cloned()
                .collect();
            matched.sort_by_key(|t| t.id);
            Ok(matched)
        })
    }

    fn create_task(&self, draft: &TaskDraft) -> StoreFuture<'_, Task> {
        let draft = draft.clone();
        Box::pin(async move {
            self.take_failure()?;
            let id = {
                let mut next = self.next_id.lock().expect("next_id lock poisoned");
                let id = *next;
                *next += 1;
                id
            };
            let task = Task {
                id,
                title: draft.title,
                description: draft.description,
                status: draft.status,
                priority: draft.priority,
                due_date: draft.due_date,
                project: draft
                    .project_id
                    .map(|pid| ProjectRef { id: pid, name: format!("project {pid}") }),
                assignees: vec![],
                team_ids: draft.team_ids,
                elapsed_seconds: 0,
                created_at: Utc::now(),
            };
            self.tasks
                .lock()
                .expect("task store lock poisoned")
                .insert(id, task.clone());
            Ok(task)
        })
    }

    fn update_task(&self, id: u64, patch: &TaskPatch) -> StoreFuture<'_, Task> {
        let patch = patch.clone();
        Box::pin(async move {
            self.take_failure()?;
            let mut tasks = self.tasks.lock().expect("task store lock poisoned");
            let task = tasks
                .get_mut(&id)
                .ok_or_else(|| format!("Task {id} not found"))?;
            patch.apply_to(task);
            Ok(task.clone())
        })
    }

    fn delete_task(&self, id: u64) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.take_failure()?;
            let mut tasks = self.tasks.lock().expect("task store lock poisoned");
            tasks
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| format!("Task {id} not found").into())
        })
    }
}

fn demo_task(id: u64, title: &str, status: Status, priority: Priority) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date: None,
        project: Some(ProjectRef { id: 1, name: "Atlas".into() }),
        assignees: vec![],
        team_ids: vec![],
        elapsed_seconds: 0,
        created_at: Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).single().unwrap_or_else(Utc::now),
    }
}

fn at_noon(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_opt(12, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// The demo fixture: a small team's board with every bucket populated.
fn demo_tasks(today: NaiveDate) -> Vec<Task> {
    let day = |offset: i64| {
        today
            .checked_add_signed(chrono::Duration::days(offset))
            .and_then(at_noon)
    };
    let ana = UserRef { id: 10, name: "Ana".into() };
    let bruno = UserRef { id: 11, name: "Bruno".into() };

    let mut t1 = demo_task(101, "Revisar proposta comercial", Status::Todo, Priority::High);
    t1.due_date = day(-3);
    t1.assignees = vec![ana.clone()];
    t1.team_ids = vec![5];

    let mut t2 = demo_task(102, "Atualizar contrato do cliente", Status::InProgress, Priority::Medium);
    t2.due_date = day(0);
    t2.assignees = vec![bruno.clone()];
    t2.team_ids = vec![5];

    let mut t3 = demo_task(103, "Planejar proxima sprint", Status::Pending, Priority::Medium);
    t3.due_date = day(1);
    t3.team_ids = vec![7];

    let mut t4 = demo_task(104, "Publicar release 2.4", Status::InReview, Priority::Urgent);
    t4.due_date = day(5);
    t4.assignees = vec![ana, bruno];
    t4.team_ids = vec![7];

    let mut t5 = demo_task(105, "Enviar fatura de maio", Status::Done, Priority::Low);
    t5.due_date = day(-1);
    t5.team_ids = vec![5];

    let t6 = demo_task(106, "Organizar backlog", Status::Todo, Priority::Low);

    vec![t1, t2, t3, t4, t5, t6]
}
