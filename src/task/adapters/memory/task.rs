//! In-memory repository for task tracking tests and ephemeral runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, PageRequest, Task, TaskFilter, TaskId, TaskStats},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a counter starting at 1 and are never
/// reused, mirroring a database sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn to_usize(value: u64) -> TaskRepositoryResult<usize> {
    usize::try_from(value).map_err(TaskRepositoryError::persistence)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.last_id += 1;
        let stored = task.clone().into_task(TaskId::new(state.last_id));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let offset = to_usize(page.offset())?;
        let limit = to_usize(u64::from(page.limit()))?;
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let state = self.read()?;
        let matching = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .count();
        u64::try_from(matching).map_err(TaskRepositoryError::persistence)
    }

    async fn stats(&self, today: NaiveDate) -> TaskRepositoryResult<TaskStats> {
        let state = self.read()?;
        let mut stats = TaskStats::default();
        for task in state.tasks.values() {
            stats.record(task, today);
        }
        Ok(stats)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }
}
