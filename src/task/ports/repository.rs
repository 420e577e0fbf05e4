//! Repository port for task persistence, lookup, and aggregate counts.

use crate::task::domain::{NewTask, PageRequest, Task, TaskFilter, TaskId, TaskStats};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations store a single task table. They enforce no business
/// rules; the service validates before calling any mutating method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the write.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of tasks matching `filter`, ordered by identifier.
    async fn list(&self, filter: &TaskFilter, page: PageRequest)
    -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks matching `filter`.
    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64>;

    /// Computes every aggregate count from one consistent view of the table.
    ///
    /// Tasks due before `today` that are not completed count as overdue.
    async fn stats(&self, today: NaiveDate) -> TaskRepositoryResult<TaskStats>;

    /// Persists every mutable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task. Returns `true` when a record existed.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
