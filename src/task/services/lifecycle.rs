//! Service layer for task creation, update, lookup, and reporting.

use crate::task::{
    domain::{
        NewTask, PageRequest, Task, TaskChanges, TaskDomainError, TaskFilter, TaskId,
        TaskPriority, TaskStats, TaskStatus, TransitionEffect, rules,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Request payload shared by task creation and full task updates.
///
/// Priority and status arrive as raw strings so that unknown values are
/// reported in rule order rather than at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    due_date: NaiveDate,
    completed_at: Option<DateTime<Utc>>,
}

impl TaskRequest {
    /// Priority applied when the caller supplies none.
    pub const DEFAULT_PRIORITY: &'static str = "high";
    /// Status applied when the caller supplies none.
    pub const DEFAULT_STATUS: &'static str = "pending";

    /// Creates a request with required fields and default priority/status.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Self::DEFAULT_PRIORITY.to_owned(),
            status: Self::DEFAULT_STATUS.to_owned(),
            due_date,
            completed_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the raw status value.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets a caller-supplied completion timestamp.
    ///
    /// Honoured on creation only; updates derive it from the transition.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }
}

/// Criteria for listing tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Only open tasks whose due date has passed.
    pub overdue: bool,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// A business rule rejected the request.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// No task exists with the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` when a business rule turned the request down, as
    /// opposed to a missing task or a storage failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task orchestration service.
///
/// Mutating operations run their check-then-write sequence under a write
/// gate shared by every clone, so the high priority quota and the status
/// transition table hold against concurrent requests in this process.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    write_gate: Arc<Mutex<()>>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            write_gate: Arc::clone(&self.write_gate),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a task after validating it against the business rules.
    ///
    /// Checks run in order and the first failure wins: due date, priority,
    /// high priority quota (only for high priority), status, then title and
    /// description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when a rule rejects the request
    /// and [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: TaskRequest) -> TaskLifecycleResult<Task> {
        let _gate = self.write_gate.lock().await;
        let today = self.today();

        let new_task = self
            .validate_new_task(request, today)
            .await
            .inspect_err(|err| {
                if err.is_rejection() {
                    warn!(error = %err, "rejected task creation");
                }
            })?;
        let task = self.repository.insert(&new_task).await?;
        info!(task_id = %task.id(), priority = %task.priority(), status = %task.status(), "created task");
        Ok(task)
    }

    /// Replaces every mutable field of an existing task.
    ///
    /// Field rules run as for creation, followed by the status transition
    /// table. A task that itself counts towards the high priority quota is
    /// not counted against its own update. `completed_at` is stamped on
    /// `in_progress -> completed` and cleared on any other accepted
    /// transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] when a rule or the transition
    /// table rejects the request, and [`TaskLifecycleError::Repository`]
    /// when persistence fails.
    pub async fn update_task(&self, id: TaskId, request: TaskRequest) -> TaskLifecycleResult<Task> {
        let _gate = self.write_gate.lock().await;
        let mut task = self.require_task(id).await?;
        let today = self.today();

        let (changes, effect) = self
            .validate_changes(&task, request, today)
            .await
            .inspect_err(|err| {
                if err.is_rejection() {
                    warn!(task_id = %id, error = %err, "rejected task update");
                }
            })?;
        let from = task.status();
        task.apply_changes(changes, effect, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %id, %from, to = %task.status(), "updated task");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let _gate = self.write_gate.lock().await;
        if !self.repository.delete(id).await? {
            return Err(TaskLifecycleError::NotFound(id));
        }
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.require_task(id).await
    }

    /// Lists one page of tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_tasks(
        &self,
        query: TaskListQuery,
        page: PageRequest,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let filter = self.filter_for(query);
        let tasks = self.repository.list(&filter, page).await?;
        debug!(
            returned = tasks.len(),
            page = page.page(),
            limit = page.limit(),
            "listed tasks"
        );
        Ok(tasks)
    }

    /// Computes aggregate task counts from a single repository snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when a count fails.
    pub async fn get_stats(&self) -> TaskLifecycleResult<TaskStats> {
        let stats = self.repository.stats(self.today()).await?;
        debug!(total = stats.total, overdue = stats.overdue, "computed task stats");
        Ok(stats)
    }

    async fn validate_new_task(
        &self,
        request: TaskRequest,
        today: NaiveDate,
    ) -> TaskLifecycleResult<NewTask> {
        let TaskRequest {
            title,
            description,
            priority: raw_priority,
            status: raw_status,
            due_date,
            completed_at,
        } = request;

        rules::ensure_due_date_in_future(due_date, today)?;
        let priority = TaskPriority::try_from(raw_priority.as_str())?;
        if priority.is_high() {
            let pending_high = self
                .repository
                .count(&TaskFilter::high_priority_pending())
                .await?;
            rules::ensure_high_priority_capacity(pending_high)?;
        }
        let status = TaskStatus::try_from(raw_status.as_str())?;

        Ok(NewTask {
            title: rules::validate_title(&title)?,
            description: rules::validate_description(description)?,
            priority,
            status,
            due_date,
            completed_at,
        })
    }

    async fn validate_changes(
        &self,
        current: &Task,
        request: TaskRequest,
        today: NaiveDate,
    ) -> TaskLifecycleResult<(TaskChanges, TransitionEffect)> {
        let TaskRequest {
            title,
            description,
            priority: raw_priority,
            status: raw_status,
            due_date,
            ..
        } = request;

        rules::ensure_due_date_in_future(due_date, today)?;
        let priority = TaskPriority::try_from(raw_priority.as_str())?;
        if priority.is_high() {
            let counted = self
                .repository
                .count(&TaskFilter::high_priority_pending())
                .await?;
            let others = if current.is_high_priority_pending() {
                counted.saturating_sub(1)
            } else {
                counted
            };
            rules::ensure_high_priority_capacity(others)?;
        }
        let status = TaskStatus::try_from(raw_status.as_str())?;
        let effect = current.status().plan_transition(status)?;

        let changes = TaskChanges {
            title: rules::validate_title(&title)?,
            description: rules::validate_description(description)?,
            priority,
            status,
            due_date,
        };
        Ok((changes, effect))
    }

    async fn require_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    fn filter_for(&self, query: TaskListQuery) -> TaskFilter {
        let mut filter = TaskFilter::all();
        if let Some(priority) = query.priority {
            filter = filter.with_priority(priority);
        }
        if let Some(status) = query.status {
            filter = filter.with_status(status);
        }
        if query.overdue {
            filter = filter.overdue_as_of(self.today());
        }
        filter
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
