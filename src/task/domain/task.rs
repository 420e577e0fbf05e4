//! Task aggregate root and its construction parameter objects.

use super::{TaskId, TaskPriority, TaskStatus, TransitionEffect};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: NaiveDate,
    completed_at: Option<DateTime<Utc>>,
}

/// Validated task data that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: TaskPriority,
    /// Initial status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp supplied at creation, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Binds the storage-assigned identifier, producing the stored aggregate.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
            completed_at: self.completed_at,
        })
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated replacement values for the mutable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: String,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: TaskPriority,
    /// New status, already checked against the transition table.
    pub status: TaskStatus,
    /// New due date.
    pub due_date: NaiveDate,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task counts towards the high priority quota.
    #[must_use]
    pub const fn is_high_priority_pending(&self) -> bool {
        self.priority.is_high() && matches!(self.status, TaskStatus::Pending)
    }

    /// Returns `true` when the task is still open and its due date is before
    /// `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.status != TaskStatus::Completed
    }

    /// Overwrites every mutable field with validated changes.
    ///
    /// `completed_at` is derived from the transition effect: stamped with the
    /// clock's current time on completion and cleared otherwise.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        effect: TransitionEffect,
        clock: &impl Clock,
    ) {
        let TaskChanges {
            title,
            description,
            priority,
            status,
            due_date,
        } = changes;
        self.title = title;
        self.description = description;
        self.priority = priority;
        self.status = status;
        self.due_date = due_date;
        self.completed_at = match effect {
            TransitionEffect::StampCompletion => Some(clock.utc()),
            TransitionEffect::None => None,
        };
    }
}
