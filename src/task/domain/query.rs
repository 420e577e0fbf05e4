//! Filtering, paging, and aggregate types for task queries.

use super::{Task, TaskDomainError, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conjunctive filter over the task table.
///
/// Every populated criterion must hold for a task to match. The overdue
/// criterion carries the reference date so repositories never consult a
/// clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    overdue_as_of: Option<NaiveDate>,
}

impl TaskFilter {
    /// Returns a filter matching every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            priority: None,
            status: None,
            overdue_as_of: None,
        }
    }

    /// Returns the filter that defines the high priority quota.
    #[must_use]
    pub const fn high_priority_pending() -> Self {
        Self::all()
            .with_priority(TaskPriority::High)
            .with_status(TaskStatus::Pending)
    }

    /// Restricts matches to the given priority.
    #[must_use]
    pub const fn with_priority(self, priority: TaskPriority) -> Self {
        Self {
            priority: Some(priority),
            ..self
        }
    }

    /// Restricts matches to the given status.
    #[must_use]
    pub const fn with_status(self, status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    /// Restricts matches to tasks due before `today` that are not completed.
    #[must_use]
    pub const fn overdue_as_of(self, today: NaiveDate) -> Self {
        Self {
            overdue_as_of: Some(today),
            ..self
        }
    }

    /// Returns the priority criterion.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the status criterion.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the reference date of the overdue criterion.
    #[must_use]
    pub const fn overdue_reference(&self) -> Option<NaiveDate> {
        self.overdue_as_of
    }

    /// Evaluates the filter against a task in memory.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.is_none_or(|priority| task.priority() == priority)
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .overdue_as_of
                .is_none_or(|today| task.is_overdue(today))
    }
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page used when the caller supplies none.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the caller supplies none.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a pagination window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPage`] when `page` is zero and
    /// [`TaskDomainError::InvalidLimit`] when `limit` is outside
    /// `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, TaskDomainError> {
        if page == 0 {
            return Err(TaskDomainError::InvalidPage(page));
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(TaskDomainError::InvalidLimit {
                limit,
                max: Self::MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of rows preceding this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Aggregate task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: u64,
    /// Tasks in [`TaskStatus::Pending`].
    pub pending: u64,
    /// Tasks in [`TaskStatus::InProgress`].
    pub in_progress: u64,
    /// Tasks in [`TaskStatus::Completed`].
    pub completed: u64,
    /// Open tasks whose due date has passed.
    pub overdue: u64,
    /// Tasks counting towards the high priority quota.
    pub high_priority_pending: u64,
}

impl TaskStats {
    /// Adds one task to the tallies, judging overdue against `today`.
    pub fn record(&mut self, task: &Task, today: NaiveDate) {
        self.total += 1;
        match task.status() {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
        if task.is_overdue(today) {
            self.overdue += 1;
        }
        if task.is_high_priority_pending() {
            self.high_priority_pending += 1;
        }
    }
}
