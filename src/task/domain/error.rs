//! Error types for task domain validation and parsing.

use super::TaskStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures raised by task business rules.
///
/// Every variant is a client-side rejection; none of them is raised after a
/// write has been attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The due date is not strictly after the current date.
    #[error("invalid due date: {due_date} must be after {today}")]
    DueDateNotInFuture {
        /// Requested due date.
        due_date: NaiveDate,
        /// Date the request was evaluated on.
        today: NaiveDate,
    },

    /// The priority value is not one of the supported levels.
    #[error("invalid priority '{0}', expected low, medium or high")]
    InvalidPriority(String),

    /// Too many high priority tasks are already pending.
    #[error("high-priority quota exceeded: at most {limit} high priority tasks may be pending")]
    HighPriorityQuotaExceeded {
        /// Configured quota.
        limit: u64,
    },

    /// The status value is not one of the supported states.
    #[error("invalid status '{0}', expected pending, in_progress or completed")]
    InvalidStatus(String),

    /// A completed task was asked to move back to an open state.
    #[error("cannot revert from completed to {to}")]
    CannotRevertCompleted {
        /// Requested status.
        to: TaskStatus,
    },

    /// The requested status change is not in the transition table.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The title is empty after trimming.
    #[error("invalid title: title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("invalid title: {actual} characters exceeds the maximum of {max}")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Submitted length in characters.
        actual: usize,
    },

    /// The description exceeds the persisted column width.
    #[error("invalid description: {actual} characters exceeds the maximum of {max}")]
    DescriptionTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Submitted length in characters.
        actual: usize,
    },

    /// The page number is below one.
    #[error("invalid page {0}, expected at least 1")]
    InvalidPage(u32),

    /// The page size is outside the accepted window.
    #[error("invalid limit {limit}, expected between 1 and {max}")]
    InvalidLimit {
        /// Requested page size.
        limit: u32,
        /// Largest accepted page size.
        max: u32,
    },
}
