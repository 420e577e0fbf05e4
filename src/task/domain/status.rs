//! Task status values and the status transition table.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished. Terminal for reverts.
    Completed,
}

/// Side effect attached to an accepted status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Nothing beyond the status change itself.
    None,
    /// `completed_at` must be stamped with the current time.
    StampCompletion,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Evaluates a requested status change against the transition table.
    ///
    /// Only `pending -> in_progress` and `in_progress -> completed` are
    /// accepted; the latter stamps the completion time. Staying in the same
    /// status is a rejected transition like any other unlisted pair.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CannotRevertCompleted`] when a completed
    /// task is moved back to an open status, and
    /// [`TaskDomainError::InvalidStatusTransition`] for every other
    /// combination outside the table.
    pub const fn plan_transition(self, target: Self) -> Result<TransitionEffect, TaskDomainError> {
        match (self, target) {
            (Self::Pending, Self::InProgress) => Ok(TransitionEffect::None),
            (Self::InProgress, Self::Completed) => Ok(TransitionEffect::StampCompletion),
            (Self::Completed, Self::Pending | Self::InProgress) => {
                Err(TaskDomainError::CannotRevertCompleted { to: target })
            }
            (from, to) => Err(TaskDomainError::InvalidStatusTransition { from, to }),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskDomainError::InvalidStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
