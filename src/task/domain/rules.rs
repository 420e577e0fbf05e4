//! Field-level business rules shared by task creation and update.

use super::TaskDomainError;
use chrono::NaiveDate;

/// Maximum number of tasks that may be high priority and pending at once.
pub const HIGH_PRIORITY_PENDING_LIMIT: u64 = 5;

/// Maximum title length, matching the `tasks.title` column width.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum description length, matching the `tasks.description` column width.
pub const MAX_DESCRIPTION_CHARS: usize = 250;

/// Ensures a due date lies strictly after `today`.
///
/// # Errors
///
/// Returns [`TaskDomainError::DueDateNotInFuture`] when `due_date` is today
/// or earlier.
pub fn ensure_due_date_in_future(
    due_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), TaskDomainError> {
    if due_date <= today {
        return Err(TaskDomainError::DueDateNotInFuture { due_date, today });
    }
    Ok(())
}

/// Ensures another task may become high priority and pending.
///
/// `pending_high` is the number of other tasks already holding that
/// combination.
///
/// # Errors
///
/// Returns [`TaskDomainError::HighPriorityQuotaExceeded`] when the quota is
/// already used up.
pub const fn ensure_high_priority_capacity(pending_high: u64) -> Result<(), TaskDomainError> {
    if pending_high >= HIGH_PRIORITY_PENDING_LIMIT {
        return Err(TaskDomainError::HighPriorityQuotaExceeded {
            limit: HIGH_PRIORITY_PENDING_LIMIT,
        });
    }
    Ok(())
}

/// Validates and normalizes a task title.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyTitle`] for blank titles and
/// [`TaskDomainError::TitleTooLong`] past [`MAX_TITLE_CHARS`].
pub fn validate_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_TITLE_CHARS {
        return Err(TaskDomainError::TitleTooLong {
            max: MAX_TITLE_CHARS,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}

/// Validates an optional task description.
///
/// # Errors
///
/// Returns [`TaskDomainError::DescriptionTooLong`] past
/// [`MAX_DESCRIPTION_CHARS`].
pub fn validate_description(
    description: Option<String>,
) -> Result<Option<String>, TaskDomainError> {
    let Some(text) = description else {
        return Ok(None);
    };
    let actual = text.chars().count();
    if actual > MAX_DESCRIPTION_CHARS {
        return Err(TaskDomainError::DescriptionTooLong {
            max: MAX_DESCRIPTION_CHARS,
            actual,
        });
    }
    Ok(Some(text))
}
