//! Request and response bodies for the HTTP surface.

use crate::task::{
    domain::{PageRequest, Task, TaskDomainError, TaskPriority, TaskStatus},
    services::{TaskListQuery, TaskRequest},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
///
/// Priority and status are kept as raw JSON so that any supplied value,
/// including `null` or a number, reaches the business rules in their
/// order instead of failing at decoding time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskPayload {
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw priority; `high` when the field is absent.
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Value>,
    /// Raw status; `pending` when the field is absent.
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    /// Due date in `YYYY-MM-DD` form.
    pub due_date: NaiveDate,
    /// Optional completion timestamp.
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// Marks a field that appeared in the body, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn raw_text(value: Option<Value>, default: &str) -> String {
    match value {
        None => default.to_owned(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

/// Timestamp accepted with or without a UTC offset.
///
/// Values without an offset are read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// RFC 3339 timestamp carrying an offset.
    Zoned(DateTime<Utc>),
    /// Offset-free timestamp.
    Naive(NaiveDateTime),
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        match timestamp {
            Timestamp::Zoned(zoned) => zoned,
            Timestamp::Naive(naive) => naive.and_utc(),
        }
    }
}

impl From<TaskPayload> for TaskRequest {
    fn from(payload: TaskPayload) -> Self {
        let mut request = Self::new(payload.title, payload.due_date)
            .with_priority(raw_text(payload.priority, Self::DEFAULT_PRIORITY))
            .with_status(raw_text(payload.status, Self::DEFAULT_STATUS));
        if let Some(description) = payload.description {
            request = request.with_description(description);
        }
        if let Some(completed_at) = payload.completed_at {
            request = request.with_completed_at(completed_at.into());
        }
        request
    }
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksParams {
    /// Priority filter; empty means unfiltered.
    pub priority: Option<String>,
    /// Status filter; empty means unfiltered.
    pub status: Option<String>,
    /// Restrict to overdue tasks when `true`.
    pub overdue: Option<bool>,
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl ListTasksParams {
    /// Converts the raw parameters into a validated query and page window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] for unknown priority or status values and
    /// for out-of-range paging.
    pub fn into_query(self) -> Result<(TaskListQuery, PageRequest), TaskDomainError> {
        let priority = self
            .priority
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(TaskPriority::try_from)
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(TaskStatus::try_from)
            .transpose()?;
        let page = PageRequest::new(
            self.page.unwrap_or(PageRequest::DEFAULT_PAGE),
            self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
        )?;
        let query = TaskListQuery {
            priority,
            status,
            overdue: self.overdue.unwrap_or(false),
        };
        Ok((query, page))
    }
}

/// Task representation returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: TaskPriority,
    /// Progress status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            priority: task.priority(),
            status: task.status(),
            due_date: task.due_date(),
            completed_at: task.completed_at(),
        }
    }
}

/// Single-message body used for confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human-readable message.
    pub detail: String,
}

impl DetailResponse {
    /// Creates a detail body.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
