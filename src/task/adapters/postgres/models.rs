//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Storage-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Progress status.
    pub status: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Progress status.
    pub status: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Changeset overwriting every mutable task column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Progress status.
    pub status: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
