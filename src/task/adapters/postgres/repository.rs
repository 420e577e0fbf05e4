//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        NewTask, PageRequest, PersistedTaskData, Task, TaskFilter, TaskId, TaskPriority,
        TaskStats, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied by [`PostgresTaskRepository::ensure_schema`].
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// This blocks until the pool has established its initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// connect.
    pub fn connect(database_url: &str, max_size: u32) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the `tasks` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        let stored = self
            .run_blocking(move |connection| {
                let row = diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                row_to_task(row)
            })
            .await?;
        debug!(task_id = %stored.id(), "inserted task row");
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let lookup_filter = *filter;
        let offset = i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = i64::from(page.limit());
        self.run_blocking(move |connection| {
            let rows = filtered_tasks(&lookup_filter)
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .offset(offset)
                .limit(limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let lookup_filter = *filter;
        self.run_blocking(move |connection| {
            count_matching(connection, &lookup_filter).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn stats(&self, today: NaiveDate) -> TaskRepositoryResult<TaskStats> {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .repeatable_read()
                .read_only()
                .run(|snapshot| {
                    let all = TaskFilter::all();
                    Ok::<_, diesel::result::Error>(TaskStats {
                        total: count_matching(snapshot, &all)?,
                        pending: count_matching(snapshot, &all.with_status(TaskStatus::Pending))?,
                        in_progress: count_matching(
                            snapshot,
                            &all.with_status(TaskStatus::InProgress),
                        )?,
                        completed: count_matching(
                            snapshot,
                            &all.with_status(TaskStatus::Completed),
                        )?,
                        overdue: count_matching(snapshot, &all.overdue_as_of(today))?,
                        high_priority_pending: count_matching(
                            snapshot,
                            &TaskFilter::high_priority_pending(),
                        )?,
                    })
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await?;
        debug!(%task_id, "updated task row");
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let removed = self
            .run_blocking(move |connection| {
                let affected = diesel::delete(tasks::table.find(id.into_inner()))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                Ok(affected > 0)
            })
            .await?;
        debug!(task_id = %id, removed, "deleted task row");
        Ok(removed)
    }
}

/// Counts rows matching `filter` on an open connection.
///
/// Counts are never negative, so a failed conversion clamps to zero.
fn count_matching(
    connection: &mut PgConnection,
    filter: &TaskFilter,
) -> Result<u64, diesel::result::Error> {
    let total = filtered_tasks(filter)
        .count()
        .get_result::<i64>(connection)?;
    Ok(u64::try_from(total).unwrap_or_default())
}

/// Builds a boxed query restricted by every populated filter criterion.
fn filtered_tasks(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table.into_boxed();
    if let Some(priority) = filter.priority() {
        query = query.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(status) = filter.status() {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(today) = filter.overdue_reference() {
        query = query
            .filter(tasks::due_date.lt(today))
            .filter(tasks::status.ne(TaskStatus::Completed.as_str()));
    }
    query
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.as_str().to_owned(),
        status: task.status.as_str().to_owned(),
        due_date: task.due_date,
        completed_at: task.completed_at,
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        due_date,
        completed_at,
    } = row;

    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        priority,
        status,
        due_date,
        completed_at,
    }))
}
