//! HTTP handlers for the task endpoints.

use super::{
    dto::{DetailResponse, ListTasksParams, TaskPayload, TaskResponse},
    error::ApiError,
};
use crate::task::{
    domain::{TaskId, TaskStats},
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use mockable::Clock;
use serde_json::{Value, json};

/// Shared handler state.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task service used by every handler.
    pub service: TaskLifecycleService<R, C>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wraps a task service.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self { service }
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// `GET /`
#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
    }))
}

/// `POST /tasks`
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state.service.create_task(payload.into()).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `GET /tasks`
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    Query(params): Query<ListTasksParams>,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let (query, page) = params.into_query()?;
    let tasks = state.service.list_tasks(query, page).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/stats`
pub async fn task_stats<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<TaskStats>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.service.get_stats().await?))
}

/// `GET /tasks/{id}`
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state.service.get_task(TaskId::new(id)).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PUT /tasks/{id}`
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .service
        .update_task(TaskId::new(id), payload.into())
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.service.delete_task(TaskId::new(id)).await?;
    Ok(Json(DetailResponse::new("Task deleted successfully")))
}
