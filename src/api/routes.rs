//! Router assembly and server start-up.

use super::handlers::{
    AppState, create_task, delete_task, get_task, list_tasks, root, task_stats, update_task,
};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::{Router, routing::get};
use mockable::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the task router around a service.
pub fn router<R, C>(service: TaskLifecycleService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route(
            "/tasks",
            get(list_tasks::<R, C>).post(create_task::<R, C>),
        )
        .route("/tasks/stats", get(task_stats::<R, C>))
        .route(
            "/tasks/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(service))
}

/// Serves the task router on `address` until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error when the listener cannot bind or the server fails.
pub async fn serve<R, C>(address: &str, service: TaskLifecycleService<R, C>) -> std::io::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let listener = TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, "listening for task requests");
    axum::serve(listener, router(service)).await
}
