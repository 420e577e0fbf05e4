//! Mapping of service errors onto HTTP responses.

use super::dto::DetailResponse;
use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskLifecycleError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] TaskLifecycleError);

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self(TaskLifecycleError::Domain(err))
    }
}

impl ApiError {
    /// Returns the status code the error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            TaskLifecycleError::Domain(_) => StatusCode::BAD_REQUEST,
            TaskLifecycleError::NotFound(_)
            | TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            TaskLifecycleError::Repository(TaskRepositoryError::Persistence(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!(error = %self.0, "task storage failure");
            "internal storage error".to_owned()
        } else {
            self.0.to_string()
        };
        (status, Json(DetailResponse::new(detail))).into_response()
    }
}
