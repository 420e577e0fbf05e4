//! HTTP surface over the task service.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | `GET` | `/` | Liveness greeting |
//! | `POST` | `/tasks` | Create a task |
//! | `GET` | `/tasks` | List tasks with filters and paging |
//! | `GET` | `/tasks/stats` | Aggregate counts |
//! | `GET` | `/tasks/{id}` | Fetch one task |
//! | `PUT` | `/tasks/{id}` | Replace a task |
//! | `DELETE` | `/tasks/{id}` | Delete a task |

mod dto;
mod error;
mod handlers;
mod routes;

pub use dto::{DetailResponse, ListTasksParams, TaskPayload, TaskResponse, Timestamp};
pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{router, serve};
