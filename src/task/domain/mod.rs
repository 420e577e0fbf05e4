//! Domain model for task tracking.
//!
//! The domain owns the task aggregate, its priority and status vocabularies,
//! the status transition table, and the field rules applied on create and
//! update. Infrastructure concerns stay outside this boundary.

mod error;
mod ids;
mod priority;
mod query;
pub mod rules;
mod status;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use query::{PageRequest, TaskFilter, TaskStats};
pub use status::{TaskStatus, TransitionEffect};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
