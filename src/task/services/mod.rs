//! Application services for task orchestration.

mod lifecycle;

pub use lifecycle::{
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskListQuery, TaskRequest,
};
