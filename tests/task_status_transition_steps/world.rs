//! Shared world state for task status transition BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use rstest::fixture;
use tasktrack::task::{
    domain::Task,
    services::{TaskLifecycleError, TaskRequest},
};

use crate::test_helpers::{MemoryService, TestClock, memory_service};

/// Scenario world for task transition behaviour tests.
pub struct TaskTransitionWorld {
    pub service: MemoryService,
    pub clock: Arc<TestClock>,
    pub base_request: Option<TaskRequest>,
    pub task: Option<Task>,
    pub last_update: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskTransitionWorld {
    /// Creates a world with an empty in-memory service.
    #[must_use]
    pub fn new() -> Self {
        let (service, clock) = memory_service();
        Self {
            service,
            clock,
            base_request: None,
            task: None,
            last_update: None,
        }
    }

    /// Returns the task created by the scenario background.
    pub fn created_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }

    /// Returns the current instant of the scenario clock.
    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Builds an update request that only differs from creation in status.
    pub fn request_with_status(&self, status: &str) -> Result<TaskRequest, eyre::Report> {
        let base = self
            .base_request
            .clone()
            .ok_or_else(|| eyre::eyre!("missing base request in scenario world"))?;
        Ok(base.with_status(status))
    }
}

impl Default for TaskTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskTransitionWorld {
    TaskTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
