//! tasktrack: a task-tracking service.
//!
//! Clients create, list, filter, update, and delete task records subject to
//! a small set of business rules: due dates must lie in the future, at most
//! five high priority tasks may be pending at once, and status changes follow
//! a fixed transition table.
//!
//! # Architecture
//!
//! tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task domain, repository port and adapters, and service
//! - [`api`]: HTTP surface over the task service
//! - [`config`]: Environment-driven process configuration

pub mod api;
pub mod config;
pub mod task;
