//! Task tracking for tasktrack.
//!
//! Tasks carry a title, priority, status, and due date. Creation and update
//! are guarded by a due-date rule, a cap on simultaneously pending high
//! priority tasks, and a status transition table. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
