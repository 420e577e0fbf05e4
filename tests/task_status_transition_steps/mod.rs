//! Step definitions for task status transition scenarios.

pub mod given;
pub mod world;
