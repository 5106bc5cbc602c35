//! Shared service plumbing for the LabDesk platform.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
