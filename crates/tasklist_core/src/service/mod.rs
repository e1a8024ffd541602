//! Task use-case services.
//!
//! # Responsibility
//! - Wire the live task list to a snapshot store.
//! - Keep the shell decoupled from persistence details.

pub mod task_service;
