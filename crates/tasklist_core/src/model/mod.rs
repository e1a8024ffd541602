//! Domain model for task-list records.
//!
//! # Responsibility
//! - Define the canonical task record shared by list, store and shell layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned at creation.
//! - Task titles are never empty.

pub mod task;
