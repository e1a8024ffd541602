//! In-memory task list ownership and mutation.
//!
//! # Responsibility
//! - Own the live ordered sequence of tasks for one process.
//! - Expose position-based add/toggle/delete and a printable listing.
//!
//! # Invariants
//! - The list never calls into a store; persistence is wired by `service`.

pub mod task_list;
