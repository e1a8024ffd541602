//! Task item domain model.
//!
//! # Responsibility
//! - Define the record persisted in task snapshots.
//! - Validate titles and identities on construction and on decode.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never empty.
//! - Wire shape is `{"id", "title", "isCompleted"}` in that field order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a task item.
pub type TaskId = Uuid;

/// Validation failures for task construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::NilId => write!(f, "task id cannot be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskItemRecord")]
pub struct TaskItem {
    id: TaskId,
    title: String,
    #[serde(rename = "isCompleted")]
    completed: bool,
}

impl TaskItem {
    /// Creates an open task with a freshly generated id.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when `title` is empty.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, false)
    }

    /// Rebuilds a task whose identity already exists, e.g. from a snapshot.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` for `Uuid::nil()`.
    /// - `TaskValidationError::EmptyTitle` when `title` is empty.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        let item = Self {
            id,
            title: title.into(),
            completed,
        };
        item.validate()?;
        Ok(item)
    }

    fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Unvalidated wire form; every decoded item passes through `TaskItem::with_id`.
#[derive(Deserialize)]
struct TaskItemRecord {
    id: TaskId,
    title: String,
    #[serde(rename = "isCompleted")]
    completed: bool,
}

impl TryFrom<TaskItemRecord> for TaskItem {
    type Error = TaskValidationError;

    fn try_from(value: TaskItemRecord) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.title, value.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskItem, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn toggle_is_an_involution() {
        let mut item = TaskItem::new("water plants").unwrap();
        assert!(item.toggle());
        assert!(!item.toggle());
        assert!(!item.is_completed());
    }

    #[test]
    fn with_id_rejects_nil_id() {
        let err = TaskItem::with_id(Uuid::nil(), "x", false).unwrap_err();
        assert_eq!(err, TaskValidationError::NilId);
    }
}
