//! Live task list and its position-based mutations.
//!
//! # Invariants
//! - Every held task has a unique id and a non-empty title.
//! - Indices are 0-based positions in the current sequence and shift after
//!   every delete.
//! - Failed operations leave the sequence untouched.

use crate::model::task::{TaskId, TaskItem, TaskValidationError};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const COMPLETED_GLYPH: &str = "✅";
const OPEN_GLYPH: &str = "⬜";
const EMPTY_LIST_LINE: &str = "No tasks yet.";

pub type ListResult<T> = Result<T, ListError>;

/// Rejections for list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    Validation(TaskValidationError),
    IndexOutOfRange { index: usize, len: usize },
    DuplicateId(TaskId),
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} task(s)")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id: {id}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<TaskValidationError> for ListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered, mutable collection of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    items: Vec<TaskItem>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an existing snapshot, e.g. one loaded from a store.
    ///
    /// # Errors
    /// - `ListError::DuplicateId` when two items share an id.
    pub fn from_items(items: Vec<TaskItem>) -> ListResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(ListError::DuplicateId(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// Appends a new open task.
    ///
    /// # Errors
    /// - `ListError::Validation(TaskValidationError::EmptyTitle)` when `title`
    ///   is empty; nothing is appended.
    pub fn add(&mut self, title: impl Into<String>) -> ListResult<TaskId> {
        let item = match TaskItem::new(title) {
            Ok(item) => item,
            Err(err) => {
                warn!("event=task_add module=list status=rejected reason={err}");
                return Err(err.into());
            }
        };
        let id = item.id();
        self.items.push(item);
        debug!(
            "event=task_add module=list status=ok id={id} len={}",
            self.items.len()
        );
        Ok(id)
    }

    /// Flips the completion flag at `index` and returns the new value.
    ///
    /// # Errors
    /// - `ListError::IndexOutOfRange` for a position past the end.
    pub fn toggle(&mut self, index: usize) -> ListResult<bool> {
        let len = self.items.len();
        let Some(item) = self.items.get_mut(index) else {
            warn!("event=task_toggle module=list status=rejected index={index} len={len}");
            return Err(ListError::IndexOutOfRange { index, len });
        };
        let completed = item.toggle();
        debug!(
            "event=task_toggle module=list status=ok id={} completed={completed}",
            item.id()
        );
        Ok(completed)
    }

    /// Removes and returns the task at `index`; later tasks shift down.
    ///
    /// # Errors
    /// - `ListError::IndexOutOfRange` for a position past the end.
    pub fn delete(&mut self, index: usize) -> ListResult<TaskItem> {
        let len = self.items.len();
        if index >= len {
            warn!("event=task_delete module=list status=rejected index={index} len={len}");
            return Err(ListError::IndexOutOfRange { index, len });
        }
        let removed = self.items.remove(index);
        debug!(
            "event=task_delete module=list status=ok id={} len={}",
            removed.id(),
            self.items.len()
        );
        Ok(removed)
    }

    /// Human-readable listing with 1-based positions.
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_LIST_LINE.to_string();
        }
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let glyph = if item.is_completed() {
                    COMPLETED_GLYPH
                } else {
                    OPEN_GLYPH
                };
                format!("{}. {glyph} {}", index + 1, item.title())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&TaskItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
