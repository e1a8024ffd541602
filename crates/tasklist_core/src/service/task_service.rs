//! Persistent task list service.
//!
//! # Responsibility
//! - Load the stored snapshot once at startup.
//! - Save the full snapshot after every successful mutation.
//!
//! # Invariants
//! - Rejected mutations never trigger a save.
//! - A failed save is reported to the caller but the in-memory mutation
//!   stays applied.
//! - A failed or inconsistent load starts the session from an empty list,
//!   after the unreadable snapshot has been set aside. If it cannot be set
//!   aside, saves are refused for the whole session so it is never
//!   overwritten.

use crate::list::task_list::{ListError, TaskList};
use crate::model::task::{TaskId, TaskItem};
use crate::store::{StoreError, TaskStore};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// The list rejected the operation; nothing changed.
    List(ListError),
    /// The list changed but the snapshot could not be saved.
    Store(StoreError),
    /// The list changed but saving is disabled after a failed load.
    SavesDisabled,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to save tasks: {err}"),
            Self::SavesDisabled => write!(
                f,
                "changes are not saved because the existing task file could not be loaded"
            ),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::List(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::SavesDisabled => None,
        }
    }
}

impl From<ListError> for ServiceError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Why the stored snapshot could not be adopted at open.
#[derive(Debug)]
pub enum LoadError {
    Store(StoreError),
    Inconsistent(ListError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Inconsistent(err) => write!(f, "inconsistent task snapshot: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Inconsistent(err) => Some(err),
        }
    }
}

/// A failed load and what happened to the unreadable snapshot.
#[derive(Debug)]
pub struct LoadFailure {
    pub error: LoadError,
    /// Where the snapshot was moved, when the backend kept a copy.
    pub set_aside: Option<PathBuf>,
    /// Present when moving the snapshot failed; saves are then disabled.
    pub set_aside_error: Option<StoreError>,
}

impl LoadFailure {
    pub fn saves_disabled(&self) -> bool {
        self.set_aside_error.is_some()
    }

    pub fn set_aside_path(&self) -> Option<&Path> {
        self.set_aside.as_deref()
    }
}

/// Task list bound to a snapshot store.
pub struct TaskService<S: TaskStore> {
    list: TaskList,
    store: S,
    load_failure: Option<LoadFailure>,
}

impl<S: TaskStore> TaskService<S> {
    /// Opens a session, seeding the list from the store's last snapshot.
    ///
    /// A snapshot that cannot be adopted is set aside and reported through
    /// `load_failure()`; the session then starts empty.
    pub fn open(mut store: S) -> Self {
        let loaded = match store.load() {
            Ok(Some(items)) => TaskList::from_items(items).map_err(LoadError::Inconsistent),
            Ok(None) => Ok(TaskList::new()),
            Err(err) => Err(LoadError::Store(err)),
        };

        let (list, load_failure) = match loaded {
            Ok(list) => (list, None),
            Err(error) => {
                error!(
                    "event=session_open module=service status=error backend={} error={}",
                    store.describe(),
                    error
                );
                let failure = match store.set_aside() {
                    Ok(set_aside) => LoadFailure {
                        error,
                        set_aside,
                        set_aside_error: None,
                    },
                    Err(err) => {
                        error!(
                            "event=session_open module=service status=saves_disabled backend={}",
                            store.describe()
                        );
                        LoadFailure {
                            error,
                            set_aside: None,
                            set_aside_error: Some(err),
                        }
                    }
                };
                (TaskList::new(), Some(failure))
            }
        };

        info!(
            "event=session_open module=service status=ok backend={} count={}",
            store.describe(),
            list.len()
        );
        Self {
            list,
            store,
            load_failure,
        }
    }

    /// Adds a task and saves the snapshot.
    pub fn add(&mut self, title: impl Into<String>) -> ServiceResult<TaskId> {
        let id = self.list.add(title)?;
        self.persist()?;
        Ok(id)
    }

    /// Toggles the task at `index` and saves the snapshot.
    pub fn toggle(&mut self, index: usize) -> ServiceResult<bool> {
        let completed = self.list.toggle(index)?;
        self.persist()?;
        Ok(completed)
    }

    /// Deletes the task at `index` and saves the snapshot.
    pub fn delete(&mut self, index: usize) -> ServiceResult<TaskItem> {
        let removed = self.list.delete(index)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn render(&self) -> String {
        self.list.render()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The load failure seen at `open`, if any.
    pub fn load_failure(&self) -> Option<&LoadFailure> {
        self.load_failure.as_ref()
    }

    fn persist(&mut self) -> ServiceResult<()> {
        if self
            .load_failure
            .as_ref()
            .is_some_and(LoadFailure::saves_disabled)
        {
            return Err(ServiceError::SavesDisabled);
        }
        self.store.save(self.list.items())?;
        Ok(())
    }
}
