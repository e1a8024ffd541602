//! Snapshot persistence contracts and backends.
//!
//! # Responsibility
//! - Define the backend-agnostic `TaskStore` capability.
//! - Provide in-memory and JSON-file implementations.
//!
//! # Invariants
//! - `save` replaces the whole snapshot; there are no partial updates.
//! - `load` never mutates backing storage.
//! - Failures are returned and logged, never raised as panics.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::model::task::TaskItem;

pub mod file_store;
pub mod volatile_store;

pub use file_store::FileStore;
pub use volatile_store::VolatileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by a store backend.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Corrupt { path, source } => write!(
                f,
                "task snapshot `{}` is not a valid task array: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}

/// Persistence capability for full task snapshots.
pub trait TaskStore {
    /// Replaces any previously persisted snapshot with `items`, in order.
    fn save(&mut self, items: &[TaskItem]) -> StoreResult<()>;

    /// Returns the last saved snapshot, or `None` when nothing is stored.
    fn load(&self) -> StoreResult<Option<Vec<TaskItem>>>;

    /// Short backend label for diagnostics.
    fn describe(&self) -> String;

    /// Moves an unreadable snapshot out of the way so the next `save` cannot
    /// overwrite it. Returns where it was moved, or `None` when the backend
    /// has nothing to preserve.
    fn set_aside(&mut self) -> StoreResult<Option<PathBuf>> {
        Ok(None)
    }
}

impl<S: TaskStore + ?Sized> TaskStore for Box<S> {
    fn save(&mut self, items: &[TaskItem]) -> StoreResult<()> {
        (**self).save(items)
    }

    fn load(&self) -> StoreResult<Option<Vec<TaskItem>>> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn set_aside(&mut self) -> StoreResult<Option<PathBuf>> {
        (**self).set_aside()
    }
}
