//! Core task-list logic.
//! This crate owns the task record, the live list and snapshot persistence.

pub mod list;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use list::task_list::{ListError, ListResult, TaskList};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{TaskId, TaskItem, TaskValidationError};
pub use service::task_service::{
    LoadError, LoadFailure, ServiceError, ServiceResult, TaskService,
};
pub use store::file_store::{default_data_dir, SET_ASIDE_SUFFIX, SNAPSHOT_FILE_NAME};
pub use store::{FileStore, StoreError, StoreResult, TaskStore, VolatileStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
