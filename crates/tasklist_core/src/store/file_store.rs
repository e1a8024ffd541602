//! JSON file snapshot store.
//!
//! # Responsibility
//! - Persist task snapshots as a bare JSON array in one file.
//! - Resolve the default per-user location of that file.
//!
//! # Invariants
//! - Writes go through a same-directory temp file renamed over the target,
//!   so a failed save leaves the previous file content in place.
//! - A missing file loads as `None`; an unreadable or malformed file is an
//!   error, not an empty list.
//! - No cross-process locking.

use super::{StoreError, StoreResult, TaskStore};
use crate::model::task::TaskItem;
use log::{error, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "todos.json";
/// Suffix appended to a snapshot that failed to load.
pub const SET_ASIDE_SUFFIX: &str = "corrupt";
const MAX_SET_ASIDE_SLOTS: usize = 100;
const APP_DIR_NAME: &str = "tasklist";

/// Returns the per-user application data directory, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `path` as the snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `dir/todos.json` as the snapshot file.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SNAPSHOT_FILE_NAME))
    }

    /// Uses the default per-user location, or `None` when the platform
    /// exposes no data directory.
    pub fn at_default_location() -> Option<Self> {
        default_data_dir().map(Self::in_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| self.io_error(dir, source))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| self.io_error(dir, source))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| self.io_error(tmp.path(), source))?;
        tmp.persist(&self.path)
            .map_err(|err| self.io_error(&self.path, err.error))?;
        Ok(())
    }

    /// First free `<path>.corrupt`, `<path>.corrupt.1`, ... name.
    fn set_aside_target(&self) -> Option<PathBuf> {
        let base = self.path.as_os_str().to_os_string();
        (0..MAX_SET_ASIDE_SLOTS)
            .map(|slot| {
                let mut name = base.clone();
                name.push(".");
                name.push(SET_ASIDE_SUFFIX);
                if slot > 0 {
                    name.push(format!(".{slot}"));
                }
                PathBuf::from(name)
            })
            .find(|candidate| !candidate.exists())
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl TaskStore for FileStore {
    fn save(&mut self, items: &[TaskItem]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = serde_json::to_vec_pretty(items)
            .map_err(StoreError::Encode)
            .and_then(|bytes| self.write_snapshot(&bytes));

        match &result {
            Ok(()) => info!(
                "event=store_save module=store status=ok backend=file count={} duration_ms={}",
                items.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error backend=file path={} duration_ms={} error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn load(&self) -> StoreResult<Option<Vec<TaskItem>>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=store_load module=store status=absent backend=file");
                return Ok(None);
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error backend=file error_code=read_failed path={} error={}",
                    self.path.display(),
                    source
                );
                return Err(self.io_error(&self.path, source));
            }
        };

        match serde_json::from_slice::<Vec<TaskItem>>(&bytes) {
            Ok(items) => {
                info!(
                    "event=store_load module=store status=ok backend=file count={}",
                    items.len()
                );
                Ok(Some(items))
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error backend=file error_code=corrupt path={} error={}",
                    self.path.display(),
                    source
                );
                Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn set_aside(&mut self) -> StoreResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let Some(target) = self.set_aside_target() else {
            error!(
                "event=store_set_aside module=store status=error backend=file error_code=no_free_slot path={}",
                self.path.display()
            );
            return Err(self.io_error(
                &self.path,
                std::io::Error::new(ErrorKind::AlreadyExists, "no free set-aside file name"),
            ));
        };
        if let Err(source) = std::fs::rename(&self.path, &target) {
            error!(
                "event=store_set_aside module=store status=error backend=file path={} error={}",
                self.path.display(),
                source
            );
            return Err(self.io_error(&self.path, source));
        }
        info!(
            "event=store_set_aside module=store status=ok backend=file target={}",
            target.display()
        );
        Ok(Some(target))
    }
}
