//! Process-local snapshot store.

use super::{StoreResult, TaskStore};
use crate::model::task::TaskItem;
use log::debug;

/// Keeps the last saved snapshot in memory only.
///
/// An empty snapshot is indistinguishable from "never saved": both load as
/// `None`.
#[derive(Debug, Clone, Default)]
pub struct VolatileStore {
    items: Vec<TaskItem>,
}

impl VolatileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for VolatileStore {
    fn save(&mut self, items: &[TaskItem]) -> StoreResult<()> {
        self.items = items.to_vec();
        debug!(
            "event=store_save module=store status=ok backend=memory count={}",
            self.items.len()
        );
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<Vec<TaskItem>>> {
        if self.items.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.items.clone()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
