// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

use super::{LastActionStore, StoreError};

/// In-process store. Clones share the same slot, so a host can keep one clone
/// to inspect what the monitor wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<DateTime<Local>>>>,
    saves: Arc<Mutex<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if a previous process had saved `at`.
    pub fn with_value(at: DateTime<Local>) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.slot.lock() {
            *slot = Some(at);
        }
        store
    }

    /// Number of successful `save` calls across all clones.
    pub fn save_count(&self) -> u64 {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }

    pub fn peek(&self) -> Option<DateTime<Local>> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

fn poisoned() -> StoreError {
    StoreError::Malformed("memory store lock poisoned".to_string())
}

impl LastActionStore for MemoryStore {
    fn save(&mut self, at: DateTime<Local>) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| poisoned())? = Some(at);
        *self.saves.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<DateTime<Local>>, StoreError> {
        Ok(*self.slot.lock().map_err(|_| poisoned())?)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| poisoned())? = None;
        Ok(())
    }
}
