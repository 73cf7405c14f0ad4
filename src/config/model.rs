// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::MissingRecordPolicy;

/// One minute of inactivity.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlegateConfig {
    pub interval: Duration,
    pub missing_record: MissingRecordPolicy,

    /// Overrides the default store location.
    pub store_path: Option<PathBuf>,
}

impl Default for IdlegateConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            missing_record: MissingRecordPolicy::default(),
            store_path: None,
        }
    }
}

impl IdlegateConfig {
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(crate::store::FileStore::default_path)
    }
}
