// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use tracing::debug;

use super::{LAST_ACTION_KEY, LastActionStore, StoreError, decode_timestamp, encode_timestamp};

/// JSON object file acting as a tiny key/value store.
///
/// Only [`LAST_ACTION_KEY`] is owned by the monitor; other keys are left alone.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/idlegate/state.json`, or a relative fallback without a data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("idlegate")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Malformed("top level is not an object".to_string())),
            Err(err) => Err(StoreError::Malformed(err.to_string())),
        }
    }

    fn write_map(&self, map: Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(&Value::Object(map))
            .map_err(|err| StoreError::Malformed(err.to_string()))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl LastActionStore for FileStore {
    fn save(&mut self, at: DateTime<Local>) -> Result<(), StoreError> {
        // An unreadable file is replaced rather than blocking suspension.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(LAST_ACTION_KEY.to_string(), Value::String(encode_timestamp(&at)));
        self.write_map(map)?;

        debug!(path = %self.path.display(), "last action saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<DateTime<Local>>, StoreError> {
        let map = self.read_map()?;

        match map.get(LAST_ACTION_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => decode_timestamp(raw).map(Some),
            Some(other) => Err(StoreError::BadTimestamp(other.to_string())),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(LAST_ACTION_KEY).is_none() {
            return Ok(());
        }
        self.write_map(map)
    }
}
