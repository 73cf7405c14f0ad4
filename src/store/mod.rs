// Author: Dustin Pilgrim
// License: MIT

//! Persistence adapter for the last action instant.
//!
//! The monitor only touches the store across suspend/resume: `save` on suspend,
//! `load` on resume. Everything else stays in memory.

mod file;
mod memory;

use std::fmt;
use std::io;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed key the timestamp is stored under.
pub const LAST_ACTION_KEY: &str = "last_action_time";

/// Key/value contract the monitor depends on.
///
/// Implementations must be synchronous: `save` has returned by the time the
/// host is allowed to suspend.
pub trait LastActionStore: Send {
    /// Overwrites the stored instant.
    fn save(&mut self, at: DateTime<Local>) -> Result<(), StoreError>;

    /// Returns the stored instant, `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<DateTime<Local>>, StoreError>;

    /// Drops the stored instant.
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Malformed(String),
    BadTimestamp(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Malformed(msg) => write!(f, "store file is malformed: {msg}"),
            StoreError::BadTimestamp(raw) => write!(f, "unparseable timestamp '{raw}'"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

/// Local timestamp with offset and millisecond precision.
pub fn encode_timestamp(at: &DateTime<Local>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
}

/// Accepts RFC 3339, or a naive local `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn decode_timestamp(raw: &str) -> Result<DateTime<Local>, StoreError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| StoreError::BadTimestamp(raw.to_string()))?;

    // Ambiguous local times (DST fold) resolve to the earlier instant.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| StoreError::BadTimestamp(raw.to_string()))
}
