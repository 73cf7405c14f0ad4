// Author: Dustin Pilgrim
// License: MIT

//! Idle session timeout tracking.
//!
//! `core` holds the pure state machine, `monitor` drives it on a tokio task
//! with real timers, and `store` persists the last action instant across
//! suspension.

pub mod config;
pub mod core;
pub mod logging;
pub mod monitor;
pub mod store;

pub use crate::core::{
    config::MissingRecordPolicy,
    error::{ConfigError, Error},
    info::Snapshot,
};
pub use monitor::{Clock, IdleMonitor, SystemClock, TimeoutObserver};
pub use store::{FileStore, LastActionStore, MemoryStore, StoreError};
