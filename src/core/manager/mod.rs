// Author: Dustin Pilgrim
// License: MIT

mod engine;
pub mod reconcile;
mod snapshot;

use crate::core::config::MissingRecordPolicy;

pub use reconcile::{Reconciled, reconcile};

/// Pure idle-timeout state machine.
///
/// Holds policy only; all mutable monitoring data lives in [`State`](crate::core::state::State)
/// so the runtime owns exactly one place that changes.
#[derive(Debug, Clone, Default)]
pub struct Manager {
    missing_record: MissingRecordPolicy,
}

impl Manager {
    pub fn new(missing_record: MissingRecordPolicy) -> Self {
        Self { missing_record }
    }

    pub fn missing_record(&self) -> MissingRecordPolicy {
        self.missing_record
    }
}
