// Author: Dustin Pilgrim
// License: MIT

use crate::core::{info::Snapshot, state::State};

use super::{Manager, reconcile};

impl Manager {
    pub fn snapshot(&self, state: &State, now_ms: u64) -> Snapshot {
        let remaining_ms = if !state.is_active() {
            None
        } else if let Some(armed) = state.armed() {
            Some(armed.deadline_ms.saturating_sub(now_ms))
        } else {
            // Suspended: nothing is counting, derive it from the last action.
            let r = reconcile(state.interval_ms(), state.last_action_ms(), now_ms);
            Some(match r {
                super::Reconciled::Expired { .. } => 0,
                super::Reconciled::Remaining { remaining_ms } => remaining_ms,
            })
        };

        Snapshot {
            active: state.is_active(),
            suspended: state.is_suspended(),
            interval_ms: state.interval_ms(),
            last_action_ms: state.last_action_ms(),
            remaining_ms,
            tick_count: state.tick_count(),
        }
    }
}
