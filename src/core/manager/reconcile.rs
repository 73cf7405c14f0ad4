// Author: Dustin Pilgrim
// License: MIT

/// Outcome of bridging a period in which no timer could run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The interval ran out while nobody was counting.
    Expired { overdue_ms: u64 },

    /// Still inside the interval; re-arm for what is left.
    Remaining { remaining_ms: u64 },
}

/// Elapsed time since `last_action_ms`, clamped at zero when the clock went backward.
pub fn elapsed_since(last_action_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(last_action_ms)
}

/// Decides between an immediate timeout and a shortened countdown.
///
/// `elapsed >= interval` is expired; an exact hit counts as expired.
pub fn reconcile(interval_ms: u64, last_action_ms: u64, now_ms: u64) -> Reconciled {
    let elapsed = elapsed_since(last_action_ms, now_ms);

    if elapsed >= interval_ms {
        Reconciled::Expired {
            overdue_ms: elapsed - interval_ms,
        }
    } else {
        Reconciled::Remaining {
            remaining_ms: interval_ms - elapsed,
        }
    }
}
