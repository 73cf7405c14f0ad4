// Author: Dustin Pilgrim
// License: MIT

/// Effects requested by the state machine. The runtime decides how to carry them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace any live timer pair with a fresh one tagged `epoch`.
    ///
    /// The deadline fires once after `deadline_in_ms`; the tick timer fires every
    /// second until the pair is cancelled or the deadline passes.
    ArmTimers {
        epoch: u64,
        deadline_in_ms: u64,
    },

    /// Drop the live timer pair, if any.
    CancelTimers,

    /// Write the last action instant to the persistence adapter.
    PersistLastAction {
        at_ms: u64,
    },

    /// Tell the observer the session went idle.
    NotifyTimeout,

    /// Foreground progress for the observer.
    NotifyTick {
        elapsed_secs: u64,
    },
}
