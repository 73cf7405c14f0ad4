// Author: Dustin Pilgrim
// License: MIT

/// Inputs to the idle state machine.
///
/// Every event carries the wall-clock instant it happened at, in milliseconds
/// since the Unix epoch. The core never reads a clock on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Arm monitoring for `interval_ms` of inactivity.
    Start {
        interval_ms: u64,
        now_ms: u64,
    },

    /// Disarm monitoring without notifying.
    Stop {
        now_ms: u64,
    },

    /// A monitored action happened.
    UserAction {
        now_ms: u64,
    },

    /// Host can no longer run timers.
    Suspend {
        now_ms: u64,
    },

    /// Host can run timers again. `persisted_ms` is whatever the store
    /// returned for the last action instant (`None` when there was no record).
    Resume {
        persisted_ms: Option<u64>,
        now_ms: u64,
    },

    /// The deadline timer armed under `epoch` elapsed.
    DeadlineElapsed {
        epoch: u64,
        now_ms: u64,
    },

    /// The tick timer armed under `epoch` fired.
    TickElapsed {
        epoch: u64,
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::Start { now_ms, .. }
            | Event::Stop { now_ms }
            | Event::UserAction { now_ms }
            | Event::Suspend { now_ms }
            | Event::Resume { now_ms, .. }
            | Event::DeadlineElapsed { now_ms, .. }
            | Event::TickElapsed { now_ms, .. } => *now_ms,
        }
    }

    /// Timer-originated events are tagged with the epoch they were armed under.
    pub fn timer_epoch(&self) -> Option<u64> {
        match self {
            Event::DeadlineElapsed { epoch, .. } | Event::TickElapsed { epoch, .. } => Some(*epoch),
            _ => None,
        }
    }
}
