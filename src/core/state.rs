// Author: Dustin Pilgrim
// License: MIT

/// The live timer pair, as the state machine sees it.
///
/// Both timers are armed and cancelled together, so a single record covers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimers {
    pub epoch: u64,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone)]
pub struct State {
    // Idle threshold; fixed between two starts.
    interval_ms: u64,

    // True from start until stop or timeout (including while suspended).
    active: bool,

    // Host cannot run timers right now.
    suspended: bool,

    // Timing (ms since epoch)
    last_action_ms: u64,

    // Timer pair in memory, if any.
    armed: Option<ArmedTimers>,

    // Bumped on every arm/disarm; timer events from older epochs are stale.
    epoch: u64,

    // Ticks delivered since the pair was last armed.
    tick_count: u64,
}

impl State {
    pub fn new(now_ms: u64) -> Self {
        Self {
            interval_ms: 0,
            active: false,
            suspended: false,
            last_action_ms: now_ms,
            armed: None,
            epoch: 0,
            tick_count: 0,
        }
    }

    // ---------------- timers ----------------

    /// Arms a fresh timer pair and returns its epoch. The tick counter restarts at zero.
    pub fn arm_timers(&mut self, now_ms: u64, deadline_in_ms: u64) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.armed = Some(ArmedTimers {
            epoch: self.epoch,
            deadline_ms: now_ms.saturating_add(deadline_in_ms),
        });
        self.tick_count = 0;
        self.epoch
    }

    /// Forgets the timer pair. Returns whether one was armed.
    pub fn disarm_timers(&mut self) -> bool {
        let had = self.armed.take().is_some();
        if had {
            self.epoch = self.epoch.wrapping_add(1);
        }
        had
    }

    /// A timer event is only meaningful if it belongs to the pair that is armed right now.
    pub fn is_current_epoch(&self, epoch: u64) -> bool {
        self.armed.is_some_and(|a| a.epoch == epoch)
    }

    /// Take-and-advance the tick counter.
    pub fn next_tick(&mut self) -> u64 {
        let n = self.tick_count;
        self.tick_count = self.tick_count.saturating_add(1);
        n
    }

    // ---------------- getters ----------------

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn last_action_ms(&self) -> u64 {
        self.last_action_ms
    }

    pub fn armed(&self) -> Option<ArmedTimers> {
        self.armed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ---------------- setters ----------------

    pub fn set_interval_ms(&mut self, v: u64) {
        self.interval_ms = v;
    }

    pub fn set_active(&mut self, v: bool) {
        self.active = v;
    }

    pub fn set_suspended(&mut self, v: bool) {
        self.suspended = v;
    }

    pub fn mark_action(&mut self, now_ms: u64) {
        self.last_action_ms = now_ms;
    }
}
