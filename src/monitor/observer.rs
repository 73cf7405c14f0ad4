// Author: Dustin Pilgrim
// License: MIT

/// Receives idle notifications from the monitor.
///
/// Both callbacks run on the monitor task. Calling back into the monitor from
/// here is allowed: the call is queued and applied after the callback returns,
/// and by then a timeout has already deactivated monitoring.
pub trait TimeoutObserver: Send + Sync {
    /// The interval passed with no monitored action. Fired at most once per armed period.
    fn on_timeout(&self);

    /// Foreground progress, roughly once a second. Counts from zero after every (re)arm.
    fn on_tick(&self, elapsed_secs: u64);
}

/// Wall-clock source for the monitor.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        crate::core::utils::now_ms()
    }
}
