// Author: Dustin Pilgrim
// License: MIT

//! Runtime side of the idle monitor.
//!
//! [`IdleMonitor`] is a cheap, cloneable handle. The state itself lives on a
//! single tokio task ([`run::Runner`]) which applies operations and timer fires
//! in the order they were queued.

mod msg;
mod observer;
mod run;
mod timers;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::core::{
    config::MissingRecordPolicy,
    error::{ConfigError, Error},
    info::Snapshot,
    manager::Manager,
};
use crate::store::LastActionStore;

use msg::MonitorMsg;
use run::Runner;

pub use observer::{Clock, SystemClock, TimeoutObserver};
pub use timers::TICK_PERIOD;

#[derive(Clone, Debug)]
pub struct IdleMonitor {
    tx: mpsc::UnboundedSender<MonitorMsg>,
}

impl IdleMonitor {
    /// Spawns the monitor task on the current tokio runtime.
    pub fn spawn<S>(store: S, clock: Arc<dyn Clock>, missing_record: MissingRecordPolicy) -> Self
    where
        S: LastActionStore + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Runner::new(
            Manager::new(missing_record),
            Box::new(store),
            clock,
            tx.downgrade(),
        );
        tokio::spawn(runner.run(rx));
        Self { tx }
    }

    pub fn with_system_clock<S>(store: S, missing_record: MissingRecordPolicy) -> Self
    where
        S: LastActionStore + 'static,
    {
        Self::spawn(store, Arc::new(SystemClock), missing_record)
    }

    /// Arms monitoring. Restarting while active replaces the interval and observer.
    pub fn start(&self, interval: Duration, observer: Arc<dyn TimeoutObserver>) -> Result<(), Error> {
        let interval_ms = interval_to_ms(interval)?;
        self.send(MonitorMsg::Start { interval_ms, observer });
        Ok(())
    }

    pub fn stop(&self) {
        self.send(MonitorMsg::Stop);
    }

    /// Restarts the countdown. Ignored while monitoring is stopped.
    pub fn record_action(&self) {
        self.send(MonitorMsg::RecordAction);
    }

    /// Host is about to lose the ability to run timers.
    pub fn suspend(&self) {
        self.send(MonitorMsg::Suspend);
    }

    /// Host can run timers again; reconciles against the persisted instant.
    pub fn resume(&self) {
        self.send(MonitorMsg::Resume);
    }

    /// Current state. Returns once everything queued before it has been applied,
    /// so it doubles as a barrier. `None` if the monitor task is gone.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(MonitorMsg::GetSnapshot { reply });
        rx.await.ok()
    }

    /// Cancels timers and ends the monitor task. Later calls are dropped.
    pub fn shutdown(&self) {
        self.send(MonitorMsg::Shutdown);
    }

    fn send(&self, msg: MonitorMsg) {
        if let Err(e) = self.tx.send(msg) {
            debug!(msg = ?e.0, "monitor task gone; message dropped");
        }
    }
}

/// Rejects zero and intervals too large for a millisecond count.
pub fn interval_to_ms(interval: Duration) -> Result<u64, Error> {
    let ms = interval.as_millis();
    if ms == 0 {
        return Err(Error::InvalidConfig(ConfigError::NonPositiveInterval));
    }
    u64::try_from(ms).map_err(|_| Error::InvalidConfig(ConfigError::IntervalOverflow))
}
