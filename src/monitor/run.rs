// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use crate::core::{
    action::Action,
    events::Event,
    manager::Manager,
    state::State,
    utils::{local_to_ms, ms_to_local},
};
use crate::store::LastActionStore;

use super::msg::{MonitorMsg, TimerFired};
use super::observer::{Clock, TimeoutObserver};
use super::timers::spawn_timer_pair;

/// Sole owner of the monitoring state. Every operation and timer fire is
/// applied here, one message at a time.
pub struct Runner {
    manager: Manager,
    state: State,

    store: Box<dyn LastActionStore>,
    clock: Arc<dyn Clock>,
    observer: Option<Arc<dyn TimeoutObserver>>,

    tx: WeakUnboundedSender<MonitorMsg>,
    timers: Option<JoinHandle<()>>,

    // Last persist did not reach the store; the in-memory instant is authoritative.
    persist_failed: bool,
}

impl Runner {
    pub fn new(
        manager: Manager,
        store: Box<dyn LastActionStore>,
        clock: Arc<dyn Clock>,
        tx: WeakUnboundedSender<MonitorMsg>,
    ) -> Self {
        let now_ms = clock.now_ms();
        Self {
            manager,
            state: State::new(now_ms),
            store,
            clock,
            observer: None,
            tx,
            timers: None,
            persist_failed: false,
        }
    }

    pub async fn run(mut self, mut rx: UnboundedReceiver<MonitorMsg>) {
        info!(missing_record = %self.manager.missing_record(), "monitor task started");

        while let Some(msg) = rx.recv().await {
            let now_ms = self.clock.now_ms();

            match msg {
                MonitorMsg::Start { interval_ms, observer } => {
                    self.observer = Some(observer);
                    self.dispatch(Event::Start { interval_ms, now_ms });
                }

                MonitorMsg::Stop => self.dispatch(Event::Stop { now_ms }),

                MonitorMsg::RecordAction => self.dispatch(Event::UserAction { now_ms }),

                MonitorMsg::Suspend => self.dispatch(Event::Suspend { now_ms }),

                MonitorMsg::Resume => {
                    // Only touch the store when the resume can actually matter.
                    let persisted_ms = if !(self.state.is_active() && self.state.is_suspended()) {
                        None
                    } else if self.persist_failed {
                        warn!("last persist failed; reconciling from the in-memory last action");
                        Some(self.state.last_action_ms())
                    } else {
                        self.load_persisted()
                    };
                    self.dispatch(Event::Resume { persisted_ms, now_ms });
                }

                MonitorMsg::Timer(TimerFired::Deadline { epoch }) => {
                    self.dispatch(Event::DeadlineElapsed { epoch, now_ms });
                }

                MonitorMsg::Timer(TimerFired::Tick { epoch }) => {
                    self.dispatch(Event::TickElapsed { epoch, now_ms });
                }

                MonitorMsg::GetSnapshot { reply } => {
                    let _ = reply.send(self.manager.snapshot(&self.state, now_ms));
                }

                MonitorMsg::Shutdown => {
                    info!("monitor stopping (shutdown requested)");
                    break;
                }
            }
        }

        self.cancel_timers();
        debug!("monitor task exited");
    }

    fn dispatch(&mut self, event: Event) {
        match self.manager.handle_event(&mut self.state, event) {
            Ok(actions) => {
                for action in actions {
                    self.exec_action(action);
                }
            }
            Err(e) => warn!("event rejected: {e}"),
        }
    }

    fn exec_action(&mut self, action: Action) {
        match action {
            Action::ArmTimers { epoch, deadline_in_ms } => {
                // Never two pairs alive at once.
                self.cancel_timers();
                self.timers = Some(spawn_timer_pair(
                    self.tx.clone(),
                    epoch,
                    Duration::from_millis(deadline_in_ms),
                ));
                debug!(epoch, deadline_in_ms, "timers armed");
            }

            Action::CancelTimers => self.cancel_timers(),

            Action::PersistLastAction { at_ms } => {
                let Some(at) = ms_to_local(at_ms) else {
                    error!(at_ms, "last action instant out of range; not persisted");
                    self.persist_failed = true;
                    return;
                };
                match self.store.save(at) {
                    Ok(()) => self.persist_failed = false,
                    Err(e) => {
                        error!("failed to persist last action: {e}");
                        self.persist_failed = true;
                    }
                }
            }

            Action::NotifyTimeout => {
                if let Some(observer) = self.observer.clone() {
                    observer.on_timeout();
                }
            }

            Action::NotifyTick { elapsed_secs } => {
                if let Some(observer) = self.observer.clone() {
                    observer.on_tick(elapsed_secs);
                }
            }
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.timers.take() {
            handle.abort();
        }
    }

    /// Store failures are logged and treated like a missing record.
    fn load_persisted(&self) -> Option<u64> {
        match self.store.load() {
            Ok(Some(at)) => Some(local_to_ms(&at)),
            Ok(None) => None,
            Err(e) => {
                warn!("failed to read persisted last action: {e}");
                None
            }
        }
    }
}
