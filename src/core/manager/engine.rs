// Author: Dustin Pilgrim
// License: MIT

use tracing::{debug, info, warn};

use crate::core::{
    action::Action,
    config::MissingRecordPolicy,
    error::{ConfigError, Error},
    events::Event,
    state::State,
};

use super::{Manager, Reconciled, reconcile};

impl Manager {
    pub fn handle_event(&mut self, state: &mut State, event: Event) -> Result<Vec<Action>, Error> {
        let now_ms = event.now_ms();

        // Timer events from a cancelled pair may still be queued; drop them here.
        if let Some(epoch) = event.timer_epoch() {
            if !state.is_active() || state.is_suspended() || !state.is_current_epoch(epoch) {
                debug!(epoch, current = state.epoch(), "stale timer event ignored");
                return Ok(Vec::new());
            }
        }

        let mut out = Vec::new();

        match event {
            Event::Start { interval_ms, .. } => {
                if interval_ms == 0 {
                    return Err(Error::InvalidConfig(ConfigError::NonPositiveInterval));
                }

                if state.disarm_timers() {
                    out.push(Action::CancelTimers);
                }

                state.set_interval_ms(interval_ms);
                state.mark_action(now_ms);
                state.set_suspended(false);
                state.set_active(true);

                out.push(Self::arm(state, now_ms, interval_ms));
                info!(interval_ms, "monitoring started");
            }

            Event::Stop { .. } => {
                if !state.is_active() {
                    return Ok(out);
                }

                if state.disarm_timers() {
                    out.push(Action::CancelTimers);
                }
                state.set_active(false);
                state.set_suspended(false);
                info!("monitoring stopped");
            }

            Event::UserAction { .. } => {
                // Actions while stopped must not silently re-arm monitoring.
                if !state.is_active() {
                    return Ok(out);
                }

                state.mark_action(now_ms);

                if state.is_suspended() {
                    // No timers while suspended; keep the persisted instant in step instead.
                    out.push(Action::PersistLastAction { at_ms: now_ms });
                    return Ok(out);
                }

                if state.disarm_timers() {
                    out.push(Action::CancelTimers);
                }
                let interval_ms = state.interval_ms();
                out.push(Self::arm(state, now_ms, interval_ms));
                debug!("action recorded, countdown restarted");
            }

            Event::Suspend { .. } => {
                if state.disarm_timers() {
                    out.push(Action::CancelTimers);
                }

                // Persisting while stopped would leave a stale instant behind.
                if !state.is_active() {
                    return Ok(out);
                }

                state.set_suspended(true);
                out.push(Action::PersistLastAction {
                    at_ms: state.last_action_ms(),
                });
                info!(last_action_ms = state.last_action_ms(), "monitoring suspended");
            }

            Event::Resume { persisted_ms, .. } => {
                if !state.is_active() {
                    return Ok(out);
                }

                if !state.is_suspended() {
                    debug!("resume without suspend ignored (timers already running)");
                    return Ok(out);
                }

                state.set_suspended(false);

                if state.disarm_timers() {
                    out.push(Action::CancelTimers);
                }

                let last_action_ms = match persisted_ms {
                    Some(ms) => ms,
                    None => match self.missing_record {
                        MissingRecordPolicy::Timeout => {
                            warn!("no persisted last action on resume; timing out");
                            Self::expire(state, &mut out);
                            return Ok(out);
                        }
                        MissingRecordPolicy::AssumeNoElapsed => {
                            warn!("no persisted last action on resume; assuming no time elapsed");
                            now_ms
                        }
                    },
                };

                if last_action_ms > now_ms {
                    warn!(
                        last_action_ms,
                        now_ms, "persisted last action is in the future; clock moved backward"
                    );
                }

                state.mark_action(last_action_ms);

                match reconcile(state.interval_ms(), last_action_ms, now_ms) {
                    Reconciled::Expired { overdue_ms } => {
                        info!(overdue_ms, "interval elapsed while suspended");
                        Self::expire(state, &mut out);
                    }
                    Reconciled::Remaining { remaining_ms } => {
                        info!(remaining_ms, "monitoring resumed");
                        out.push(Self::arm(state, now_ms, remaining_ms));
                    }
                }
            }

            Event::DeadlineElapsed { .. } => {
                info!("idle deadline reached");
                Self::expire(state, &mut out);
            }

            Event::TickElapsed { .. } => {
                let elapsed_secs = state.next_tick();
                out.push(Action::NotifyTick { elapsed_secs });
            }
        }

        Ok(out)
    }

    fn arm(state: &mut State, now_ms: u64, deadline_in_ms: u64) -> Action {
        let epoch = state.arm_timers(now_ms, deadline_in_ms);
        Action::ArmTimers {
            epoch,
            deadline_in_ms,
        }
    }

    /// Deactivates before notifying, so re-entry from the observer sees a stopped monitor.
    fn expire(state: &mut State, out: &mut Vec<Action>) {
        if state.disarm_timers() {
            out.push(Action::CancelTimers);
        }
        state.set_active(false);
        state.set_suspended(false);
        out.push(Action::NotifyTimeout);
    }
}
