// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at, sleep};

use super::msg::{MonitorMsg, TimerFired};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns the deadline + tick pair for one armed period.
///
/// The task only holds a weak sender so a forgotten timer never keeps the
/// monitor alive. It ends after the deadline fires or when aborted.
pub fn spawn_timer_pair(
    tx: WeakUnboundedSender<MonitorMsg>,
    epoch: u64,
    deadline_in: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let deadline = sleep(deadline_in);
        tokio::pin!(deadline);

        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Deadline wins a tie so no tick lands on the timeout instant.
                biased;

                _ = &mut deadline => {
                    send(&tx, TimerFired::Deadline { epoch });
                    break;
                }

                _ = ticker.tick() => {
                    if !send(&tx, TimerFired::Tick { epoch }) {
                        break;
                    }
                }
            }
        }
    })
}

fn send(tx: &WeakUnboundedSender<MonitorMsg>, fired: TimerFired) -> bool {
    match tx.upgrade() {
        Some(tx) => tx.send(MonitorMsg::Timer(fired)).is_ok(),
        None => {
            tracing::debug!(?fired, "timer stopping (monitor gone)");
            false
        }
    }
}
