// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::core::info::Snapshot;

use super::observer::TimeoutObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerFired {
    Deadline { epoch: u64 },
    Tick { epoch: u64 },
}

pub enum MonitorMsg {
    Start {
        interval_ms: u64,
        observer: Arc<dyn TimeoutObserver>,
    },
    Stop,
    RecordAction,
    Suspend,
    Resume,

    Timer(TimerFired),

    GetSnapshot { reply: oneshot::Sender<Snapshot> },

    Shutdown,
}

impl fmt::Debug for MonitorMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorMsg::Start { interval_ms, .. } => f
                .debug_struct("Start")
                .field("interval_ms", interval_ms)
                .finish_non_exhaustive(),
            MonitorMsg::Stop => f.write_str("Stop"),
            MonitorMsg::RecordAction => f.write_str("RecordAction"),
            MonitorMsg::Suspend => f.write_str("Suspend"),
            MonitorMsg::Resume => f.write_str("Resume"),
            MonitorMsg::Timer(t) => f.debug_tuple("Timer").field(t).finish(),
            MonitorMsg::GetSnapshot { .. } => f.write_str("GetSnapshot"),
            MonitorMsg::Shutdown => f.write_str("Shutdown"),
        }
    }
}
