// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use serde_json::{Value, json};

use crate::core::utils::{format_duration, ms_to_local};

/// Point-in-time view of the monitor for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub active: bool,
    pub suspended: bool,
    pub interval_ms: u64,
    pub last_action_ms: u64,

    /// Time left before timeout; `None` while monitoring is stopped.
    pub remaining_ms: Option<u64>,

    /// Ticks delivered since the countdown was last armed.
    pub tick_count: u64,
}

impl Snapshot {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_ms.map(Duration::from_millis)
    }

    pub fn status_word(&self) -> &'static str {
        match (self.active, self.suspended) {
            (false, _) => "stopped",
            (true, true) => "suspended",
            (true, false) => "active",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_word(),
            "interval_ms": self.interval_ms,
            "last_action": ms_to_local(self.last_action_ms).map(|t| t.to_rfc3339()),
            "remaining_ms": self.remaining_ms,
            "tick_count": self.tick_count,
        })
    }

    pub fn pretty(&self) -> String {
        let last = ms_to_local(self.last_action_ms)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut out = format!(
            "status: {}\ninterval: {}\nlast action: {}",
            self.status_word(),
            format_duration(self.interval()),
            last
        );

        if let Some(rem) = self.remaining() {
            out.push_str(&format!("\nremaining: {}", format_duration(rem)));
        }

        out
    }
}
