// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use chrono::{DateTime, Local};
use eyre::{Result, WrapErr};
use serde_json::{Value, json};

use idlegate::config::IdlegateConfig;
use idlegate::core::{
    config::MissingRecordPolicy,
    manager::{Reconciled, reconcile},
    utils::{format_duration, local_to_ms},
};
use idlegate::store::{FileStore, LastActionStore};

/// Offline view of what `resume` would decide right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub interval: Duration,
    pub last_action: Option<DateTime<Local>>,
    pub elapsed: Option<Duration>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Expired,
    Remaining(Duration),
    NoRecord(MissingRecordPolicy),
}

impl StatusReport {
    pub fn build(
        last_action: Option<DateTime<Local>>,
        now: DateTime<Local>,
        interval: Duration,
        policy: MissingRecordPolicy,
    ) -> Self {
        let interval_ms = interval.as_millis().min(u64::MAX as u128) as u64;

        let Some(at) = last_action else {
            return Self {
                interval,
                last_action: None,
                elapsed: None,
                outcome: Outcome::NoRecord(policy),
            };
        };

        let last_ms = local_to_ms(&at);
        let now_ms = local_to_ms(&now);
        let elapsed = Duration::from_millis(now_ms.saturating_sub(last_ms));

        let outcome = match reconcile(interval_ms, last_ms, now_ms) {
            Reconciled::Expired { .. } => Outcome::Expired,
            Reconciled::Remaining { remaining_ms } => {
                Outcome::Remaining(Duration::from_millis(remaining_ms))
            }
        };

        Self {
            interval,
            last_action: Some(at),
            elapsed: Some(elapsed),
            outcome,
        }
    }

    pub fn pretty(&self) -> String {
        let mut out = format!("interval: {}", format_duration(self.interval));

        match (&self.last_action, &self.elapsed) {
            (Some(at), Some(elapsed)) => {
                out.push_str(&format!(
                    "\nlast action: {}\nelapsed: {}",
                    at.format("%Y-%m-%d %H:%M:%S"),
                    format_duration(*elapsed)
                ));
            }
            _ => out.push_str("\nlast action: none recorded"),
        }

        let verdict = match self.outcome {
            Outcome::Expired => "expired (resume would time out)".to_string(),
            Outcome::Remaining(rem) => format!("{} remaining", format_duration(rem)),
            Outcome::NoRecord(MissingRecordPolicy::Timeout) => {
                "no record (resume would time out)".to_string()
            }
            Outcome::NoRecord(MissingRecordPolicy::AssumeNoElapsed) => {
                "no record (resume would restart the full interval)".to_string()
            }
        };
        out.push_str(&format!("\nstate: {verdict}"));
        out
    }

    pub fn to_json(&self) -> Value {
        let (state, remaining_ms) = match self.outcome {
            Outcome::Expired => ("expired", Some(0)),
            Outcome::Remaining(rem) => ("remaining", Some(rem.as_millis() as u64)),
            Outcome::NoRecord(_) => ("no_record", None),
        };

        json!({
            "interval_ms": self.interval.as_millis() as u64,
            "last_action": self.last_action.map(|t| t.to_rfc3339()),
            "elapsed_ms": self.elapsed.map(|d| d.as_millis() as u64),
            "state": state,
            "remaining_ms": remaining_ms,
        })
    }
}

pub fn status(cfg: &IdlegateConfig, json: bool) -> Result<()> {
    let store = FileStore::new(cfg.store_path());
    let last_action = store
        .load()
        .wrap_err_with(|| format!("failed to read {}", store.path().display()))?;

    let report = StatusReport::build(last_action, Local::now(), cfg.interval, cfg.missing_record);

    if json {
        println!("{}", report.to_json());
    } else {
        println!("store: {}", store.path().display());
        println!("{}", report.pretty());
    }
    Ok(())
}

pub fn reset(cfg: &IdlegateConfig) -> Result<()> {
    let mut store = FileStore::new(cfg.store_path());
    store
        .clear()
        .wrap_err_with(|| format!("failed to clear {}", store.path().display()))?;

    tracing::info!(path = %store.path().display(), "persisted last action cleared");
    println!("Persisted last action cleared");
    Ok(())
}
