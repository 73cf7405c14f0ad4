// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr, eyre};
use rune_cfg::RuneConfig;

use crate::core::{config::MissingRecordPolicy, utils::parse_duration};

use super::model::IdlegateConfig;

/// Parses the `idlegate` block. Unset keys keep their defaults.
pub fn parse_idlegate_config(config: &RuneConfig) -> Result<IdlegateConfig> {
    let mut out = IdlegateConfig::default();

    // Bare numbers are seconds; strings may carry units.
    let interval = config
        .get::<u64>("idlegate.interval")
        .map(|secs| secs.to_string())
        .or_else(|_| config.get::<String>("idlegate.interval"))
        .ok();

    if let Some(raw) = interval {
        out.interval = parse_interval(&raw)?;
    }

    let missing_record = config
        .get::<String>("idlegate.missing_record")
        .or_else(|_| config.get::<String>("idlegate.missing-record"))
        .ok();

    if let Some(raw) = missing_record {
        out.missing_record = parse_missing_record(&raw)?;
    }

    out.store_path = config
        .get::<String>("idlegate.store_path")
        .or_else(|_| config.get::<String>("idlegate.store-path"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| expand_home(&s));

    Ok(out)
}

pub fn parse_interval(raw: &str) -> Result<Duration> {
    let d = parse_duration(raw).map_err(|e| eyre!(e)).wrap_err("invalid idle interval")?;
    if d.is_zero() {
        return Err(eyre!("idle interval must be greater than zero"));
    }
    Ok(d)
}

pub fn parse_missing_record(raw: &str) -> Result<MissingRecordPolicy> {
    raw.parse::<MissingRecordPolicy>().map_err(|e| eyre!(e))
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
