// Author: Dustin Pilgrim
// License: MIT

pub mod command;
pub mod watch_mode;

use eyre::Result;

use idlegate::config::{self, IdlegateConfig, parser::parse_interval};

use crate::cli::{Args, Command};

/// Config file first, then command-line overrides.
pub fn resolve_config(args: &Args) -> Result<IdlegateConfig> {
    let mut cfg = config::load(args.config.as_deref())?;

    if let Some(raw) = args.interval.as_deref() {
        cfg.interval = parse_interval(raw)?;
    }
    if let Some(path) = args.store.as_ref() {
        cfg.store_path = Some(path.clone());
    }

    Ok(cfg)
}

pub async fn run(args: Args) -> Result<()> {
    let cfg = resolve_config(&args)?;

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => watch_mode::run(cfg).await,
        Command::Status { json } => command::status(&cfg, json),
        Command::Reset => command::reset(&cfg),
    }
}
