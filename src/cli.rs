// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "idlegate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Idle session timeout tracker"
)]
pub struct Args {
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where the last action instant is persisted across suspension
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Idle interval, e.g. 90s, 5m, 1h (overrides the config file)
    #[arg(short, long, global = true, value_name = "DURATION")]
    pub interval: Option<String>,

    #[arg(short, long, global = true, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Monitor this terminal: each input line is an action, Ctrl+Z suspends")]
    Watch,

    #[command(about = "Reconcile the persisted last action against the idle interval")]
    Status {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Forget the persisted last action")]
    Reset,
}
