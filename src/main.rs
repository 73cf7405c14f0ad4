// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;

use clap::Parser;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    let _log_guard = idlegate::logging::init(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    app::run(args).await
}
