// Author: Dustin Pilgrim
// License: MIT

use std::io::Write;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info, warn};

use idlegate::config::IdlegateConfig;
use idlegate::monitor::{IdleMonitor, TimeoutObserver};
use idlegate::store::FileStore;

/// Prints the foreground counter and the timeout notice to the terminal.
struct ConsoleObserver;

impl TimeoutObserver for ConsoleObserver {
    fn on_tick(&self, elapsed_secs: u64) {
        print!("\ridle for {elapsed_secs}s ");
        let _ = std::io::stdout().flush();
    }

    fn on_timeout(&self) {
        println!("\nNo operation timeout occurred. Please retry (type `start`).");
    }
}

enum LineCommand {
    Quit,
    Stop,
    Start,
    Status,
    Action,
}

fn parse_line(line: &str) -> LineCommand {
    match line.trim() {
        "quit" | "exit" => LineCommand::Quit,
        "stop" => LineCommand::Stop,
        "start" => LineCommand::Start,
        "status" => LineCommand::Status,
        _ => LineCommand::Action,
    }
}

pub async fn run(cfg: IdlegateConfig) -> Result<()> {
    let store = FileStore::new(cfg.store_path());
    info!(store = %store.path().display(), interval = ?cfg.interval, "watch starting");

    let monitor = IdleMonitor::with_system_clock(store, cfg.missing_record);
    let observer: Arc<dyn TimeoutObserver> = Arc::new(ConsoleObserver);

    monitor
        .start(cfg.interval, observer.clone())
        .wrap_err("failed to start monitoring")?;

    println!(
        "Watching for {}s of inactivity. Enter a line to act, Ctrl+Z to suspend, `quit` to exit.",
        cfg.interval.as_secs()
    );

    let mut tstp = signal(SignalKind::from_raw(libc::SIGTSTP)).wrap_err("failed to watch SIGTSTP")?;
    let mut cont = signal(SignalKind::from_raw(libc::SIGCONT)).wrap_err("failed to watch SIGCONT")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("failed to read stdin")? else {
                    debug!("stdin closed");
                    break;
                };

                match parse_line(&line) {
                    LineCommand::Quit => break,
                    LineCommand::Stop => {
                        monitor.stop();
                        println!("Monitoring stopped");
                    }
                    LineCommand::Start => {
                        monitor
                            .start(cfg.interval, observer.clone())
                            .wrap_err("failed to start monitoring")?;
                        println!("Monitoring started");
                    }
                    LineCommand::Status => match monitor.snapshot().await {
                        Some(snap) => println!("{}", snap.pretty()),
                        None => warn!("monitor task is gone"),
                    },
                    LineCommand::Action => monitor.record_action(),
                }
            }

            _ = tstp.recv() => {
                monitor.suspend();
                // Wait until the suspend (and its persist) has been applied.
                let _ = monitor.snapshot().await;
                debug!("suspended; stopping process");
                // SAFETY: raise has no memory-safety preconditions.
                unsafe {
                    libc::raise(libc::SIGSTOP);
                }
            }

            _ = cont.recv() => {
                debug!("continued; resuming");
                monitor.resume();
            }

            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    monitor.shutdown();
    info!("watch exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_map_to_commands() {
        assert!(matches!(parse_line("quit"), LineCommand::Quit));
        assert!(matches!(parse_line("  stop \n"), LineCommand::Stop));
        assert!(matches!(parse_line("start"), LineCommand::Start));
        assert!(matches!(parse_line("status"), LineCommand::Status));
        assert!(matches!(parse_line(""), LineCommand::Action));
        assert!(matches!(parse_line("hello"), LineCommand::Action));
    }
}
