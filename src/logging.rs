// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB
const DEFAULT_KEEP_BACKUPS: u32 = 5;

pub const LOG_ENV: &str = "IDLEGATE_LOG";

pub struct LogPolicy {
    pub max_bytes: u64,
    pub keep_backups: u32,
}

impl Default for LogPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            keep_backups: DEFAULT_KEEP_BACKUPS,
        }
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("idlegate").join("idlegate.log"))
}

/// Installs the global subscriber. Keep the guard alive for the whole run,
/// dropping it flushes the file writer.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let (file_layer, guard) = match default_log_path().and_then(|p| open_log(&p)) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = verbose.then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}

/// Rotates, then appends the run header; returns the (dir, file name) the
/// appender should open.
fn open_log(path: &Path) -> Option<(PathBuf, String)> {
    let prepared = fs::create_dir_all(path.parent()?)
        .and_then(|_| LogPolicy::default().rotate_if_needed(path))
        .and_then(|_| append_run_header(path));

    if let Err(e) = prepared {
        eprintln!("idlegate: cannot prepare log file {}: {e}", path.display());
        return None;
    }

    let dir = path.parent()?.to_path_buf();
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some((dir, name))
}

impl LogPolicy {
    /// Moves the live file to `<path>.1` once it reaches `max_bytes`, shifting
    /// older backups up and dropping the one past `keep_backups`.
    pub fn rotate_if_needed(&self, path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(m) => m.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len < self.max_bytes {
            return Ok(false);
        }

        if self.keep_backups == 0 {
            fs::remove_file(path)?;
            return Ok(true);
        }

        let _ = fs::remove_file(backup_path(path, self.keep_backups));
        for n in (1..self.keep_backups).rev() {
            let from = backup_path(path, n);
            if from.exists() {
                fs::rename(&from, backup_path(path, n + 1))?;
            }
        }
        fs::rename(path, backup_path(path, 1))?;
        Ok(true)
    }
}

fn backup_path(path: &Path, n: u32) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

/// Separates runs with a blank line when the file already has content.
fn append_run_header(path: &Path) -> io::Result<()> {
    let has_content = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    let mut f = fs::OpenOptions::new().create(true).append(true).open(path)?;
    if has_content {
        writeln!(f)?;
    }
    writeln!(
        f,
        "==================== idlegate run start (pid={}) ====================",
        std::process::id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_log_is_left_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idlegate.log");

        assert!(!LogPolicy::default().rotate_if_needed(&path).unwrap());

        fs::write(&path, b"earlier run\n").unwrap();
        assert!(!LogPolicy::default().rotate_if_needed(&path).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn oversized_log_is_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idlegate.log");
        fs::write(&path, vec![b'x'; 64]).unwrap();
        fs::write(backup_path(&path, 1), b"older").unwrap();
        fs::write(backup_path(&path, 2), b"oldest").unwrap();

        let policy = LogPolicy { max_bytes: 32, keep_backups: 2 };
        assert!(policy.rotate_if_needed(&path).unwrap());

        assert!(!path.exists());
        assert_eq!(fs::read(backup_path(&path, 1)).unwrap().len(), 64);
        assert_eq!(fs::read(backup_path(&path, 2)).unwrap(), b"older");
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn zero_backups_just_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idlegate.log");
        fs::write(&path, vec![b'x'; 64]).unwrap();

        let policy = LogPolicy { max_bytes: 16, keep_backups: 0 };
        assert!(policy.rotate_if_needed(&path).unwrap());
        assert!(!path.exists());
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn run_headers_are_separated_by_a_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("idlegate.log");

        assert!(open_log(&path).is_some());
        append_run_header(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("idlegate run start"));
        assert_eq!(lines[1], "");
        assert!(lines[2].contains("idlegate run start"));
    }
}
