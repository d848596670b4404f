use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::SetLoggerError;
use time::macros::format_description;
use time::OffsetDateTime;

const DEFAULT_FILTER: &str = "info";

/// Appends all log output to `path`, creating it if needed.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    install(Target::Pipe(Box::new(file))).context("Failed to install logger")
}

/// Stderr logger, used only when the log file itself is unavailable.
pub fn init_stderr() {
    let _ = install(Target::Stderr);
}

/// Installs the process-wide logger writing timestamped lines to `target`.
pub fn install(target: Target) -> Result<(), SetLoggerError> {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format(|buf, record| {
            writeln!(buf, "{} {:<5} {}", timestamp(), record.level(), record.args())
        })
        .target(target)
        .try_init()
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default()
}
