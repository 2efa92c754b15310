//! Log setup. The TUI owns stdout and the alternate screen, so log records go
//! to a file instead of stderr.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder as LoggerBuilder, Target};
use log::LevelFilter as LogLevelFilter;

/// Map the `-v` count onto a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LogLevelFilter {
    match verbosity {
        0 => LogLevelFilter::Warn,
        1 => LogLevelFilter::Info,
        2 => LogLevelFilter::Debug,
        _ => LogLevelFilter::Trace,
    }
}

/// Install the global logger, appending to `path`. `RUST_LOG`, when set,
/// refines the filter derived from `verbosity`.
pub fn init_file_logger(path: &Path, verbosity: u8) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let mut logger_builder = LoggerBuilder::new();
    logger_builder.filter_level(level_for_verbosity(verbosity));
    if let Ok(rust_log) = env::var("RUST_LOG") {
        logger_builder.parse_filters(&rust_log);
    }
    logger_builder
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")
}
