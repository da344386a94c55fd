use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking;
use tracing_subscriber::EnvFilter;

/// File-only logging. The TUI owns the terminal, so nothing may write to
/// stdout or stderr; fetch failures and discarded refresh cycles end up in
/// the log file instead.
pub fn setup() -> Result<()> {
    let log_dir = dirs_next::data_local_dir()
        .context("Could not get data directory")?
        .join("folio");

    fs::create_dir_all(&log_dir)?;

    let log_file = fs::File::create(log_dir.join("folio.log"))?;

    let (writer, guard) = non_blocking(log_file);

    // Keep the flush worker alive for the lifetime of the process
    std::mem::forget(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(())
}
