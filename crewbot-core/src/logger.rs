//! Tracing setup for the crewbot binary: one fmt layer teed to stdout and the log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Used when `RUST_LOG` is unset or invalid: crewbot crates at `info`, dependencies at `warn`.
pub const DEFAULT_LOG_DIRECTIVES: &str =
    "warn,crewbot=info,crewbot_core=info,crewbot_telegram=info,handler_chain=info,storage=info,openai_client=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

fn open_log_file(log_file_path: &str) -> io::Result<std::fs::File> {
    if let Some(dir) = Path::new(log_file_path).parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(log_file_path)
}

/// Installs the global subscriber, writing to stdout and appending to `log_file_path`
/// (parent directories are created).
///
/// Call after loading `.env`, otherwise `RUST_LOG` from the file is ignored.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(log_file_path)?);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout.and(file))
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
