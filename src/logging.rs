use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used for the log file when `RUST_LOG` is unset
const FILE_DEFAULT_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");

/// Filter used for stderr when `RUST_LOG` is unset
const STDERR_DEFAULT_FILTER: &str = "warn";

/// Sends log events to a freshly truncated file at `path`
pub(crate) fn init_file(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(FILE_DEFAULT_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Sends log events to stderr.  Must not be used while the terminal UI owns
/// the screen.
pub(crate) fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(STDERR_DEFAULT_FILTER))
        .with_writer(std::io::stderr)
        .init();
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
