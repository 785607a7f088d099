//! Logger bootstrap.
//!
//! Diagnostics go to stderr so stdout stays clean for command output and CSV
//! piped to other tools. `RUST_LOG` takes precedence over the level picked
//! here.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Level used when `--verbose` is not given
pub const DEFAULT_LEVEL: &str = "warn";

pub const VERBOSE_LEVEL: &str = "debug";

pub fn level_for(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}

/// Start logging to stderr. Keep the returned handle alive for the life of
/// the process.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle, String> {
    let level = level_for(verbose);
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    debug!(
        "event=logging_init level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
