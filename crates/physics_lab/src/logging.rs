//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive runs only log when a log file is
//! configured. Self-check runs log to stderr. `RUST_LOG` overrides the level
//! derived from `-v`.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::LogFormat;
use crate::config::Config;
use crate::error::{Error, Result};

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// The configured log file.
    File,
    /// Logging disabled.
    Silent,
}

impl LogTarget {
    /// Pick the target for a configuration.
    #[must_use]
    pub const fn for_config(config: &Config) -> Self {
        if config.self_check {
            Self::Stderr
        } else if config.log_file.is_some() {
            Self::File
        } else {
            Self::Silent
        }
    }
}

/// Build the level filter, preferring `RUST_LOG` when it parses.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level().as_directive()))
}

/// Install the global subscriber for `config`.
///
/// Returns the target that was chosen. A subscriber installed earlier (for
/// example by a test harness) is left in place.
///
/// # Errors
///
/// Returns [`Error::LogFile`] if the log file cannot be opened.
pub fn init(config: &Config) -> Result<LogTarget> {
    let target = LogTarget::for_config(config);
    let filter = env_filter(config);
    match target {
        LogTarget::Stderr => install(filter, config.log_format, io::stderr, true),
        LogTarget::File => {
            if let Some(path) = config.log_file.as_deref() {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| Error::LogFile {
                        path: path.to_path_buf(),
                        source,
                    })?;
                install(filter, config.log_format, Mutex::new(file), false);
            }
        }
        LogTarget::Silent => {}
    }
    Ok(target)
}

fn install<W>(filter: EnvFilter, format: LogFormat, writer: W, ansi: bool)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
