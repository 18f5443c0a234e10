//! Command-line interface for `physics_lab`.
//!
//! # Examples
//!
//! ```bash
//! # Open on the collision tab at 30 frames per second
//! physics_lab --tab collision --fps 30
//!
//! # Headless run of every demo (for CI)
//! physics_lab --self-check --frames 120
//!
//! # Log to a file while the TUI owns the terminal
//! physics_lab -vv --log-file lab.log --log-format json
//! ```

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::messages::Demo;

/// Physics Lab - interactive physics demonstrations in the terminal.
///
/// Four tabs: projectile motion, Newton's second law with friction, a mass
/// on a spring, and a two-ball elastic collision.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "physics_lab",
    author,
    version,
    about = "Physics Lab - interactive physics demonstrations in the terminal",
    long_about = "Projectile motion, Newton's laws, harmonic motion and elastic \
                  collisions, animated frame by frame in the terminal."
)]
pub struct Cli {
    /// Tab to open on
    ///
    /// One of: projectile, newton, harmonic, collision
    #[arg(long, short = 't', env = "PHYSICS_LAB_TAB", value_parser = parse_demo)]
    pub tab: Option<Demo>,

    /// Frames per second for the animation clock
    #[arg(long, env = "PHYSICS_LAB_FPS")]
    pub fps: Option<u32>,

    /// Path to a TOML (or JSON) config file
    #[arg(long, short = 'c', env = "PHYSICS_LAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force color output off
    ///
    /// Respects `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Disable alternate screen mode
    #[arg(long, env = "PHYSICS_LAB_NO_ALT_SCREEN", value_parser = FalseyValueParser::new())]
    pub no_alt_screen: bool,

    /// Run every demo headlessly and exit
    ///
    /// Non-zero exit status if any metric is not finite
    #[arg(long)]
    pub self_check: bool,

    /// Frames per demo during --self-check
    #[arg(long)]
    pub frames: Option<u32>,

    /// Write logs to this file
    #[arg(long, env = "PHYSICS_LAB_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log line formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Check if running in headless mode.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbose)
    }
}

fn parse_demo(s: &str) -> Result<Demo, String> {
    Demo::from_slug(s).ok_or_else(|| {
        let known: Vec<_> = Demo::all().iter().map(|d| d.slug()).collect();
        format!("unknown tab {s:?} (expected one of: {})", known.join(", "))
    })
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Maps a `-v` count to a level.
    #[must_use]
    pub const fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Directive string understood by `EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
