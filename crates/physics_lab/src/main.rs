#![forbid(unsafe_code)]

//! # Physics Lab
//!
//! Terminal front end for the physics demonstrations.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p physics_lab -- --tab harmonic
//! cargo run -p physics_lab -- --self-check --frames 120
//! ```

use std::process::ExitCode;

use anyhow::Context;
use physics_lab::{Cli, Config, logging, self_check, terminal};
use tracing::{debug, error};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_args();
    let config = Config::load(&cli).context("failed to load configuration")?;
    logging::init(&config).context("failed to initialize logging")?;
    debug!(config = %config.to_diagnostic_string(), "configuration resolved");

    if config.is_headless() {
        let report = self_check::run(config.frames);
        println!("{report}");
        if !report.passed() {
            error!("self-check failed");
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    terminal::run(&config).context("terminal session failed")?;
    Ok(ExitCode::SUCCESS)
}
