//! Error types for physics_lab.
//!
//! The simulation engines never fail: degenerate numbers are substituted
//! locally. Errors only come from the surface around them, namely the
//! terminal, configuration files and parameter updates naming a field a demo
//! does not have.

use std::io;
use std::path::PathBuf;

/// Errors that can occur outside the simulation engines.
///
/// # Example
///
/// ```rust
/// use physics_lab::{Demo, Error, Simulations, RecordingSurface};
///
/// let mut sims = Simulations::<RecordingSurface>::new();
/// let err = sims.get_mut(Demo::Projectile).set_param("spin", 3.0).unwrap_err();
/// assert!(matches!(err, Error::UnknownParameter { .. }));
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    ///
    /// Usually the terminal is not a TTY or was closed while running.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// A configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A TOML configuration file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    ConfigToml {
        /// Path that was parsed.
        path: PathBuf,
        /// Parser error with location.
        #[source]
        source: toml::de::Error,
    },

    /// A JSON configuration file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    ConfigJson {
        /// Path that was parsed.
        path: PathBuf,
        /// Parser error with location.
        #[source]
        source: serde_json::Error,
    },

    /// The log file could not be opened.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A parameter update named a field the demo does not have.
    #[error("{demo} has no parameter named {name:?}")]
    UnknownParameter {
        /// Display name of the demo.
        demo: &'static str,
        /// Field name as received.
        name: String,
    },
}

/// A specialized [`Result`](std::result::Result) for physics_lab operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_io() {
        let err = Error::Io(io::Error::new(io::ErrorKind::NotConnected, "no tty"));
        assert_eq!(err.to_string(), "terminal io error: no tty");
    }

    #[test]
    fn error_display_unknown_parameter() {
        let err = Error::UnknownParameter {
            demo: "Newton's Laws",
            name: "spin".into(),
        };
        assert_eq!(err.to_string(), "Newton's Laws has no parameter named \"spin\"");
    }

    #[test]
    fn error_display_config_read_includes_path() {
        let err = Error::ConfigRead {
            path: PathBuf::from("/missing/lab.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/lab.toml"));
    }

    #[test]
    fn error_from_io() {
        let err: Error = io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn error_source_chain() {
        use std::error::Error as _;
        let err = Error::ConfigRead {
            path: PathBuf::from("lab.toml"),
            source: io::Error::other("inner"),
        };
        assert_eq!(err.source().map(ToString::to_string), Some("inner".into()));
    }
}
