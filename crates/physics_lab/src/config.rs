//! Runtime configuration for `physics_lab`.
//!
//! [`Config`] is the single source of truth for runtime options, however they
//! were specified. Values are layered: built-in defaults, then an optional
//! config file, then the command line.
//!
//! # Config file
//!
//! ```toml
//! fps = 30
//! initial_tab = "harmonic"
//! color_mode = "never"
//! frames = 240
//! log_format = "json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{Cli, LogFormat, LogLevel};
use crate::error::{Error, Result};
use crate::messages::Demo;

/// Default animation clock rate.
pub const DEFAULT_FPS: u32 = 60;
/// Default frames per demo during self-check.
pub const DEFAULT_FRAMES: u32 = 600;
/// Highest accepted animation clock rate.
pub const MAX_FPS: u32 = 240;

/// Runtime configuration for the lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Display Settings
    // ========================================================================
    /// Animation clock rate in frames per second.
    pub fps: u32,

    /// Tab shown at startup.
    pub initial_tab: Demo,

    /// Color output mode.
    pub color_mode: ColorMode,

    // ========================================================================
    // Terminal Settings
    // ========================================================================
    /// Whether to use alternate screen mode.
    pub alt_screen: bool,

    // ========================================================================
    // Mode Settings
    // ========================================================================
    /// Whether running in headless self-check mode.
    pub self_check: bool,

    /// Frames per demo during self-check.
    pub frames: u32,

    // ========================================================================
    // Logging
    // ========================================================================
    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,

    /// Log destination for interactive runs.
    pub log_file: Option<PathBuf>,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            initial_tab: Demo::default(),
            color_mode: ColorMode::Auto,
            alt_screen: true,
            self_check: false,
            frames: DEFAULT_FRAMES,
            verbosity: 0,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from CLI arguments alone, ignoring `--config`.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        config.apply_cli(cli);
        config
    }

    /// Resolve the full configuration: defaults, then the file named by
    /// `--config` (if any), then the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged values are out of range.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = cli.config.as_deref() {
            FileConfig::read(path)?.apply_to(&mut config);
            debug!(path = %path.display(), "config file applied");
        }
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay every option given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(tab) = cli.tab {
            self.initial_tab = tab;
        }
        if cli.no_color {
            self.color_mode = ColorMode::Never;
        }
        if cli.no_alt_screen {
            self.alt_screen = false;
        }
        if cli.self_check {
            self.self_check = true;
        }
        if let Some(frames) = cli.frames {
            self.frames = frames;
        }
        if cli.verbose > 0 {
            self.verbosity = cli.verbose;
        }
        if let Some(ref path) = cli.log_file {
            self.log_file = Some(path.clone());
        }
        if let Some(format) = cli.log_format {
            self.log_format = format;
        }
    }

    /// Check if colors should be used.
    #[must_use]
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty()),
        }
    }

    /// Check if running in headless mode.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check
    }

    /// Log level implied by the verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbosity)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(Error::InvalidConfig(format!(
                "fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.frames == 0 {
            return Err(Error::InvalidConfig(
                "frames must be at least 1".to_string(),
            ));
        }
        if let Some(ref path) = self.log_file
            && path.is_dir()
        {
            return Err(Error::InvalidConfig(format!(
                "log file {} is a directory",
                path.display()
            )));
        }
        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("FPS: {}", self.fps));
        lines.push(format!("Initial tab: {}", self.initial_tab));
        lines.push(format!("Color mode: {:?}", self.color_mode));
        lines.push(format!(
            "Alt screen: {}",
            if self.alt_screen { "on" } else { "off" }
        ));
        lines.push(format!("Self-check: {}", self.self_check));
        lines.push(format!("Frames: {}", self.frames));
        lines.push(format!("Verbosity: {}", self.verbosity));
        if let Some(ref path) = self.log_file {
            lines.push(format!("Log file: {}", path.display()));
        }
        lines.push(format!("Log format: {:?}", self.log_format));

        lines.join("\n")
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Use colors unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Settings as they appear in a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Animation clock rate.
    pub fps: Option<u32>,
    /// Tab shown at startup.
    pub initial_tab: Option<Demo>,
    /// Color output mode.
    pub color_mode: Option<ColorMode>,
    /// Whether to use alternate screen mode.
    pub alt_screen: Option<bool>,
    /// Frames per demo during self-check.
    pub frames: Option<u32>,
    /// Log verbosity level.
    pub verbosity: Option<u8>,
    /// Log destination.
    pub log_file: Option<PathBuf>,
    /// Log line format.
    pub log_format: Option<LogFormat>,
}

impl FileConfig {
    /// Read a config file. Files ending in `.json` are parsed as JSON,
    /// anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`], [`Error::ConfigToml`] or
    /// [`Error::ConfigJson`].
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text).map_err(|source| Error::ConfigJson {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&text).map_err(|source| Error::ConfigToml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Overlay the keys present in the file.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(tab) = self.initial_tab {
            config.initial_tab = tab;
        }
        if let Some(mode) = self.color_mode {
            config.color_mode = mode;
        }
        if let Some(alt) = self.alt_screen {
            config.alt_screen = alt;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(verbosity) = self.verbosity {
            config.verbosity = verbosity;
        }
        if let Some(ref path) = self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["physics_lab"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.initial_tab, Demo::Projectile);
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert!(config.alt_screen);
        assert!(!config.self_check);
        assert_eq!(config.frames, 600);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_new_equals_default() {
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn config_from_cli_flags() {
        let config = Config::from_cli(&cli(&[
            "--tab",
            "newton",
            "--fps",
            "30",
            "--no-color",
            "--no-alt-screen",
            "--self-check",
            "--frames",
            "10",
            "-vv",
        ]));
        assert_eq!(config.initial_tab, Demo::Newton);
        assert_eq!(config.fps, 30);
        assert_eq!(config.color_mode, ColorMode::Never);
        assert!(!config.alt_screen);
        assert!(config.is_headless());
        assert_eq!(config.frames, 10);
        assert_eq!(config.log_level(), LogLevel::Debug);
    }

    #[test]
    fn file_values_apply_over_defaults() {
        let file = write_config(
            ".toml",
            "fps = 24\ninitial_tab = \"collision\"\ncolor_mode = \"always\"\nframes = 50\n",
        );
        let config = Config::load(&cli(&["--config", file.path().to_str().unwrap()])).unwrap();
        assert_eq!(config.fps, 24);
        assert_eq!(config.initial_tab, Demo::Collision);
        assert_eq!(config.color_mode, ColorMode::Always);
        assert_eq!(config.frames, 50);
        assert!(config.alt_screen);
    }

    #[test]
    fn cli_overrides_file() {
        let file = write_config(".toml", "fps = 24\ninitial_tab = \"collision\"\n");
        let config = Config::load(&cli(&[
            "--config",
            file.path().to_str().unwrap(),
            "--fps",
            "90",
        ]))
        .unwrap();
        assert_eq!(config.fps, 90);
        assert_eq!(config.initial_tab, Demo::Collision);
    }

    #[test]
    fn json_files_are_accepted() {
        let file = write_config(".json", r#"{"initial_tab": "harmonic", "log_format": "json"}"#);
        let config = Config::load(&cli(&["--config", file.path().to_str().unwrap()])).unwrap();
        assert_eq!(config.initial_tab, Demo::Harmonic);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config(".toml", "fps = 30\ngravity = 3.7\n");
        let err = Config::load(&cli(&["--config", file.path().to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, Error::ConfigToml { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(&cli(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn out_of_range_fps_from_file_is_invalid() {
        let file = write_config(".toml", "fps = 0\n");
        let err = Config::load(&cli(&["--config", file.path().to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = Config {
            fps: MAX_FPS + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            frames: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_file: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn color_mode_overrides() {
        let always = Config {
            color_mode: ColorMode::Always,
            ..Config::default()
        };
        assert!(always.use_color());

        let never = Config {
            color_mode: ColorMode::Never,
            ..Config::default()
        };
        assert!(!never.use_color());
    }

    #[test]
    fn config_json_roundtrip() {
        let config = Config {
            fps: 30,
            initial_tab: Demo::Harmonic,
            log_file: Some(PathBuf::from("/tmp/lab.log")),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn diagnostic_string_covers_fields() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/lab.log")),
            ..Config::default()
        };
        let diag = config.to_diagnostic_string();
        assert!(diag.contains("FPS: 60"));
        assert!(diag.contains("Initial tab: Projectile Motion"));
        assert!(diag.contains("Log file: /tmp/lab.log"));

        let diag = Config::default().to_diagnostic_string();
        assert!(!diag.contains("Log file"));
    }
}
