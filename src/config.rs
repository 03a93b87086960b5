use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::diff::ParseOptions;

/// Config file looked up in the current directory.
pub const CONFIG_FILE: &str = ".diffscan.toml";

const ENV_MAX_FILES: &str = "DIFFSCAN_MAX_FILES";
const ENV_MAX_LINES_PER_FILE: &str = "DIFFSCAN_MAX_LINES_PER_FILE";
const ENV_MAX_LINE_CHARS: &str = "DIFFSCAN_MAX_LINE_CHARS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {name}: expected an integer")]
    InvalidEnv { name: &'static str, value: String },
}

/// Top-level configuration loaded from .diffscan.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,
}

/// Truncation limits as written by a user. Absent or non-positive means
/// unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Limits {
    pub max_files: Option<i64>,
    pub max_lines_per_file: Option<i64>,
    pub max_line_chars: Option<i64>,
}

impl Limits {
    /// Layer `later` on top of `self`: every field `later` sets wins.
    pub fn merge(self, later: Limits) -> Limits {
        Limits {
            max_files: later.max_files.or(self.max_files),
            max_lines_per_file: later.max_lines_per_file.or(self.max_lines_per_file),
            max_line_chars: later.max_line_chars.or(self.max_line_chars),
        }
    }

    /// Read `DIFFSCAN_MAX_*` overrides from the process environment.
    pub fn from_env() -> Result<Limits, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup` (useful for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Limits, ConfigError> {
        let read = |name: &'static str| -> Result<Option<i64>, ConfigError> {
            match lookup(name) {
                None => Ok(None),
                Some(value) => {
                    let parsed = value.trim().parse::<i64>();
                    parsed.map(Some).map_err(|_| ConfigError::InvalidEnv { name, value })
                }
            }
        };

        Ok(Limits {
            max_files: read(ENV_MAX_FILES)?,
            max_lines_per_file: read(ENV_MAX_LINES_PER_FILE)?,
            max_line_chars: read(ENV_MAX_LINE_CHARS)?,
        })
    }

    pub fn to_options(&self) -> ParseOptions {
        ParseOptions {
            max_files: unlimited_if_non_positive(self.max_files),
            max_lines_per_file: unlimited_if_non_positive(self.max_lines_per_file),
            max_line_chars: unlimited_if_non_positive(self.max_line_chars),
        }
    }
}

fn unlimited_if_non_positive(value: Option<i64>) -> usize {
    value.and_then(|v| usize::try_from(v).ok()).unwrap_or(0)
}

impl Config {
    /// Load configuration from .diffscan.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Final limits, applied in order: config file, environment, then
    /// `overrides` (command-line flags).
    pub fn resolve_limits(&self, env: Limits, overrides: Limits) -> Limits {
        Limits::default().merge(self.limits).merge(env).merge(overrides)
    }
}
