//! Configuration structures and loading logic.

use std::fs;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use chardec_core::DecoderConfig;

use crate::error::CliError;

/// Top-level configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log verbosity: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            decoder: DecoderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// What to write for a byte sequence the session encoding rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPolicy {
    /// U+FFFD per rejected sequence.
    #[default]
    Replace,
    /// Drop the bytes.
    Skip,
    /// `<XX>` per rejected byte.
    Hex,
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub invalid: InvalidPolicy,
    /// Remove control sequences the decoder passes through.
    pub strip_escapes: bool,
    /// Log a warning for each unsupported character-set designator.
    pub unsupported_charset_warning: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            invalid: InvalidPolicy::default(),
            strip_escapes: false,
            unsupported_charset_warning: true,
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::File {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_owned(),
            source,
        })
    }

    /// Pretty TOML, as written by `--print-config`.
    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Parse a log level name. `None` for anything unknown; the caller falls
/// back to `warn` and reports it once logging is up.
pub fn parse_log_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}
