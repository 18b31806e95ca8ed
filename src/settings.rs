//! Settings file support
//!
//! Settings are read from an optional TOML file and then overridden by
//! command-line flags. Every key is optional.
//!
//! ```toml
//! [paths]
//! catalog = "checks.cfg"
//! assignments = "hosts.cfg"
//! output = "services.cfg"
//!
//! [header]
//! timestamp = false
//! notice = ["managed by the monitoring team"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::emitter::HeaderConfig;

/// Default catalog path
pub const DEFAULT_CATALOG: &str = "checks.cfg";
/// Default assignment path
pub const DEFAULT_ASSIGNMENTS: &str = "hosts.cfg";
/// Default output path
pub const DEFAULT_OUTPUT: &str = "services.cfg";

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Resolved settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog: PathBuf,
    pub assignments: PathBuf,
    pub output: PathBuf,
    pub header: HeaderConfig,
}

/// TOML structure for deserializing settings
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    #[serde(default)]
    paths: TomlPaths,
    #[serde(default)]
    header: TomlHeader,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlPaths {
    catalog: Option<PathBuf>,
    assignments: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlHeader {
    generator: Option<String>,
    timestamp: Option<bool>,
    #[serde(default)]
    notice: Vec<String>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string, filling gaps with defaults
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let defaults = Self::default();

        let mut header = defaults.header;
        if let Some(generator) = parsed.header.generator {
            header.generator = generator;
        }
        if let Some(timestamp) = parsed.header.timestamp {
            header.timestamp = timestamp;
        }
        header.notice = parsed.header.notice;

        Ok(Settings {
            catalog: parsed.paths.catalog.unwrap_or(defaults.catalog),
            assignments: parsed.paths.assignments.unwrap_or(defaults.assignments),
            output: parsed.paths.output.unwrap_or(defaults.output),
            header,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            assignments: PathBuf::from(DEFAULT_ASSIGNMENTS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            header: HeaderConfig::default(),
        }
    }
}
