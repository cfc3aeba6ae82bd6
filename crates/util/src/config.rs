//! Roster configuration file.
//!
//! Configuration is a small JSON document. Resolution order is built-in
//! defaults, then the file, then whatever overrides the caller applies
//! (command-line flags). The file is looked up at `--config`, then
//! `ROSTER_CONFIG_PATH`, then `<config_dir>/roster/config.json`. Only the
//! last location may be absent without error.
//!
//! ```json
//! { "grade": { "mode": "select", "options": ["5", "6", "7"] }, "theme": "ansi256" }
//! ```

use std::collections::HashSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dirs_next::config_dir;
use roster_types::{DEFAULT_GRADE_OPTIONS, GradeInput};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::expand_tilde;

/// Environment variable allowing callers to override the configuration path.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG_PATH";

/// Default filename inside the `roster` configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid grade options: {0}")]
    InvalidGradeOptions(String),
    #[error("invalid grade mode '{0}'; expected 'free' or 'select'")]
    InvalidGradeMode(String),
}

/// Grade editing mode as written in the config file or on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeMode {
    #[default]
    Free,
    Select,
}

impl fmt::Display for GradeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeMode::Free => f.write_str("free"),
            GradeMode::Select => f.write_str("select"),
        }
    }
}

impl FromStr for GradeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "free_text" | "text" => Ok(GradeMode::Free),
            "select" | "choice" => Ok(GradeMode::Select),
            other => Err(ConfigError::InvalidGradeMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeInputConfig {
    pub mode: GradeMode,
    /// Choices for select mode; defaults to grades 5 through 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl GradeInputConfig {
    /// Converts to the form-level grade input, validating any option list.
    pub fn resolve(&self) -> Result<GradeInput, ConfigError> {
        match self.mode {
            GradeMode::Free => Ok(GradeInput::FreeText),
            GradeMode::Select => {
                let options = match &self.options {
                    Some(options) => validate_options(options)?,
                    None => DEFAULT_GRADE_OPTIONS.iter().map(|option| option.to_string()).collect(),
                };
                Ok(GradeInput::Select { options })
            }
        }
    }
}

fn validate_options(options: &[String]) -> Result<Vec<String>, ConfigError> {
    if options.is_empty() {
        return Err(ConfigError::InvalidGradeOptions("at least one option is required".into()));
    }
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(options.len());
    for option in options {
        let trimmed = option.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidGradeOptions("options must not be blank".into()));
        }
        if !seen.insert(trimmed) {
            return Err(ConfigError::InvalidGradeOptions(format!("duplicate option '{trimmed}'")));
        }
        cleaned.push(trimmed.to_string());
    }
    Ok(cleaned)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub grade: GradeInputConfig,
    /// Theme id or alias, e.g. `ansi256`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl RosterConfig {
    /// Loads configuration from `explicit`, the environment override, or the
    /// default location, in that order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(&expand_tilde(&path.to_string_lossy()), true);
        }
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_path(&expand_tilde(trimmed), true);
            }
        }
        Self::load_from_path(&default_config_path(), false)
    }

    /// Reads and parses one file. A missing file yields defaults unless
    /// `required` is set.
    pub fn load_from_path(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RosterConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // Surface bad option lists at load time rather than at first render.
        config.grade.resolve()?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn grade_input(&self) -> Result<GradeInput, ConfigError> {
        self.grade.resolve()
    }
}

/// `<config_dir>/roster/config.json`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster")
        .join(CONFIG_FILE_NAME)
}
