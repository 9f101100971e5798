//! User settings, read from `config.yaml` in the config directory
//!
//! Every field is optional in the file; missing ones take their default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{LineLimits, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH};

/// Settings layered under the command-line flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum number of lines the buffer accepts
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Maximum characters per line (excluding the terminator)
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Command prompt marker
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Clear the terminal on startup and before help
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LINES
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_prompt() -> String {
    "*".to_string()
}

fn default_clear_screen() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            max_line_length: default_max_line_length(),
            prompt: default_prompt(),
            clear_screen: default_clear_screen(),
        }
    }
}

impl EditorConfig {
    /// Read the user's config file. Never fails: anything unusable means
    /// defaults.
    pub fn load() -> Self {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Read `path`, falling back to defaults when it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Ok(None) => {
                tracing::debug!("{} not found, using default settings", path.display());
                Self::default()
            }
            Err(reason) => {
                tracing::warn!("Ignoring {}: {}", path.display(), reason);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<Self>, String> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.to_string()),
        };
        let config: Self = serde_yaml::from_str(&text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Reject settings the editor cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.max_lines == 0 {
            return Err("max_lines must be at least 1".to_string());
        }
        Ok(())
    }

    /// Capacity bounds for the line buffer
    pub fn limits(&self) -> LineLimits {
        LineLimits {
            max_lines: self.max_lines,
            max_line_length: self.max_line_length,
        }
    }
}
