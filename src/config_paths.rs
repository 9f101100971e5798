//! Where the editor keeps its files
//!
//! - `config.yaml` - user preferences, see [`crate::config`]
//! - `logs/few.log.*` - daily rolling debug log
//!
//! On Unix/macOS the root is `$XDG_CONFIG_HOME/few-editor` or
//! `~/.config/few-editor`; on Windows it is `%APPDATA%\few-editor`.

use std::path::PathBuf;

const APP_DIR: &str = "few-editor";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Prefix of the rolling log files inside [`logs_dir`]
pub const LOG_FILE_PREFIX: &str = "few.log";

#[cfg(target_os = "windows")]
fn platform_root() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_root() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// Root directory for all editor files
pub fn config_dir() -> Option<PathBuf> {
    platform_root().map(|root| root.join(APP_DIR))
}

/// The YAML preferences file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the log directory (and its parents) if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    std::fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create log directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_share_one_root() {
        if let (Some(root), Some(file), Some(logs)) = (config_dir(), config_file(), logs_dir()) {
            assert!(root.ends_with(APP_DIR));
            assert_eq!(file.parent(), Some(root.as_path()));
            assert_eq!(logs.parent(), Some(root.as_path()));
        }
    }
}
