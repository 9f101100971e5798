//! Command-line argument parsing for the editor
//!
//! Supports:
//! - An optional file to load and save
//! - Overriding the prompt, screen clearing and line capacity from config

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;

/// A tiny line editor
#[derive(Parser, Debug)]
#[command(name = "few", version, about = "A tiny line editor")]
pub struct CliArgs {
    /// File to edit (loaded if it exists, used as the save target)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command prompt marker
    #[arg(short = 'p', long, value_name = "STRING")]
    pub prompt: Option<String>,

    /// Never clear the screen
    #[arg(long)]
    pub no_clear: bool,

    /// Maximum number of lines the buffer accepts
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,
}

/// Configuration derived from CLI arguments layered over the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Initial load/save target
    pub file: Option<PathBuf>,
    /// Effective editor settings
    pub editor: EditorConfig,
}

impl CliArgs {
    /// Apply the arguments on top of the loaded config
    pub fn into_config(self, mut editor: EditorConfig) -> Result<StartupConfig, String> {
        if let Some(path) = &self.file {
            if path.is_dir() {
                return Err(format!("Cannot edit a directory: {}", path.display()));
            }
        }

        if let Some(prompt) = self.prompt {
            editor.prompt = prompt;
        }
        if self.no_clear {
            editor.clear_screen = false;
        }
        if let Some(max_lines) = self.max_lines {
            editor.max_lines = max_lines;
        }
        editor.validate()?;

        Ok(StartupConfig {
            file: self.file,
            editor,
        })
    }
}
