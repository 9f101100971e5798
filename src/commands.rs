//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the runtime performs after an update.
//! The executor never touches the terminal, the filesystem or a shell itself.

use std::path::PathBuf;

use crate::messages::InputMode;

/// Side effect requested by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Write these lines to the output, one per line
    Print(Vec<String>),
    /// Write the buffer to disk; the outcome comes back as `Msg::SaveCompleted`
    SaveFile { path: PathBuf, lines: Vec<String> },
    /// Read text lines until `.` and feed them to the buffer
    BeginInput(InputMode),
    /// Run a shell command and wait for it
    RunShell(String),
    /// Clear the screen and show the command reference
    ShowHelp,
    /// Ask before quitting with unsaved changes
    ConfirmQuit,
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Print a single line
    pub fn line(text: impl Into<String>) -> Self {
        Cmd::Print(vec![text.into()])
    }
}
