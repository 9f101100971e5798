//! Message types for the Elm-style architecture
//!
//! A [`Msg`] is one parsed command line. All buffer changes flow through
//! these messages into [`crate::update::update`].

use std::path::PathBuf;

/// Direction for relative moves and searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Which multi-line input flow a command opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Lines go after the current line, in typed order
    Append,
    /// Lines go before the current line, in typed order
    Insert,
    /// Every line overwrites the current line
    Change,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // === Navigation ===
    /// `n` - go to line n (clamped) and print it
    GotoLine(usize),
    /// `$` - go to the last line and print it
    GotoLast,
    /// `.` - print the current line number
    ShowCursor,
    /// `+n` / `-n` - move by n lines (clamped) and print
    RelativeMove { direction: Direction, count: usize },

    // === Viewing ===
    /// `p` - print the current line
    PrintCurrent,
    /// `pN` or `N,p` - print line N
    PrintLine(usize),
    /// `a,p` - print every line
    PrintAll,
    /// `a,n` - print every line with its number
    NumberAll,
    /// `/text` or `?text` - literal search, wrapping at the ends
    Search {
        direction: Direction,
        pattern: String,
    },

    // === Editing ===
    /// `a` / `i` / `c` - open a text input session
    Input(InputMode),
    /// `d` - delete the current line
    DeleteCurrent,
    /// `N,d` - delete line N
    DeleteLine(usize),
    /// `a,d` - delete every line
    DeleteAll,
    /// `s/old/new` - replace the first literal occurrence on the current line
    Substitute { old: String, new: String },

    // === File / application ===
    /// `w [file]` - save, optionally to a new target
    Save(Option<String>),
    /// `q` - quit, confirming when there are unsaved changes
    Quit,
    /// `!cmd` - run a shell command
    ShellExec(String),
    /// `h` - show help
    Help,
    /// Outcome of a `Cmd::SaveFile`, fed back by the runtime
    SaveCompleted {
        path: PathBuf,
        result: Result<usize, String>,
    },

    /// Anything else
    Unknown(String),
}
