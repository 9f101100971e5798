//! Session model - the complete state of one editing session
//!
//! There are no ambient statics: the runtime owns a single [`EditorSession`]
//! and hands it to the executor for every command.

pub mod line_buffer;

pub use line_buffer::{
    strip_terminator, LineBuffer, LineLimits, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH,
};

use std::path::{Path, PathBuf};

/// The complete editor state
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    /// The text lines and current-line cursor
    pub buffer: LineBuffer,
    /// Load/save target (None until a filename is given)
    pub file_path: Option<PathBuf>,
    /// Last pattern used by `/` or `?`, reused by an empty search
    pub last_pattern: Option<String>,
}

impl EditorSession {
    /// Create a session with an empty buffer
    pub fn new(limits: LineLimits) -> Self {
        Self {
            buffer: LineBuffer::new(limits),
            file_path: None,
            last_pattern: None,
        }
    }

    /// Create a session around an already-populated buffer
    pub fn with_buffer(buffer: LineBuffer, file_path: Option<PathBuf>) -> Self {
        Self {
            buffer,
            file_path,
            last_pattern: None,
        }
    }

    /// Whether there are unsaved changes
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Display name of the file target, if any
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_deref()
            .map(Path::to_string_lossy)
            .map(|name| name.to_string())
    }
}
