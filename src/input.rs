//! Text input session - the multi-line entry flow behind `a`, `i` and `c`
//!
//! The session is a small state machine fed one raw line at a time; the
//! runtime owns the reading and prompting.

use crate::error::{EditError, EditResult};
use crate::messages::InputMode;
use crate::model::{strip_terminator, LineBuffer};
use crate::view::INPUT_TERMINATOR;

/// Outcome of feeding one line to a [`TextInputSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStep {
    /// The line was stored at this address
    Accepted(usize),
    /// The line was refused; the session keeps reading
    Rejected(EditError),
    /// The terminator was entered
    Finished,
    /// The buffer is full; the line was discarded and the session is over
    Aborted(EditError),
}

impl InputStep {
    /// Whether the session should stop reading
    pub fn is_done(&self) -> bool {
        matches!(self, InputStep::Finished | InputStep::Aborted(_))
    }
}

/// One run of multi-line text entry
#[derive(Debug, Clone)]
pub struct TextInputSession {
    mode: InputMode,
    /// Address the next accepted line lands on
    target: usize,
    accepted: usize,
}

impl TextInputSession {
    /// Start a session against the buffer's current line.
    ///
    /// Append and Insert work on an empty buffer (the text becomes line 1);
    /// Change needs a current line.
    pub fn begin(mode: InputMode, buffer: &LineBuffer) -> EditResult<Self> {
        let cursor = buffer.cursor();
        let target = match mode {
            InputMode::Append => cursor.unwrap_or(0) + 1,
            InputMode::Insert => cursor.unwrap_or(1),
            InputMode::Change => cursor.ok_or(EditError::InvalidAddress)?,
        };
        tracing::debug!(?mode, target, "input session started");
        Ok(Self {
            mode,
            target,
            accepted: 0,
        })
    }

    /// Address shown in the prompt for the next line
    pub fn target(&self) -> usize {
        self.target
    }

    /// Number of lines stored so far
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Feed one raw input line (terminator optional)
    pub fn feed(&mut self, buffer: &mut LineBuffer, raw: &str) -> InputStep {
        let line = strip_terminator(raw);
        if line == INPUT_TERMINATOR {
            tracing::debug!(accepted = self.accepted, "input session finished");
            return InputStep::Finished;
        }

        let result = match self.mode {
            InputMode::Append => buffer.insert_after(self.target - 1, line),
            InputMode::Insert => buffer.insert_before(self.target, line),
            // Change keeps overwriting the same line
            InputMode::Change => buffer.replace(self.target, line).map(|_| self.target),
        };

        match result {
            Ok(addr) => {
                self.accepted += 1;
                if self.mode != InputMode::Change {
                    self.target = addr + 1;
                }
                InputStep::Accepted(addr)
            }
            Err(EditError::BufferFull) => {
                tracing::warn!(accepted = self.accepted, "input session hit buffer capacity");
                InputStep::Aborted(EditError::BufferFull)
            }
            Err(e) => InputStep::Rejected(e),
        }
    }
}
