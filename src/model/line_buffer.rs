//! Line buffer - the ordered sequence of text lines and the current-line cursor
//!
//! All addresses are 1-based. Address 0 is only meaningful as the target of
//! [`LineBuffer::insert_after`] (insert before the first line).

use crate::error::{EditError, EditResult};

/// Default maximum number of lines a buffer may hold
pub const DEFAULT_MAX_LINES: usize = 10_000;

/// Default maximum line length in characters (excluding the terminator)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1_023;

/// Capacity bounds checked on every insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    pub max_lines: usize,
    pub max_line_length: usize,
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Strip a trailing LF or CRLF terminator
pub fn strip_terminator(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

/// Text lines plus the current-line cursor and dirty flag
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    /// Current line address; 0 when the buffer is empty
    cursor: usize,
    limits: LineLimits,
    modified: bool,
}

impl LineBuffer {
    /// Create an empty buffer with the given limits
    pub fn new(limits: LineLimits) -> Self {
        Self {
            lines: Vec::new(),
            cursor: 0,
            limits,
            modified: false,
        }
    }

    /// Build a buffer from loaded lines.
    ///
    /// Terminators are stripped, over-long lines are truncated and anything
    /// past `max_lines` is dropped. The cursor lands on the last line and the
    /// buffer starts clean.
    pub fn from_lines<I, S>(lines: I, limits: LineLimits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self::new(limits);
        let mut truncated = 0usize;
        let mut dropped = 0usize;

        for line in lines {
            if buffer.lines.len() >= limits.max_lines {
                dropped += 1;
                continue;
            }
            let text = strip_terminator(line.as_ref());
            if text.chars().count() > limits.max_line_length {
                truncated += 1;
                buffer
                    .lines
                    .push(text.chars().take(limits.max_line_length).collect());
            } else {
                buffer.lines.push(text.to_string());
            }
        }

        if truncated > 0 {
            tracing::warn!(
                "Truncated {} line(s) longer than {} characters",
                truncated,
                limits.max_line_length
            );
        }
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} line(s) beyond the {} line capacity",
                dropped,
                limits.max_lines
            );
        }

        buffer.cursor = buffer.lines.len();
        buffer
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Address of the last line, or `None` for an empty buffer
    pub fn last_address(&self) -> Option<usize> {
        (!self.lines.is_empty()).then_some(self.lines.len())
    }

    /// Current line address, or `None` when the buffer is empty
    pub fn cursor(&self) -> Option<usize> {
        (self.cursor > 0).then_some(self.cursor)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the dirty flag after a successful save
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Flag the buffer as differing from its file without editing it
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// All lines in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.limits.max_lines
    }

    fn check_address(&self, addr: usize) -> EditResult<()> {
        if addr == 0 || addr > self.lines.len() {
            Err(EditError::InvalidAddress)
        } else {
            Ok(())
        }
    }

    /// Validate a line against the length limit and capacity
    fn check_insert(&self, text: &str) -> EditResult<()> {
        if text.chars().count() > self.limits.max_line_length {
            return Err(EditError::LineTooLong);
        }
        if self.is_full() {
            return Err(EditError::BufferFull);
        }
        Ok(())
    }

    /// Insert `text` after `addr` (0 inserts at the top). Returns the new
    /// line's address, which also becomes the cursor.
    pub fn insert_after(&mut self, addr: usize, text: impl Into<String>) -> EditResult<usize> {
        if addr > self.lines.len() {
            return Err(EditError::InvalidAddress);
        }
        let text = text.into();
        self.check_insert(&text)?;

        self.lines.insert(addr, text);
        self.cursor = addr + 1;
        self.modified = true;
        tracing::trace!(addr = self.cursor, "inserted line");
        Ok(self.cursor)
    }

    /// Insert `text` so that it becomes line `addr`, shifting the old line
    /// `addr` down. `addr` may be one past the end. The cursor moves to `addr`.
    pub fn insert_before(&mut self, addr: usize, text: impl Into<String>) -> EditResult<usize> {
        if addr == 0 || addr > self.lines.len() + 1 {
            return Err(EditError::InvalidAddress);
        }
        let text = text.into();
        self.check_insert(&text)?;

        self.lines.insert(addr - 1, text);
        self.cursor = addr;
        self.modified = true;
        tracing::trace!(addr, "inserted line");
        Ok(addr)
    }

    /// Overwrite line `addr` in place
    pub fn replace(&mut self, addr: usize, text: impl Into<String>) -> EditResult<()> {
        self.check_address(addr)?;
        let text = text.into();
        if text.chars().count() > self.limits.max_line_length {
            return Err(EditError::LineTooLong);
        }
        self.lines[addr - 1] = text;
        self.modified = true;
        Ok(())
    }

    /// Remove line `addr` and return its text.
    ///
    /// The cursor becomes `min(cursor, count)`, or empty once the last line
    /// is gone.
    pub fn delete(&mut self, addr: usize) -> EditResult<String> {
        self.check_address(addr)?;
        let removed = self.lines.remove(addr - 1);
        self.cursor = self.cursor.min(self.lines.len());
        self.modified = true;
        tracing::trace!(addr, remaining = self.lines.len(), "deleted line");
        Ok(removed)
    }

    /// Remove every line. Returns how many were removed.
    pub fn delete_all(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        self.cursor = 0;
        if removed > 0 {
            self.modified = true;
        }
        removed
    }

    /// Text of line `addr`
    pub fn get(&self, addr: usize) -> EditResult<&str> {
        self.check_address(addr)?;
        Ok(&self.lines[addr - 1])
    }

    /// Lines `start..=end` with their addresses, clamped to the buffer.
    /// Empty when the clamped range is inverted.
    pub fn get_range(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        let start = start.max(1);
        let end = end.min(self.lines.len());
        let span = if start > end {
            &self.lines[0..0]
        } else {
            &self.lines[start - 1..end]
        };
        span.iter()
            .enumerate()
            .map(move |(i, line)| (start + i, line.as_str()))
    }

    /// Move the cursor to `addr`, clamped into `[1, count]`.
    /// Returns the resulting address, or `None` for an empty buffer.
    pub fn set_cursor(&mut self, addr: usize) -> Option<usize> {
        self.cursor = if self.lines.is_empty() {
            0
        } else {
            addr.clamp(1, self.lines.len())
        };
        self.cursor()
    }

    /// Move the cursor forward (`+`) or backward (`-`) by `count` lines,
    /// clamping at both ends
    pub fn move_cursor(&mut self, forward: bool, count: usize) -> Option<usize> {
        let target = if forward {
            self.cursor.saturating_add(count)
        } else {
            self.cursor.saturating_sub(count)
        };
        self.set_cursor(target)
    }
}
