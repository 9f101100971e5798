//! Persistence adapter - load and save the buffer as plain text
//!
//! The on-disk format is one line per record, each newline-terminated,
//! with no header or metadata.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::model::{EditorSession, LineBuffer, LineLimits};

/// Lines read from a target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedText {
    pub lines: Vec<String>,
    /// Some bytes were not UTF-8 and were replaced with U+FFFD
    pub replaced_invalid: bool,
}

/// What startup loading found, for the load message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines in the buffer after capacity limits were applied
    pub lines: usize,
    pub replaced_invalid: bool,
}

/// Load/save of buffer lines to a named target
pub trait Persistence {
    /// Read all lines of `path`. `Ok(None)` means the file does not exist.
    fn load(&mut self, path: &Path) -> io::Result<Option<LoadedText>>;

    /// Write `lines` to `path`, replacing its contents
    fn save(&mut self, path: &Path, lines: &[String]) -> io::Result<()>;
}

/// Plain files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn load(&mut self, path: &Path) -> io::Result<Option<LoadedText>> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let content = String::from_utf8_lossy(&bytes);
        let replaced_invalid = matches!(content, Cow::Owned(_));
        if replaced_invalid {
            tracing::warn!(
                "{} is not valid UTF-8; invalid bytes were replaced",
                path.display()
            );
        }
        Ok(Some(LoadedText {
            lines: content.lines().map(str::to_string).collect(),
            replaced_invalid,
        }))
    }

    fn save(&mut self, path: &Path, lines: &[String]) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

/// Build the initial session for `path`.
///
/// Returns the session and, when the file was loaded, a [`LoadReport`].
/// A missing or unreadable file yields an empty buffer; the path is still
/// kept as the save target. A file with replaced bytes starts out modified
/// so that quitting asks before the lossy text is lost or written back.
pub fn open_session(
    persistence: &mut dyn Persistence,
    path: Option<PathBuf>,
    limits: LineLimits,
) -> (EditorSession, Option<LoadReport>) {
    let Some(path) = path else {
        return (EditorSession::new(limits), None);
    };

    match persistence.load(&path) {
        Ok(Some(loaded)) => {
            let mut buffer = LineBuffer::from_lines(loaded.lines, limits);
            if loaded.replaced_invalid {
                buffer.mark_modified();
            }
            let report = LoadReport {
                lines: buffer.len(),
                replaced_invalid: loaded.replaced_invalid,
            };
            tracing::info!("Loaded {} lines from {}", report.lines, path.display());
            (EditorSession::with_buffer(buffer, Some(path)), Some(report))
        }
        Ok(None) => {
            tracing::debug!("{} does not exist, starting empty", path.display());
            (EditorSession::with_buffer(LineBuffer::new(limits), Some(path)), None)
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            (EditorSession::with_buffer(LineBuffer::new(limits), Some(path)), None)
        }
    }
}
