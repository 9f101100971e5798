//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use few::model::{EditorSession, LineBuffer, LineLimits};
use few::persistence::{LoadedText, Persistence};
use few::runtime::{App, RuntimeOptions};
use few::shell::ShellRunner;

/// In-memory files shared between a test and the app that owns the adapter
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    pub files: Rc<RefCell<HashMap<PathBuf, Vec<String>>>>,
    pub fail_writes: bool,
}

impl MemoryPersistence {
    pub fn with_file(path: &str, lines: &[&str]) -> Self {
        let store = Self::default();
        store.files.borrow_mut().insert(
            PathBuf::from(path),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        store
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn contents(&self, path: &str) -> Option<Vec<String>> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self, path: &Path) -> io::Result<Option<LoadedText>> {
        Ok(self.files.borrow().get(path).map(|lines| LoadedText {
            lines: lines.clone(),
            replaced_invalid: false,
        }))
    }

    fn save(&mut self, path: &Path, lines: &[String]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only test store",
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), lines.to_vec());
        Ok(())
    }
}

/// Records shell commands instead of running them
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    pub commands: Rc<RefCell<Vec<String>>>,
}

impl ShellRunner for RecordingShell {
    fn run(&mut self, command: &str) -> io::Result<Option<i32>> {
        self.commands.borrow_mut().push(command.to_string());
        Ok(Some(0))
    }
}

/// Result of running a scripted session
pub struct Transcript {
    pub output: String,
    pub session: EditorSession,
    pub quit: bool,
}

impl Transcript {
    /// Output lines with prompts removed, ready for exact comparison
    pub fn lines(&self) -> Vec<String> {
        self.output
            .lines()
            .map(|line| strip_prompts(line).to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn buffer_lines(&self) -> Vec<&str> {
        self.session
            .buffer
            .lines()
            .iter()
            .map(String::as_str)
            .collect()
    }
}

/// Drop any leading `*` prompts and `N> ` input prompts
fn strip_prompts(line: &str) -> &str {
    let mut rest = line;
    loop {
        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
            continue;
        }
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            if let Some(stripped) = rest[digits..].strip_prefix("> ") {
                rest = stripped;
                continue;
            }
        }
        return rest;
    }
}

/// Session pre-loaded with `lines`, cursor on the last line, clean
pub fn session_with(lines: &[&str]) -> EditorSession {
    let buffer = LineBuffer::from_lines(lines.iter().copied(), LineLimits::default());
    EditorSession::with_buffer(buffer, None)
}

/// Run `script` against `session` with in-memory collaborators
pub fn run_with(
    session: EditorSession,
    script: &str,
    persistence: MemoryPersistence,
    shell: RecordingShell,
) -> Transcript {
    run_bytes(session, script.as_bytes(), persistence, shell)
}

/// Like [`run_with`], for scripts that are not valid UTF-8
pub fn run_bytes(
    session: EditorSession,
    script: &[u8],
    persistence: MemoryPersistence,
    shell: RecordingShell,
) -> Transcript {
    let mut app = App::new(
        session,
        Cursor::new(script.to_vec()),
        Vec::new(),
        Box::new(persistence),
        Box::new(shell),
        RuntimeOptions::default(),
    );
    app.run().unwrap();
    let quit = app.should_quit();
    let (session, output) = app.into_parts();

    Transcript {
        output: String::from_utf8(output).unwrap(),
        session,
        quit,
    }
}

/// Run `script` against a buffer holding `lines`
pub fn run_script(lines: &[&str], script: &str) -> Transcript {
    run_with(
        session_with(lines),
        script,
        MemoryPersistence::default(),
        RecordingShell::default(),
    )
}
