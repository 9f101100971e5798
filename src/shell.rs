//! Shell passthrough for `!command`
//!
//! The command string is handed to the platform shell untouched and the
//! editor blocks until it exits. Output goes straight to the terminal.

use std::io;
use std::process::Command;

/// Runs a raw shell command line
pub trait ShellRunner {
    /// Run `command` to completion, returning its exit code when it has one
    fn run(&mut self, command: &str) -> io::Result<Option<i32>>;
}

/// The system shell (`sh -c` on Unix, `cmd /C` on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl ShellRunner for SystemShell {
    fn run(&mut self, command: &str) -> io::Result<Option<i32>> {
        #[cfg(target_os = "windows")]
        let status = Command::new("cmd").arg("/C").arg(command).status()?;

        #[cfg(not(target_os = "windows"))]
        let status = Command::new("sh").arg("-c").arg(command).status()?;

        tracing::debug!(command, code = ?status.code(), "shell command finished");
        Ok(status.code())
    }
}
