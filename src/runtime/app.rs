//! The interactive loop: prompt, read, parse, update, perform
//!
//! Single-threaded and blocking. One command line is fully handled before
//! the next one is read.

use std::io::{self, BufRead, Write};

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::input::{InputStep, TextInputSession};
use crate::messages::{InputMode, Msg};
use crate::model::{strip_terminator, EditorSession};
use crate::parser::parse_command;
use crate::persistence::{LoadReport, Persistence};
use crate::shell::ShellRunner;
use crate::update::update;
use crate::view;

/// Terminal presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Command prompt marker
    pub prompt: String,
    /// Emit clear-screen sequences on startup and help
    pub clear_screen: bool,
    /// Use ANSI colors in help output
    pub color: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default(), false)
    }
}

impl RuntimeOptions {
    pub fn from_config(config: &EditorConfig, is_terminal: bool) -> Self {
        Self {
            prompt: config.prompt.clone(),
            clear_screen: config.clear_screen && is_terminal,
            color: is_terminal,
        }
    }
}

/// The editor application: one session bound to an input and an output
pub struct App<R: BufRead, W: Write> {
    session: EditorSession,
    reader: R,
    writer: W,
    persistence: Box<dyn Persistence>,
    shell: Box<dyn ShellRunner>,
    options: RuntimeOptions,
    should_quit: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        session: EditorSession,
        reader: R,
        writer: W,
        persistence: Box<dyn Persistence>,
        shell: Box<dyn ShellRunner>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            session,
            reader,
            writer,
            persistence,
            shell,
            options,
            should_quit: false,
        }
    }

    /// Tear down the app, returning the final session and the output sink
    pub fn into_parts(self) -> (EditorSession, W) {
        (self.session, self.writer)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Print the startup banner and, if a file was loaded, its line count
    pub fn greet(&mut self, loaded: Option<LoadReport>) -> io::Result<()> {
        self.clear_screen()?;
        writeln!(self.writer, "{}", view::BANNER)?;
        if let (Some(report), Some(name)) = (loaded, self.session.file_name()) {
            writeln!(self.writer, "{}", view::loaded_message(report.lines, &name))?;
            if report.replaced_invalid {
                writeln!(self.writer, "{}", view::INVALID_UTF8_NOTICE)?;
            }
        }
        Ok(())
    }

    /// Run until `q` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        while !self.should_quit {
            write!(self.writer, "{}", self.options.prompt)?;
            self.writer.flush()?;

            let Some(line) = self.read_line()? else {
                tracing::debug!("end of input");
                break;
            };
            self.process_line(&line)?;
        }
        self.writer.flush()
    }

    /// Handle one command line. Returns false once the editor should exit.
    pub fn process_line(&mut self, line: &str) -> io::Result<bool> {
        let line = strip_terminator(line);
        if line.is_empty() {
            return Ok(!self.should_quit);
        }

        let msg = parse_command(line);
        let cmd = update(&mut self.session, msg);
        self.perform(cmd)?;
        Ok(!self.should_quit)
    }

    /// Read one raw line; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("replaced invalid UTF-8 in input line");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        if self.options.clear_screen {
            write!(self.writer, "{}", view::CLEAR_SCREEN)?;
        }
        Ok(())
    }

    /// Carry out a side effect requested by the executor
    fn perform(&mut self, cmd: Cmd) -> io::Result<()> {
        match cmd {
            Cmd::Print(lines) => {
                for line in lines {
                    writeln!(self.writer, "{}", line)?;
                }
            }
            Cmd::SaveFile { path, lines } => {
                let result = self
                    .persistence
                    .save(&path, &lines)
                    .map(|_| lines.len())
                    .map_err(|e| e.to_string());
                let follow_up = update(&mut self.session, Msg::SaveCompleted { path, result });
                self.perform(follow_up)?;
            }
            Cmd::BeginInput(mode) => self.run_input(mode)?,
            Cmd::RunShell(command) => {
                self.writer.flush()?;
                if let Err(e) = self.shell.run(&command) {
                    tracing::warn!("Failed to run shell command {:?}: {}", command, e);
                    writeln!(self.writer, "?")?;
                }
            }
            Cmd::ShowHelp => {
                self.clear_screen()?;
                write!(self.writer, "{}", view::help_text(self.options.color))?;
            }
            Cmd::ConfirmQuit => {
                write!(self.writer, "{}", view::QUIT_PROMPT)?;
                self.writer.flush()?;
                // Anything but a leading `y` cancels; the rest of the reply is discarded
                let confirmed = self
                    .read_line()?
                    .is_some_and(|reply| reply.starts_with('y'));
                if confirmed {
                    self.should_quit = true;
                } else {
                    tracing::debug!("quit cancelled");
                }
            }
            Cmd::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// Read lines into the buffer until `.`, end of input, or a full buffer
    fn run_input(&mut self, mode: InputMode) -> io::Result<()> {
        let mut input = match TextInputSession::begin(mode, &self.session.buffer) {
            Ok(input) => input,
            Err(e) => {
                writeln!(self.writer, "{}", e)?;
                return Ok(());
            }
        };

        writeln!(self.writer, "{}", view::INPUT_BANNER)?;
        loop {
            write!(self.writer, "{}", view::input_prompt(input.target()))?;
            self.writer.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let step = input.feed(&mut self.session.buffer, &line);
            if let InputStep::Rejected(e) | InputStep::Aborted(e) = &step {
                writeln!(self.writer, "{}", e)?;
            }
            if step.is_done() {
                break;
            }
        }
        tracing::debug!(lines = input.accepted(), "input session closed");
        Ok(())
    }
}
