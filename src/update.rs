//! Update function for the Elm-style architecture
//!
//! The command executor: applies one [`Msg`] to the [`EditorSession`] and
//! returns the [`Cmd`] the runtime should perform. Every error is rendered
//! here as a single output line; nothing propagates.

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::error::{EditError, EditResult};
use crate::messages::{Direction, InputMode, Msg};
use crate::model::EditorSession;
use crate::tracing::BufferSnapshot;
use crate::view;

/// Main update function - dispatches to the command handlers
pub fn update(session: &mut EditorSession, msg: Msg) -> Cmd {
    tracing::debug!(?msg, "executing command");
    let before = BufferSnapshot::from_session(session);

    let result = match msg {
        Msg::GotoLine(n) => goto_line(session, n),
        Msg::GotoLast => goto_last(session),
        Msg::ShowCursor => show_cursor(session),
        Msg::RelativeMove { direction, count } => relative_move(session, direction, count),

        Msg::PrintCurrent => print_current(session),
        Msg::PrintLine(n) => print_line(session, n),
        Msg::PrintAll | Msg::NumberAll => print_all(session),
        Msg::Search { direction, pattern } => search(session, direction, pattern),

        Msg::Input(mode) => begin_input(session, mode),
        Msg::DeleteCurrent => delete_current(session),
        Msg::DeleteLine(n) => delete_line(session, n),
        Msg::DeleteAll => delete_all(session),
        Msg::Substitute { old, new } => substitute(session, &old, &new),

        Msg::Save(name) => save(session, name),
        Msg::SaveCompleted { path, result } => save_completed(session, path, result),
        Msg::Quit => Ok(quit(session)),
        Msg::ShellExec(command) => Ok(Cmd::RunShell(command)),
        Msg::Help => Ok(Cmd::ShowHelp),
        Msg::Unknown(_) => Err(EditError::UnknownCommand),
    };

    let after = BufferSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        tracing::debug!("buffer: {}", diff);
    }

    result.unwrap_or_else(|e| {
        tracing::debug!(error = e.kind(), "command failed");
        Cmd::line(e.to_string())
    })
}

// ============================================================================
// Navigation
// ============================================================================

/// Print line `addr` as `{addr}\t{text}`
fn print_at(session: &EditorSession, addr: usize) -> EditResult<Cmd> {
    let text = session.buffer.get(addr)?;
    Ok(Cmd::line(view::format_line(addr, text)))
}

fn goto_line(session: &mut EditorSession, n: usize) -> EditResult<Cmd> {
    let addr = session
        .buffer
        .set_cursor(n)
        .ok_or(EditError::InvalidAddress)?;
    print_at(session, addr)
}

fn goto_last(session: &mut EditorSession) -> EditResult<Cmd> {
    let last = session
        .buffer
        .last_address()
        .ok_or(EditError::InvalidAddress)?;
    goto_line(session, last)
}

fn show_cursor(session: &EditorSession) -> EditResult<Cmd> {
    let addr = session.buffer.cursor().ok_or(EditError::InvalidAddress)?;
    Ok(Cmd::line(addr.to_string()))
}

fn relative_move(
    session: &mut EditorSession,
    direction: Direction,
    count: usize,
) -> EditResult<Cmd> {
    let addr = session
        .buffer
        .move_cursor(direction == Direction::Forward, count)
        .ok_or(EditError::InvalidAddress)?;
    print_at(session, addr)
}

// ============================================================================
// Viewing
// ============================================================================

fn print_current(session: &EditorSession) -> EditResult<Cmd> {
    let addr = session.buffer.cursor().ok_or(EditError::InvalidAddress)?;
    print_at(session, addr)
}

fn print_line(session: &mut EditorSession, n: usize) -> EditResult<Cmd> {
    let cmd = print_at(session, n)?;
    session.buffer.set_cursor(n);
    Ok(cmd)
}

fn print_all(session: &mut EditorSession) -> EditResult<Cmd> {
    let lines: Vec<String> = session
        .buffer
        .get_range(1, session.buffer.len())
        .map(|(addr, text)| view::format_line(addr, text))
        .collect();
    if let Some(last) = session.buffer.last_address() {
        session.buffer.set_cursor(last);
    }
    Ok(Cmd::Print(lines))
}

/// Literal substring search starting next to the cursor and wrapping around.
/// The current line is examined last.
fn search(
    session: &mut EditorSession,
    direction: Direction,
    pattern: String,
) -> EditResult<Cmd> {
    let pattern = if pattern.is_empty() {
        session
            .last_pattern
            .clone()
            .ok_or(EditError::InvalidAddress)?
    } else {
        pattern
    };
    session.last_pattern = Some(pattern.clone());

    let count = session.buffer.len();
    let cursor = session.buffer.cursor().ok_or(EditError::InvalidAddress)?;

    let found = (1..=count)
        .map(|step| match direction {
            Direction::Forward => (cursor - 1 + step) % count + 1,
            Direction::Backward => (cursor - 1 + count - step % count) % count + 1,
        })
        .find(|&addr| {
            session
                .buffer
                .get(addr)
                .is_ok_and(|text| text.contains(pattern.as_str()))
        })
        .ok_or(EditError::InvalidAddress)?;

    session.buffer.set_cursor(found);
    print_at(session, found)
}

// ============================================================================
// Editing
// ============================================================================

fn begin_input(session: &EditorSession, mode: InputMode) -> EditResult<Cmd> {
    if mode == InputMode::Change && session.buffer.cursor().is_none() {
        return Err(EditError::InvalidAddress);
    }
    Ok(Cmd::BeginInput(mode))
}

fn delete_current(session: &mut EditorSession) -> EditResult<Cmd> {
    let addr = session.buffer.cursor().ok_or(EditError::InvalidAddress)?;
    session.buffer.delete(addr)?;
    Ok(Cmd::line(view::deleted_message(addr)))
}

/// Delete line `n`; a deletion at or above the cursor pulls the cursor up one
fn delete_line(session: &mut EditorSession, n: usize) -> EditResult<Cmd> {
    let cursor = session.buffer.cursor().unwrap_or(0);
    session.buffer.delete(n)?;

    let target = if n <= cursor { cursor - 1 } else { cursor };
    session.buffer.set_cursor(target);
    Ok(Cmd::line(view::deleted_message(n)))
}

fn delete_all(session: &mut EditorSession) -> EditResult<Cmd> {
    let removed = session.buffer.delete_all();
    tracing::debug!(removed, "deleted all lines");
    Ok(Cmd::line("All lines deleted"))
}

/// Replace the first literal occurrence of `old` on the current line
fn substitute(session: &mut EditorSession, old: &str, new: &str) -> EditResult<Cmd> {
    if old.is_empty() {
        return Err(EditError::InvalidAddress);
    }
    let addr = session.buffer.cursor().ok_or(EditError::InvalidAddress)?;
    let text = session.buffer.get(addr)?;
    if !text.contains(old) {
        return Err(EditError::InvalidAddress);
    }

    let replaced = text.replacen(old, new, 1);
    session.buffer.replace(addr, replaced)?;
    print_at(session, addr)
}

// ============================================================================
// File / application
// ============================================================================

/// A given filename becomes the session's target even if the write fails
fn save(session: &mut EditorSession, name: Option<String>) -> EditResult<Cmd> {
    if let Some(name) = name {
        session.file_path = Some(PathBuf::from(name));
    }
    let path = session
        .file_path
        .clone()
        .ok_or(EditError::NoFilenameSpecified)?;

    Ok(Cmd::SaveFile {
        path,
        lines: session.buffer.lines().to_vec(),
    })
}

fn save_completed(
    session: &mut EditorSession,
    path: PathBuf,
    result: Result<usize, String>,
) -> EditResult<Cmd> {
    match result {
        Ok(count) => {
            session.buffer.mark_saved();
            tracing::info!("Saved {} lines to {}", count, path.display());
            Ok(Cmd::line(view::saved_message(
                count,
                &path.display().to_string(),
            )))
        }
        Err(reason) => {
            tracing::warn!("Failed to write {}: {}", path.display(), reason);
            Err(EditError::FileWriteFailure(reason))
        }
    }
}

fn quit(session: &EditorSession) -> Cmd {
    if session.is_modified() {
        Cmd::ConfirmQuit
    } else {
        Cmd::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineBuffer, LineLimits};

    fn session(lines: &[&str]) -> EditorSession {
        let buffer = LineBuffer::from_lines(lines.iter().copied(), LineLimits::default());
        EditorSession::with_buffer(buffer, None)
    }

    fn printed(cmd: &Cmd) -> Vec<&str> {
        match cmd {
            Cmd::Print(lines) => lines.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_goto_prints_and_moves() {
        let mut s = session(&["a", "b", "c"]);
        let cmd = update(&mut s, Msg::GotoLine(2));
        assert_eq!(printed(&cmd), vec!["2\tb"]);
        assert_eq!(s.buffer.cursor(), Some(2));
    }

    #[test]
    fn test_goto_clamps() {
        let mut s = session(&["a", "b", "c"]);
        assert_eq!(printed(&update(&mut s, Msg::GotoLine(0))), vec!["1\ta"]);
        assert_eq!(printed(&update(&mut s, Msg::GotoLine(50))), vec!["3\tc"]);
    }

    #[test]
    fn test_navigation_on_empty_buffer_reports_question_mark() {
        let mut s = session(&[]);
        for msg in [
            Msg::GotoLine(1),
            Msg::GotoLast,
            Msg::ShowCursor,
            Msg::PrintCurrent,
            Msg::RelativeMove {
                direction: Direction::Forward,
                count: 1,
            },
        ] {
            assert_eq!(printed(&update(&mut s, msg)), vec!["?"]);
        }
    }

    #[test]
    fn test_show_cursor() {
        let mut s = session(&["a", "b"]);
        assert_eq!(printed(&update(&mut s, Msg::ShowCursor)), vec!["2"]);
    }

    #[test]
    fn test_print_line_out_of_range_leaves_cursor() {
        let mut s = session(&["a", "b"]);
        s.buffer.set_cursor(1);
        assert_eq!(printed(&update(&mut s, Msg::PrintLine(9))), vec!["?"]);
        assert_eq!(s.buffer.cursor(), Some(1));
        assert_eq!(printed(&update(&mut s, Msg::PrintLine(2))), vec!["2\tb"]);
        assert_eq!(s.buffer.cursor(), Some(2));
    }

    #[test]
    fn test_print_all_moves_cursor_to_end() {
        let mut s = session(&["a", "b"]);
        s.buffer.set_cursor(1);
        let cmd = update(&mut s, Msg::NumberAll);
        assert_eq!(printed(&cmd), vec!["1\ta", "2\tb"]);
        assert_eq!(s.buffer.cursor(), Some(2));
    }

    #[test]
    fn test_delete_current_reports_removed_address() {
        let mut s = session(&["a", "b", "c"]);
        s.buffer.set_cursor(3);
        assert_eq!(
            printed(&update(&mut s, Msg::DeleteCurrent)),
            vec!["Line 3 deleted"]
        );
        assert_eq!(s.buffer.cursor(), Some(2));
        assert!(s.is_modified());
    }

    #[test]
    fn test_delete_line_above_cursor_pulls_cursor_up() {
        let mut s = session(&["a", "b", "c", "d"]);
        s.buffer.set_cursor(3);
        update(&mut s, Msg::DeleteLine(1));
        assert_eq!(s.buffer.cursor(), Some(2));
        assert_eq!(s.buffer.get(2), Ok("c"));
    }

    #[test]
    fn test_delete_line_below_cursor_keeps_cursor() {
        let mut s = session(&["a", "b", "c", "d"]);
        s.buffer.set_cursor(2);
        update(&mut s, Msg::DeleteLine(4));
        assert_eq!(s.buffer.cursor(), Some(2));
    }

    #[test]
    fn test_delete_first_line_at_cursor_stays_on_first() {
        let mut s = session(&["a", "b"]);
        s.buffer.set_cursor(1);
        update(&mut s, Msg::DeleteLine(1));
        assert_eq!(s.buffer.cursor(), Some(1));
    }

    #[test]
    fn test_delete_line_invalid() {
        let mut s = session(&["a"]);
        assert_eq!(printed(&update(&mut s, Msg::DeleteLine(2))), vec!["?"]);
        assert!(!s.is_modified());
    }

    #[test]
    fn test_change_on_empty_buffer_is_refused() {
        let mut s = session(&[]);
        assert_eq!(
            printed(&update(&mut s, Msg::Input(InputMode::Change))),
            vec!["?"]
        );
        assert_eq!(
            update(&mut s, Msg::Input(InputMode::Append)),
            Cmd::BeginInput(InputMode::Append)
        );
    }

    #[test]
    fn test_search_forward_wraps() {
        let mut s = session(&["apple", "banana", "cherry", "apricot"]);
        s.buffer.set_cursor(4);
        let cmd = update(
            &mut s,
            Msg::Search {
                direction: Direction::Forward,
                pattern: "ap".to_string(),
            },
        );
        assert_eq!(printed(&cmd), vec!["1\tapple"]);
        assert_eq!(s.buffer.cursor(), Some(1));
    }

    #[test]
    fn test_search_backward_and_reuse_pattern() {
        let mut s = session(&["apple", "banana", "cherry", "apricot"]);
        s.buffer.set_cursor(2);
        let first = update(
            &mut s,
            Msg::Search {
                direction: Direction::Backward,
                pattern: "ap".to_string(),
            },
        );
        assert_eq!(printed(&first), vec!["1\tapple"]);

        let again = update(
            &mut s,
            Msg::Search {
                direction: Direction::Backward,
                pattern: String::new(),
            },
        );
        assert_eq!(printed(&again), vec!["4\tapricot"]);
    }

    #[test]
    fn test_search_miss_keeps_cursor() {
        let mut s = session(&["a", "b"]);
        s.buffer.set_cursor(1);
        let cmd = update(
            &mut s,
            Msg::Search {
                direction: Direction::Forward,
                pattern: "zzz".to_string(),
            },
        );
        assert_eq!(printed(&cmd), vec!["?"]);
        assert_eq!(s.buffer.cursor(), Some(1));
    }

    #[test]
    fn test_substitute_first_occurrence_only() {
        let mut s = session(&["one two one"]);
        let cmd = update(
            &mut s,
            Msg::Substitute {
                old: "one".to_string(),
                new: "1".to_string(),
            },
        );
        assert_eq!(printed(&cmd), vec!["1\t1 two one"]);
        assert!(s.is_modified());
    }

    #[test]
    fn test_substitute_without_match() {
        let mut s = session(&["abc"]);
        let cmd = update(
            &mut s,
            Msg::Substitute {
                old: "x".to_string(),
                new: "y".to_string(),
            },
        );
        assert_eq!(printed(&cmd), vec!["?"]);
        assert!(!s.is_modified());
    }

    #[test]
    fn test_save_without_filename() {
        let mut s = session(&[]);
        let cmd = update(&mut s, Msg::Save(None));
        assert_eq!(printed(&cmd), vec!["No filename specified"]);
        assert!(!s.is_modified());
    }

    #[test]
    fn test_save_with_name_sets_target() {
        let mut s = session(&["x"]);
        let cmd = update(&mut s, Msg::Save(Some("out.txt".to_string())));
        assert_eq!(
            cmd,
            Cmd::SaveFile {
                path: PathBuf::from("out.txt"),
                lines: vec!["x".to_string()],
            }
        );
        assert_eq!(s.file_path, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_save_completed_clears_modified() {
        let mut s = session(&["x"]);
        s.buffer.insert_after(1, "y").unwrap();
        let cmd = update(
            &mut s,
            Msg::SaveCompleted {
                path: PathBuf::from("f.txt"),
                result: Ok(2),
            },
        );
        assert_eq!(printed(&cmd), vec!["Saved 2 lines to f.txt"]);
        assert!(!s.is_modified());
    }

    #[test]
    fn test_save_failure_keeps_modified() {
        let mut s = session(&["x"]);
        s.buffer.insert_after(1, "y").unwrap();
        let cmd = update(
            &mut s,
            Msg::SaveCompleted {
                path: PathBuf::from("/nope/f.txt"),
                result: Err("denied".to_string()),
            },
        );
        assert_eq!(printed(&cmd), vec!["Can't write file"]);
        assert!(s.is_modified());
    }

    #[test]
    fn test_quit_confirms_only_when_dirty() {
        let mut s = session(&["x"]);
        assert_eq!(update(&mut s, Msg::Quit), Cmd::Quit);
        s.buffer.replace(1, "y").unwrap();
        assert_eq!(update(&mut s, Msg::Quit), Cmd::ConfirmQuit);
    }

    #[test]
    fn test_unknown_prints_question_mark() {
        let mut s = session(&["x"]);
        assert_eq!(
            printed(&update(&mut s, Msg::Unknown("zz".to_string()))),
            vec!["?"]
        );
    }
}
