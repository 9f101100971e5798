//! Command parser - classifies one command line into a [`Msg`]
//!
//! Precedence matters; shapes are tried in this order:
//!
//! 1. all digits → `GotoLine`
//! 2. `.` → `ShowCursor`
//! 3. `$` → `GotoLast`
//! 4. `+`/`-` with optional digits → `RelativeMove`
//! 5. `a,p` / `a,n` / `a,d` → whole-buffer commands
//! 6. `a` `i` `c` `d` `h` on their own
//! 7. `N,p` / `N,d` (trailing text after the verb is ignored)
//! 8. `p` with optional digits
//! 9. `w` with optional filename
//! 10. `q`
//! 11. `!command`
//! 12. `/text`, `?text`, `s/old/new`
//!
//! Everything else is `Unknown`.

use crate::messages::{Direction, InputMode, Msg};

/// Parse a number made only of ASCII digits. Values too large for `usize`
/// saturate, since every consumer clamps anyway.
fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(usize::MAX))
}

/// Classify a command line. The line terminator and surrounding whitespace
/// are ignored.
pub fn parse_command(input: &str) -> Msg {
    let cmd = input.trim();

    if let Some(n) = parse_digits(cmd) {
        return Msg::GotoLine(n);
    }

    match cmd {
        "." => return Msg::ShowCursor,
        "$" => return Msg::GotoLast,
        _ => {}
    }

    if let Some(msg) = parse_relative(cmd) {
        return msg;
    }

    if let Some(rest) = cmd.strip_prefix("a,") {
        return match rest {
            "p" => Msg::PrintAll,
            "n" => Msg::NumberAll,
            "d" => Msg::DeleteAll,
            _ => Msg::Unknown(cmd.to_string()),
        };
    }

    match cmd {
        "a" => return Msg::Input(InputMode::Append),
        "i" => return Msg::Input(InputMode::Insert),
        "c" => return Msg::Input(InputMode::Change),
        "d" => return Msg::DeleteCurrent,
        "h" => return Msg::Help,
        _ => {}
    }

    if let Some(msg) = parse_numbered(cmd) {
        return msg;
    }

    if let Some(rest) = cmd.strip_prefix('p') {
        if rest.is_empty() {
            return Msg::PrintCurrent;
        }
        if let Some(n) = parse_digits(rest) {
            return Msg::PrintLine(n);
        }
        return Msg::Unknown(cmd.to_string());
    }

    if let Some(rest) = cmd.strip_prefix('w') {
        let name = rest.trim();
        return Msg::Save((!name.is_empty()).then(|| name.to_string()));
    }

    if cmd == "q" {
        return Msg::Quit;
    }

    if let Some(rest) = cmd.strip_prefix('!') {
        return Msg::ShellExec(rest.to_string());
    }

    if let Some(pattern) = cmd.strip_prefix('/') {
        return Msg::Search {
            direction: Direction::Forward,
            pattern: pattern.to_string(),
        };
    }
    if let Some(pattern) = cmd.strip_prefix('?') {
        return Msg::Search {
            direction: Direction::Backward,
            pattern: pattern.to_string(),
        };
    }

    if let Some(msg) = parse_substitute(cmd) {
        return msg;
    }

    Msg::Unknown(cmd.to_string())
}

/// `+`, `-`, `+n`, `-n`
fn parse_relative(cmd: &str) -> Option<Msg> {
    let (direction, rest) = if let Some(rest) = cmd.strip_prefix('+') {
        (Direction::Forward, rest)
    } else if let Some(rest) = cmd.strip_prefix('-') {
        (Direction::Backward, rest)
    } else {
        return None;
    };

    let count = if rest.is_empty() {
        1
    } else {
        parse_digits(rest)?
    };
    Some(Msg::RelativeMove { direction, count })
}

/// `N,p` and `N,d`; anything after the verb letter is ignored
fn parse_numbered(cmd: &str) -> Option<Msg> {
    let (digits, verb) = cmd.split_once(',')?;
    let n = parse_digits(digits)?;
    match verb.chars().next()? {
        'p' => Some(Msg::PrintLine(n)),
        'd' => Some(Msg::DeleteLine(n)),
        _ => None,
    }
}

/// `s/old/new` with an optional trailing `/`
fn parse_substitute(cmd: &str) -> Option<Msg> {
    let body = cmd.strip_prefix("s/")?;
    let (old, new) = body.split_once('/')?;
    let new = new.strip_suffix('/').unwrap_or(new);
    Some(Msg::Substitute {
        old: old.to_string(),
        new: new.to_string(),
    })
}
