//! Output formatting - everything the user sees, as plain text
//!
//! Rendering is kept apart from the executor so transcripts stay
//! byte-for-byte predictable in tests.

/// ANSI sequence: clear the screen and home the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Printed once at startup
pub const BANNER: &str = "Few Editor - type 'h' for help";

/// Printed when an input session opens
pub const INPUT_BANNER: &str = "Enter text (end with single '.'):";

/// Line that ends an input session
pub const INPUT_TERMINATOR: &str = ".";

/// Shown after the load message when the file was not valid UTF-8
pub const INVALID_UTF8_NOTICE: &str =
    "Warning: invalid UTF-8 replaced; saving will not restore the original bytes";

/// Asked before quitting with unsaved changes
pub const QUIT_PROMPT: &str = "Unsaved changes. Quit anyway? (y/n) ";

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Help sections: heading plus `(syntax, description)` rows
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("n", "Go to line n"),
            (".", "Show current line"),
            ("$", "Go to last line"),
            ("+/-n", "Move forward/backward n lines"),
        ],
    ),
    (
        "Viewing",
        &[
            ("p", "Print current line"),
            ("n,p", "Print line n"),
            ("a,p", "Print all lines"),
            ("a,n", "Number all lines"),
            ("/text", "Search forward"),
            ("?text", "Search backward"),
        ],
    ),
    (
        "Editing",
        &[
            ("a", "Append after current line"),
            ("i", "Insert before current line"),
            ("c", "Change current line"),
            ("d", "Delete current line"),
            ("n,d", "Delete line n"),
            ("a,d", "Delete all lines"),
            ("s/old/new", "Substitute text"),
        ],
    ),
    (
        "File Operations",
        &[
            ("w", "Save"),
            ("w file", "Save as"),
            ("q", "Quit"),
            ("!cmd", "Execute shell command"),
            ("h", "Show this help"),
        ],
    ),
];

/// A printed buffer line: `{address}\t{text}`
pub fn format_line(addr: usize, text: &str) -> String {
    format!("{}\t{}", addr, text)
}

/// Prompt shown before each line of an input session
pub fn input_prompt(addr: usize) -> String {
    format!("{}> ", addr)
}

pub fn saved_message(count: usize, name: &str) -> String {
    format!("Saved {} lines to {}", count, name)
}

pub fn loaded_message(count: usize, name: &str) -> String {
    format!("Loaded {} lines from {}", count, name)
}

pub fn deleted_message(addr: usize) -> String {
    format!("Line {} deleted", addr)
}

/// The command reference shown by `h`
pub fn help_text(color: bool) -> String {
    let (bold, green, reset) = if color {
        (BOLD, GREEN, RESET)
    } else {
        ("", "", "")
    };

    let mut out = format!("{}Few Editor - Simple Text Editor{}\n", bold, reset);
    for (heading, rows) in HELP_SECTIONS {
        out.push('\n');
        out.push_str(&format!("{}[{}]{}\n", green, heading, reset));
        for (syntax, description) in rows.iter() {
            out.push_str(&format!("{:<11}{}\n", syntax, description));
        }
    }
    out
}
