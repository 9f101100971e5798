//! Logging setup and buffer-state snapshots
//!
//! Two sinks are installed:
//! - stderr, filtered by `RUST_LOG` (default `warn`) so the editor
//!   transcript on stdout stays clean
//! - a daily rolling file in the log directory, always at `debug`
//!
//! Useful filters:
//! - `RUST_LOG=few::update=debug` - each command and its buffer diff
//! - `RUST_LOG=few::model=trace` - every line insert and delete

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use crate::config_paths;
use crate::model::EditorSession;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer() -> BoxedLayer {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter)
        .boxed()
}

/// `None` when the log directory cannot be created; the editor still runs
fn file_layer() -> Option<BoxedLayer> {
    let dir = config_paths::ensure_logs_dir()
        .map_err(|e| eprintln!("few: file logging disabled: {}", e))
        .ok()?;
    let appender = tracing_appender::rolling::daily(dir, config_paths::LOG_FILE_PREFIX);
    Some(
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("debug"))
            .boxed(),
    )
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init() {
    let layers: Vec<BoxedLayer> = std::iter::once(stderr_layer()).chain(file_layer()).collect();
    tracing_subscriber::registry().with(layers).init();
}

/// Lightweight snapshot of buffer state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub line_count: usize,
    pub cursor: Option<usize>,
    pub modified: bool,
}

impl BufferSnapshot {
    pub fn from_session(session: &EditorSession) -> Self {
        BufferSnapshot {
            line_count: session.buffer.len(),
            cursor: session.buffer.cursor(),
            modified: session.is_modified(),
        }
    }

    /// Human-readable changes from `self` to `other`, `None` when equal
    pub fn diff(&self, other: &BufferSnapshot) -> Option<String> {
        let mut changes: Vec<String> = Vec::with_capacity(3);

        if self.line_count != other.line_count {
            changes.push(format!(
                "lines: {} → {}",
                self.line_count, other.line_count
            ));
        }
        if self.cursor != other.cursor {
            changes.push(format!(
                "cursor: {} → {}",
                describe_cursor(self.cursor),
                describe_cursor(other.cursor)
            ));
        }
        if self.modified != other.modified {
            let status = if other.modified { "dirty" } else { "clean" };
            changes.push(format!("buffer {}", status));
        }

        (!changes.is_empty()).then(|| changes.join("; "))
    }
}

fn describe_cursor(cursor: Option<usize>) -> String {
    cursor.map_or_else(|| "-".to_string(), |c| c.to_string())
}
