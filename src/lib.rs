//! Few - a tiny line editor
//!
//! This crate provides the core types and logic for an `ed`-style line
//! editor built on the Elm Architecture pattern: command lines are parsed
//! into messages, `update` applies them to the session, and the runtime
//! performs the resulting commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod input;
pub mod messages;
pub mod model;
pub mod parser;
pub mod persistence;
pub mod runtime;
pub mod shell;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::EditError;
pub use messages::Msg;
pub use model::{EditorSession, LineBuffer, LineLimits};
