//! Runtime module - terminal integration
//!
//! This module contains the code that binds the editor to real I/O:
//! - `app` - the blocking read/eval/print loop and side-effect execution

pub mod app;

pub use app::{App, RuntimeOptions};
