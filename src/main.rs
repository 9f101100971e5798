#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;

use few::cli::CliArgs;
use few::config::EditorConfig;
use few::persistence::{open_session, FsPersistence};
use few::runtime::{App, RuntimeOptions};
use few::shell::SystemShell;

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    few::tracing::init();

    let args = CliArgs::parse();
    let startup = args
        .into_config(EditorConfig::load())
        .map_err(anyhow::Error::msg)?;

    let mut persistence = FsPersistence;
    let (session, loaded) = open_session(
        &mut persistence,
        startup.file.clone(),
        startup.editor.limits(),
    );

    let stdout = io::stdout();
    let options = RuntimeOptions::from_config(&startup.editor, stdout.is_terminal());

    let mut app = App::new(
        session,
        io::stdin().lock(),
        stdout.lock(),
        Box::new(persistence),
        Box::new(SystemShell),
        options,
    );

    app.greet(loaded).context("Failed to write to terminal")?;
    app.run().context("Terminal I/O failed")?;

    if app.should_quit() {
        tracing::debug!("exiting on quit");
    } else {
        tracing::debug!("exiting at end of input");
    }
    Ok(())
}
