pub mod args;
pub mod markup;
pub mod render;
pub mod terminal;

use std::cell::Cell;
use std::process::ExitCode;

use clap::Parser;
use once_cell::sync::Lazy;

use crate::args::CliArguments;

thread_local! {
    /// The CLI's exit code.
    pub static EXIT: Cell<ExitCode> = const { Cell::new(ExitCode::SUCCESS) };
}

/// Ensure a failure exit code.
pub fn set_failed() {
    EXIT.with(|cell| cell.set(ExitCode::FAILURE));
}

/// The parsed commandline arguments.
pub static ARGS: Lazy<CliArguments> = Lazy::new(CliArguments::parse);
