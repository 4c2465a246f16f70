use std::process::ExitCode;

use tinge::diag::HintedStrResult;

use tinge_cli::args::Command;
use tinge_cli::{ARGS, EXIT, set_failed, terminal};

/// Entry point.
fn main() -> ExitCode {
    let res = dispatch();

    if let Err(msg) = res {
        set_failed();
        terminal::print_error(&msg).expect("failed to print error");
    }

    EXIT.with(|cell| cell.get())
}

/// Execute the requested command.
fn dispatch() -> HintedStrResult<()> {
    match &ARGS.command {
        Command::Render(command) => tinge_cli::render::render(command)?,
        Command::Markup(command) => tinge_cli::markup::markup(command)?,
    }

    Ok(())
}
