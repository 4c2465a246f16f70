use std::io::{self, Write};

use ecow::eco_format;
use tinge::diag::HintedStrResult;

use crate::args::MarkupCommand;

/// Execute a markup command: write the DOT document to a file or stdout.
pub fn markup(command: &MarkupCommand) -> HintedStrResult<()> {
    let theme = tinge::default_theme()?;
    let markup = tinge::markup(&theme);

    match &command.output {
        Some(path) => std::fs::write(path, markup.as_bytes()).map_err(|err| {
            eco_format!("failed to write `{}` ({err})", path.display())
        })?,
        None => io::stdout()
            .write_all(markup.as_bytes())
            .map_err(|err| eco_format!("failed to write to stdout ({err})"))?,
    }

    Ok(())
}
