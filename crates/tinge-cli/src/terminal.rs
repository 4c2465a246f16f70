use std::io::{self, IsTerminal, Write};

use codespan_reporting::term::{self, termcolor};
use termcolor::{ColorChoice, WriteColor};

use tinge::diag::HintedString;

use crate::ARGS;

/// A utility that allows users to write colored terminal output.
/// If colors are not supported by the terminal, they are disabled.
pub struct TermOut {
    stream: termcolor::StandardStream,
}

/// Acquire a handle to standard error.
pub fn out() -> TermOut {
    let color_choice = match ARGS.color {
        clap::ColorChoice::Auto if io::stderr().is_terminal() => ColorChoice::Auto,
        clap::ColorChoice::Always => ColorChoice::Always,
        _ => ColorChoice::Never,
    };
    TermOut { stream: termcolor::StandardStream::stderr(color_choice) }
}

impl Write for TermOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl WriteColor for TermOut {
    fn supports_color(&self) -> bool {
        self.stream.supports_color()
    }

    fn set_color(&mut self, spec: &termcolor::ColorSpec) -> io::Result<()> {
        self.stream.set_color(spec)
    }

    fn reset(&mut self) -> io::Result<()> {
        self.stream.reset()
    }
}

/// Print an application-level error and its hints.
pub fn print_error(error: &HintedString) -> io::Result<()> {
    let styles = term::Styles::default();
    let mut output = out();

    output.set_color(&styles.header_error)?;
    write!(output, "error")?;
    output.reset()?;
    writeln!(output, ": {}", error.message())?;

    for hint in error.hints() {
        output.set_color(&styles.header_help)?;
        write!(output, "hint")?;
        output.reset()?;
        writeln!(output, ": {hint}")?;
    }

    Ok(())
}
