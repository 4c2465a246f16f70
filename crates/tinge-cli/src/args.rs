use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};

/// The Tinge diagram generator.
#[derive(Debug, Clone, Parser)]
#[clap(name = "tinge", version, author)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Whether to use color in output
    #[clap(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Renders the color-theme diagram to an image through Graphviz
    #[command(visible_alias = "r")]
    Render(RenderCommand),

    /// Writes the generated DOT markup without invoking Graphviz
    Markup(MarkupCommand),
}

/// Renders the color-theme diagram to an image through Graphviz
#[derive(Debug, Clone, Parser)]
pub struct RenderCommand {
    /// The image format to produce
    #[clap(long, value_enum, default_value_t = ImageFormat::Svg)]
    pub format: ImageFormat,

    /// The directory to place the rendered artifact in
    #[clap(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the Graphviz `dot` executable
    #[clap(long, value_name = "PATH", default_value = "dot")]
    pub renderer: PathBuf,

    /// Opens the artifact using the default viewer after rendering
    #[arg(long = "open")]
    pub open: Option<Option<String>>,
}

/// Writes the generated DOT markup without invoking Graphviz
#[derive(Debug, Clone, Parser)]
pub struct MarkupCommand {
    /// Path to the output file; writes to stdout if omitted
    pub output: Option<PathBuf>,
}

/// An image format supported by the Graphviz renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ImageFormat {
    Svg,
    Png,
    Pdf,
}

impl ImageFormat {
    /// The format name as passed to `-T`, doubling as the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}
