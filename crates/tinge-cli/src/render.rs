use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ecow::eco_format;
use tinge::diag::{Hint, HintedStrResult, RenderError, StrResult, bail};

use crate::args::RenderCommand;
use crate::terminal;

/// Execute a render command.
///
/// Builds the theme, serializes it to DOT and pipes the document through
/// Graphviz. The artifact lands at a deterministic path derived from the
/// theme's display name. If the renderer fails, both the markup and the
/// renderer's output are surfaced for inspection before bailing.
pub fn render(command: &RenderCommand) -> HintedStrResult<()> {
    let theme = tinge::default_theme()?;
    let markup = tinge::markup(&theme);
    let path = artifact_path(command, theme.name());

    let mut child = Command::new(&command.renderer)
        .arg("-T")
        .arg(command.format.as_str())
        .arg("-o")
        .arg(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            eco_format!("failed to run `{}` ({err})", command.renderer.display())
        })
        .hint("point --renderer at a Graphviz `dot` binary")?;

    // The write result is checked only after waiting: if the renderer exits
    // early, its diagnostics matter more than the broken pipe.
    let piped = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(markup.as_bytes()));

    let output = child.wait_with_output().map_err(|err| {
        eco_format!("failed to wait for `{}` ({err})", command.renderer.display())
    })?;

    if !output.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
        let error = RenderError {
            program: eco_format!("{}", command.renderer.display()),
            markup,
            diagnostics: diagnostics.into(),
        };
        surface(&error)
            .map_err(|err| eco_format!("failed to print renderer diagnostics ({err})"))?;
        bail!(
            "{error}";
            hint: "the generated markup and the renderer output are printed above"
        );
    }

    if let Some(Err(err)) = piped {
        bail!("failed to write markup to the renderer ({err})");
    }

    let mut out = terminal::out();
    writeln!(out, "wrote {}", path.display())
        .map_err(|err| eco_format!("failed to write to terminal ({err})"))?;

    if let Some(open) = &command.open {
        open_artifact(open.as_deref(), &path)?;
    }

    Ok(())
}

/// The deterministic artifact path: the theme's display name with
/// filesystem-unsafe characters substituted, plus the format extension.
fn artifact_path(command: &RenderCommand, name: &str) -> PathBuf {
    let stem: String = name
        .chars()
        .map(|c| match c {
            ' ' | ':' => '_',
            '/' => '-',
            c => c,
        })
        .collect();
    let filename = format!("{stem}.{}", command.format.as_str());
    match &command.output_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

/// Dump the markup and the renderer's diagnostic output, verbatim.
fn surface(error: &RenderError) -> std::io::Result<()> {
    let mut out = terminal::out();
    writeln!(out, "{}", error.markup)?;
    writeln!(out, "{}", error.diagnostics)
}

/// Open the rendered artifact using the default or the given viewer.
fn open_artifact(app: Option<&str>, path: &Path) -> StrResult<()> {
    if let Some(app) = app {
        open::with_detached(path, app).map_err(|err| {
            eco_format!("failed to open `{}` with `{app}` ({err})", path.display())
        })
    } else {
        open::that_detached(path)
            .map_err(|err| eco_format!("failed to open `{}` ({err})", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ImageFormat;

    #[test]
    fn test_artifact_path_substitutes_unsafe_characters() {
        let command = RenderCommand {
            format: ImageFormat::Svg,
            output_dir: None,
            renderer: PathBuf::from("dot"),
            open: None,
        };
        assert_eq!(
            artifact_path(&command, "Beamer color theme : default"),
            PathBuf::from("Beamer_color_theme___default.svg"),
        );
        assert_eq!(
            artifact_path(&command, "head/foot"),
            PathBuf::from("head-foot.svg"),
        );
    }
}
