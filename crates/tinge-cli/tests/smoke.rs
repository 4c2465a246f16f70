use std::io;
use std::process::Command;

use tempfile::tempdir;

/// Executes a command with the Tinge CLI.
fn exec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tinge"))
}

#[test]
fn test_help() -> io::Result<()> {
    let output = exec().arg("--help").output()?;
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Renders the color-theme diagram"));
    assert!(stdout.contains("markup"));
    Ok(())
}

#[test]
fn test_markup_to_stdout() -> io::Result<()> {
    let output = exec().arg("markup").output()?;
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.starts_with("strict digraph"));
    assert!(stdout.contains("graph [label=\"base colors\"]"));
    assert!(stdout.contains("normal text"));
    Ok(())
}

#[test]
fn test_markup_to_file() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("theme.dot");
    let status = exec().arg("markup").arg(&path).status()?;
    assert!(status.success());

    let dot = std::fs::read_to_string(&path)?;
    assert!(dot.starts_with("strict digraph"));
    assert!(dot.trim_end().ends_with('}'));
    Ok(())
}

#[test]
fn test_render_with_missing_renderer_fails() -> io::Result<()> {
    let tmp = tempdir()?;
    let output = exec()
        .arg("render")
        .arg("--renderer")
        .arg("/definitely/not/a/renderer")
        .arg("--output-dir")
        .arg(tmp.path())
        .output()?;

    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("error"));
    assert!(stderr.contains("hint"));
    Ok(())
}
