//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::args::OutputArgs;
use crate::log;
use crate::viewer::markup;

/// Whether `input` means stdin (`-` or omitted).
fn is_stdin(input: Option<&Path>) -> bool {
    input.is_none_or(|p| p.as_os_str() == "-")
}

/// Read SVG text from a file, or from stdin when `input` is `-` or omitted.
pub fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input.map(PathBuf::as_path) {
        Some(path) if !is_stdin(Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Display name of an input for logs and page titles.
pub fn input_name(input: Option<&PathBuf>) -> String {
    match input.map(PathBuf::as_path) {
        Some(p) if !is_stdin(Some(p)) => p.display().to_string(),
        _ => "stdin".to_string(),
    }
}

/// Write produced markup, or fail if there is nothing to write.
///
/// `name` labels the source in logs and the page title.
pub fn emit_markup(markup: Option<String>, name: &str, args: &OutputArgs) -> Result<()> {
    let Some(markup) = markup else {
        bail!("{name}: nothing to show");
    };

    let content = if args.html {
        markup::page(name, &markup::fragment(&crate::viewer::ViewState::Ready(markup)), None)
    } else {
        markup
    };

    write_output(&content, args.output.as_deref())
}

/// Write `content` to `output`, or to stdout when unset.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        log!("write"; "{}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")?;
        stdout.flush()?;
    }
    Ok(())
}
