//! `render` and `normalize` commands.

use std::path::PathBuf;

use anyhow::Result;
use tokio::runtime::Runtime;

use super::args::OutputArgs;
use super::common::{emit_markup, input_name, read_input};
use crate::config::KolamConfig;
use crate::source::{self, HttpFetcher, LoadError};
use crate::svg::{SvgError, normalize_svg};
use crate::{debug, log};

/// Fetch `src` (absolute, or relative to the base URL) and write its markup.
pub fn render(src: &str, args: &OutputArgs, config: &KolamConfig, runtime: &Runtime) -> Result<()> {
    let fetcher = HttpFetcher::new(config.source.timeout())?;
    let base = config.source.base_url();
    let options = config.animate.options();

    let result = runtime.block_on(source::load(&fetcher, src, base.as_ref(), &options));
    emit_markup(report(src, result), src, args)
}

/// Normalize a local file or stdin and write its markup.
pub fn normalize(input: Option<&PathBuf>, args: &OutputArgs, config: &KolamConfig) -> Result<()> {
    let name = input_name(input);
    let text = read_input(input)?;
    debug!("normalize"; "{}: {} bytes", name, text.len());

    let result = normalize_svg(&text, &config.animate.options()).map_err(LoadError::from);
    emit_markup(report(&name, result), &name, args)
}

/// Log why a load produced nothing; pass markup through.
fn report(name: &str, result: Result<Option<String>, LoadError>) -> Option<String> {
    match result {
        Ok(Some(markup)) => Some(markup),
        Ok(None) => {
            log!("warning"; "{}: no <svg> element", name);
            None
        }
        Err(LoadError::Parse(SvgError::Xml { position, message })) => {
            log!("error"; "{}: malformed SVG at byte {}: {}", name, position, message);
            None
        }
        Err(e) => {
            log!("error"; "{}: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_file_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("k.svg");
        let output = dir.path().join("out.svg");
        fs::write(&input, r#"<svg><circle cx="0" cy="0" r="10"/></svg>"#).unwrap();

        let args = OutputArgs {
            output: Some(output.clone()),
            html: false,
        };
        normalize(Some(&input), &args, &KolamConfig::default()).unwrap();

        let markup = fs::read_to_string(&output).unwrap();
        assert!(markup.starts_with(r#"<svg viewBox="-30 -30 60 60" width="100%" height="100%"><style>"#));
    }

    #[test]
    fn test_normalize_malformed_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.svg");
        let output = dir.path().join("out.svg");
        fs::write(&input, "<svg><g></svg>").unwrap();

        let args = OutputArgs {
            output: Some(output.clone()),
            html: false,
        };
        assert!(normalize(Some(&input), &args, &KolamConfig::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_render_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("k.svg");
        let output = dir.path().join("out.svg");
        fs::write(&input, r#"<svg><line x1="0" y1="0" x2="10" y2="10"/></svg>"#).unwrap();

        let mut config = KolamConfig::default();
        config.source.base_url = Some(url::Url::from_directory_path(dir.path()).unwrap().to_string());

        let args = OutputArgs {
            output: Some(output.clone()),
            html: false,
        };
        let runtime = Runtime::new().unwrap();
        render("k.svg", &args, &config, &runtime).unwrap();

        let markup = fs::read_to_string(&output).unwrap();
        assert!(markup.contains(r#"class="animated-path""#));
        assert!(markup.contains("animation-delay: 0.3s"));
    }

    #[test]
    fn test_report_passes_markup() {
        assert_eq!(report("k", Ok(Some("<svg/>".into()))), Some("<svg/>".into()));
        assert_eq!(report("k", Ok(None)), None);
        assert_eq!(report("k", Err(LoadError::Parse(SvgError::Unbalanced))), None);
    }
}
