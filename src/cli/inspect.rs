//! `inspect` command: geometry and schedule as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::common::{input_name, read_input, write_output};
use crate::config::KolamConfig;
use crate::svg::analyze;

pub fn inspect(input: Option<&PathBuf>, pretty: bool, config: &KolamConfig) -> Result<()> {
    let name = input_name(input);
    let text = read_input(input)?;

    let Some(analysis) = analyze(&text, &config.animate.options())
        .with_context(|| format!("{name}: malformed SVG"))?
    else {
        bail!("{name}: no <svg> element");
    };

    let json = if pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    write_output(&json, None)
}

#[cfg(test)]
mod tests {
    use crate::svg::{AnimateOptions, analyze};

    #[test]
    fn test_analysis_json_shape() {
        let text = r#"<svg viewBox="0 0 9 9"><circle cx="0" cy="0" r="10"/><circle cx="100" cy="100" r="10"/></svg>"#;
        let analysis = analyze(text, &AnimateOptions::default()).unwrap().unwrap();
        let json: serde_json::Value = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["circles"], 2);
        assert_eq!(json["paths"], 0);
        assert_eq!(json["view_box"], "-30 -30 160 160");
        assert_eq!(json["original_view_box"], "0 0 9 9");
        assert_eq!(json["bounds"]["min_x"], -10.0);
        assert_eq!(json["schedule"]["dots"][1], 0.01);
        assert_eq!(json["schedule"]["total"], 0.32);
    }

    #[test]
    fn test_inspect_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.svg");
        let config = crate::config::KolamConfig::default();
        assert!(super::inspect(Some(&missing), false, &config).is_err());
    }
}
