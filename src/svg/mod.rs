//! SVG normalization and animation.
//!
//! Trims the whitespace around a drawing by recomputing its viewBox from the
//! geometry, then annotates it so dots fade in before strokes are drawn.
//!
//! # Modules
//!
//! - [`document`]: quick-xml scan and rewrite passes
//! - [`primitive`]: circles, paths and lines
//! - [`bounds`]: bounding box fold
//! - [`path`]: path-data bounds (token scan or command parser)
//! - [`schedule`]: per-element animation delays
//! - [`style`]: injected keyframes and attribute edits
//!
//! # Architecture
//!
//! ```text
//! SVG text
//!    │
//!    ▼
//! ┌──────┐
//! │ scan │ ──► primitives in document order
//! └──┬───┘
//!    │
//!    ▼
//! ┌──────────────────┐
//! │ bounds, schedule │ ──► padded viewBox (if well-formed), delays
//! └──┬───────────────┘
//!    │
//!    ▼
//! ┌─────────┐
//! │ rewrite │ ──► root subtree with viewBox, <style>, classes, delays
//! └─────────┘
//! ```

mod bounds;
mod document;
mod path;
mod primitive;
mod schedule;
mod style;

pub use bounds::BoundingBox;
pub use path::PathBounds;
pub use primitive::Primitive;
pub use schedule::{AnimationSchedule, Timing};

use primitive::Role;
use serde::Serialize;
use thiserror::Error;

/// Default whitespace kept around the drawing, in user units.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Default stroke dash length used by the draw animation.
pub const DEFAULT_DASH_LENGTH: u32 = 1000;

/// The text is not a well-formed XML document.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error at position {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("unbalanced element tags")]
    Unbalanced,

    #[error("invalid attribute: {0}")]
    Attribute(String),

    #[error("failed to serialize SVG: {0}")]
    Write(String),

    #[error("primitive count changed between passes")]
    ScheduleMismatch,
}

/// Knobs for one normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateOptions {
    /// Margin added around the computed bounds.
    pub padding: f64,
    pub timing: Timing,
    /// Dash array/offset pair for the stroke reveal.
    pub dash_length: u32,
    /// Force `width`/`height` to `100%` when the viewBox is rewritten.
    pub fill_container: bool,
    pub path_bounds: PathBounds,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            timing: Timing::default(),
            dash_length: DEFAULT_DASH_LENGTH,
            fill_container: true,
            path_bounds: PathBounds::default(),
        }
    }
}

/// Geometry and schedule computed for a document, before rewriting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub circles: usize,
    pub paths: usize,
    pub lines: usize,
    /// Unpadded bounds, when the primitives yield a well-formed box.
    pub bounds: Option<BoundingBox>,
    /// The root's viewBox as found in the document.
    pub original_view_box: Option<String>,
    /// The viewBox that replaces it; `None` keeps the original.
    pub view_box: Option<String>,
    pub schedule: AnimationSchedule,
}

/// Compute bounds, replacement viewBox and schedule without rewriting.
///
/// Returns `Ok(None)` when the text has no `svg` element.
pub fn analyze(text: &str, options: &AnimateOptions) -> Result<Option<Analysis>, SvgError> {
    let Some(scan) = document::scan(text)? else {
        return Ok(None);
    };
    Ok(Some(analysis_of(&scan, options)))
}

fn analysis_of(scan: &document::Scan, options: &AnimateOptions) -> Analysis {
    let mut bbox = BoundingBox::EMPTY;
    let (mut circles, mut paths, mut lines) = (0, 0, 0);

    for primitive in &scan.primitives {
        match primitive {
            Primitive::Circle { .. } => circles += 1,
            Primitive::Path { .. } => paths += 1,
            Primitive::Line { .. } => lines += 1,
        }
        primitive.fold(options.path_bounds, &mut bbox);
    }

    let bounds = bbox.checked();
    let view_box = bounds
        .and_then(|b| b.padded(options.padding).checked())
        .map(|b| b.to_view_box());

    Analysis {
        circles,
        paths,
        lines,
        bounds,
        original_view_box: scan.view_box.clone(),
        view_box,
        schedule: AnimationSchedule::new(
            scan.count(Role::Dot),
            scan.count(Role::Stroke),
            &options.timing,
        ),
    }
}

/// Normalize and animate an SVG document.
///
/// Returns the serialized root element, or `Ok(None)` when the text holds no
/// `svg` element. Malformed XML is an error.
pub fn normalize_svg(text: &str, options: &AnimateOptions) -> Result<Option<String>, SvgError> {
    let Some(scan) = document::scan(text)? else {
        return Ok(None);
    };
    let analysis = analysis_of(&scan, options);
    let css = style::animation_css(options);

    let plan = document::Plan {
        view_box: analysis.view_box,
        fill_container: options.fill_container,
        css: &css,
        schedule: &analysis.schedule,
    };
    document::rewrite(text, &plan).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TWO_DOTS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 500 500" width="500" height="500">
  <circle cx="0" cy="0" r="10"/>
  <circle cx="100" cy="100" r="10"/>
</svg>"#;

    /// Pull every `animation-delay: Ns` value out of the markup, in order,
    /// split by element kind.
    fn delays(markup: &str, tag: &str) -> Vec<Duration> {
        markup
            .split(&format!("<{tag} "))
            .skip(1)
            .filter_map(|rest| {
                let start = rest.find("animation-delay: ")? + "animation-delay: ".len();
                let end = start + rest[start..].find('s')?;
                rest[start..end].parse::<f64>().ok()
            })
            .map(Duration::from_secs_f64)
            .collect()
    }

    #[test]
    fn test_two_circles_bounds_and_view_box() {
        let analysis = analyze(TWO_DOTS, &AnimateOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            analysis.bounds,
            Some(BoundingBox::from_corners(-10.0, -10.0, 110.0, 110.0))
        );
        assert_eq!(analysis.view_box.as_deref(), Some("-30 -30 160 160"));

        let markup = normalize_svg(TWO_DOTS, &AnimateOptions::default())
            .unwrap()
            .unwrap();
        assert!(markup.contains(r#"viewBox="-30 -30 160 160""#));
        assert!(markup.contains(r#"width="100%""#));
        assert!(markup.contains(r#"height="100%""#));
        assert!(!markup.contains("0 0 500 500"));
    }

    #[test]
    fn test_no_primitives_keeps_view_box() {
        let text = r#"<svg viewBox="0 0 300 200" width="300"><rect width="10" height="10"/></svg>"#;
        let markup = normalize_svg(text, &AnimateOptions::default())
            .unwrap()
            .unwrap();
        assert!(markup.starts_with(r#"<svg viewBox="0 0 300 200" width="300"><style>"#));
        assert!(!markup.contains("100%"));
    }

    #[test]
    fn test_style_is_first_child() {
        let markup = normalize_svg(TWO_DOTS, &AnimateOptions::default())
            .unwrap()
            .unwrap();
        let after_root = &markup[markup.find('>').unwrap() + 1..];
        assert!(after_root.starts_with("<style>"));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_delays_dots_then_strokes() {
        let text = r#"<svg>
  <path d="M 0 0 L 10 10"/>
  <circle cx="5" cy="5" r="1"/>
  <line x1="0" y1="0" x2="3" y2="3"/>
  <circle cx="6" cy="6" r="1"/>
  <circle cx="7" cy="7" r="1"/>
  <path d="M 1 1 L 2 2"/>
</svg>"#;
        let markup = normalize_svg(text, &AnimateOptions::default())
            .unwrap()
            .unwrap();

        let dots = delays(&markup, "circle");
        assert_eq!(dots.len(), 3);
        assert!(dots.windows(2).all(|w| w[0] <= w[1]));

        // Paths and lines share one sequence in document order.
        let paths = delays(&markup, "path");
        let lines = delays(&markup, "line");
        let strokes = [paths[0], lines[0], paths[1]];
        let step = Duration::from_millis(100);
        for w in strokes.windows(2) {
            let gap = w[1].as_secs_f64() - w[0].as_secs_f64();
            assert!((gap - step.as_secs_f64()).abs() < 1e-9);
        }
        assert!(dots.iter().all(|d| *d < strokes[0]));

        assert_eq!(markup.matches("animated-dot\"").count(), 3);
        assert_eq!(markup.matches("animated-path\"").count(), 3);
    }

    #[test]
    fn test_non_svg_and_malformed() {
        let options = AnimateOptions::default();
        assert!(normalize_svg("<html><p>404</p></html>", &options).unwrap().is_none());
        assert!(normalize_svg("not xml at all", &options).unwrap().is_none());
        assert!(normalize_svg("<svg><circle></svg>", &options).is_err());
    }

    #[test]
    fn test_prolog_and_siblings_dropped() {
        let text = r#"<?xml version="1.0"?><!-- drawn --><svg><circle r="1"/></svg>"#;
        let markup = normalize_svg(text, &AnimateOptions::default())
            .unwrap()
            .unwrap();
        assert!(markup.starts_with("<svg"));
        assert!(!markup.contains("drawn"));
    }

    #[test]
    fn test_path_bounds_modes_differ_on_arcs() {
        let text = r#"<svg><path d="M0 0 A 10 10 0 0 1 20 0"/></svg>"#;
        let tokens = analyze(text, &AnimateOptions::default()).unwrap().unwrap();
        let commands = analyze(
            text,
            &AnimateOptions {
                path_bounds: PathBounds::Commands,
                ..AnimateOptions::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(tokens.view_box.as_deref(), Some("-20 -20 50 60"));

        // The arc bulges up to y = -10; float noise from the curve fit aside.
        let view_box: Vec<f64> = commands
            .view_box
            .unwrap()
            .split(' ')
            .map(|v| v.parse().unwrap())
            .collect();
        for (actual, expected) in view_box.iter().zip([-20.0, -30.0, 60.0, 40.0]) {
            assert!((actual - expected).abs() < 1e-6, "got {view_box:?}");
        }
    }

    #[test]
    fn test_fill_container_off() {
        let options = AnimateOptions {
            fill_container: false,
            padding: 0.0,
            ..AnimateOptions::default()
        };
        let markup = normalize_svg(TWO_DOTS, &options).unwrap().unwrap();
        assert!(markup.contains(r#"viewBox="-10 -10 120 120""#));
        assert!(markup.contains(r#"width="500""#));
    }

    #[test]
    fn test_analysis_counts() {
        let text = r#"<svg><circle r="1"/><path d="M0 0"/><line/><line/></svg>"#;
        let a = analyze(text, &AnimateOptions::default()).unwrap().unwrap();
        assert_eq!((a.circles, a.paths, a.lines), (1, 1, 2));
        assert_eq!(a.schedule.strokes().len(), 3);
        assert_eq!(a.original_view_box, None);
    }
}
