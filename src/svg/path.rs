//! Path-data bounds.
//!
//! Two strategies, selected by [`PathBounds`]:
//!
//! - [`PathBounds::Tokens`]: lexical scan. Every numeric literal in `d` is
//!   taken, pairwise, as an `(x, y)` candidate. Command letters and arity are
//!   ignored, so arc radii and flags count as coordinates and relative
//!   commands are read as absolute. Cheap and good enough to trim the
//!   whitespace around a kolam drawing.
//! - [`PathBounds::Commands`]: parse the path data with `svgtypes`. Endpoints
//!   and control points are folded in, arcs through their cubic
//!   approximation. The result never under-covers the rendered path.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use svgtypes::{SimplePathSegment, SimplifyingPathParser};

use super::bounds::BoundingBox;

/// Numeric literal: optional sign, decimals, optional exponent.
static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?").unwrap()
});

/// How path data contributes to the bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PathBounds {
    /// Pairwise numeric tokens (heuristic).
    #[default]
    Tokens,
    /// Command-aware parsing (conservative, arc-aware).
    Commands,
}

impl PathBounds {
    /// Fold the path data `d` into `bbox`.
    pub fn fold(self, d: &str, bbox: &mut BoundingBox) {
        match self {
            Self::Tokens => token_bounds(d, bbox),
            Self::Commands => command_bounds(d, bbox),
        }
    }
}

// ============================================================================
// Token scan
// ============================================================================

/// Fold every numeric token of `d` into `bbox`, even tokens as x, odd as y.
pub fn token_bounds(d: &str, bbox: &mut BoundingBox) {
    let tokens = NUMBER_TOKEN
        .find_iter(d)
        .filter_map(|m| m.as_str().parse::<f64>().ok());

    for (i, value) in tokens.enumerate() {
        if i % 2 == 0 {
            bbox.include_x(value);
        } else {
            bbox.include_y(value);
        }
    }
}

// ============================================================================
// Command parser
// ============================================================================

/// Fold a path's endpoints and control points into `bbox`.
///
/// `svgtypes` resolves relative, implicit and smooth commands to absolute
/// segments and approximates arcs with cubics. A curve lies inside the hull
/// of its control points, so folding them never under-covers.
///
/// Parsing stops quietly at the first malformed segment; everything before
/// it has already been folded in.
pub fn command_bounds(d: &str, bbox: &mut BoundingBox) {
    for segment in SimplifyingPathParser::from(d) {
        let Ok(segment) = segment else { break };
        match segment {
            SimplePathSegment::MoveTo { x, y } | SimplePathSegment::LineTo { x, y } => {
                bbox.include_point(x, y);
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                bbox.include_point(x1, y1);
                bbox.include_point(x, y);
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                bbox.include_point(x1, y1);
                bbox.include_point(x2, y2);
                bbox.include_point(x, y);
            }
            SimplePathSegment::ClosePath => {}
        }
    }
}
