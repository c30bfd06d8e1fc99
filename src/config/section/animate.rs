//! `[animate]` section configuration.
//!
//! How drawings are trimmed and animated.
//!
//! # Example
//!
//! ```toml
//! [animate]
//! padding = 20.0            # Margin around the computed bounds
//! dot_step = 10             # ms between consecutive dots
//! dot_duration = 300        # ms for one dot to fade in
//! stroke_step = 100         # ms between consecutive strokes
//! stroke_duration = 2000    # ms for one stroke to draw
//! dash_length = 1000        # Dash array/offset for the stroke reveal
//! fill_container = true     # Force width/height to 100% when trimming
//! path_bounds = "tokens"    # tokens | commands
//! ```
//!
//! Strokes start once every dot has started and the last one has had
//! `dot_duration` to appear. Each timing field is capped at one hour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::svg::{AnimateOptions, DEFAULT_DASH_LENGTH, DEFAULT_PADDING, PathBounds, Timing};

/// Upper bound for every timing field, in milliseconds.
const MAX_MILLIS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimateConfig {
    /// Whitespace kept around the drawing, in user units.
    pub padding: f64,

    /// Delay between consecutive dots, in milliseconds.
    pub dot_step: u64,

    /// Length of one dot's fade-in, in milliseconds.
    pub dot_duration: u64,

    /// Delay between consecutive strokes, in milliseconds.
    pub stroke_step: u64,

    /// Length of one stroke's draw, in milliseconds.
    pub stroke_duration: u64,

    /// Dash array/offset pair; should exceed the longest stroke.
    pub dash_length: u32,

    /// Force `width`/`height` to `100%` when the viewBox is rewritten.
    pub fill_container: bool,

    /// How path data contributes to the bounding box.
    /// - `tokens` (default): every number, taken pairwise
    /// - `commands`: parsed by command, arcs included
    pub path_bounds: PathBounds,
}

impl Default for AnimateConfig {
    fn default() -> Self {
        Self::from(&AnimateOptions::default())
    }
}

impl From<&AnimateOptions> for AnimateConfig {
    fn from(options: &AnimateOptions) -> Self {
        let ms = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            padding: options.padding,
            dot_step: ms(options.timing.dot_step),
            dot_duration: ms(options.timing.dot_duration),
            stroke_step: ms(options.timing.stroke_step),
            stroke_duration: ms(options.timing.stroke_duration),
            dash_length: options.dash_length,
            fill_container: options.fill_container,
            path_bounds: options.path_bounds,
        }
    }
}

impl AnimateConfig {
    pub const PADDING: FieldPath = FieldPath::new("animate.padding");
    pub const DASH_LENGTH: FieldPath = FieldPath::new("animate.dash_length");
    pub const DOT_STEP: FieldPath = FieldPath::new("animate.dot_step");
    pub const DOT_DURATION: FieldPath = FieldPath::new("animate.dot_duration");
    pub const STROKE_STEP: FieldPath = FieldPath::new("animate.stroke_step");
    pub const STROKE_DURATION: FieldPath = FieldPath::new("animate.stroke_duration");

    pub fn options(&self) -> AnimateOptions {
        AnimateOptions {
            padding: self.padding,
            timing: Timing {
                dot_step: Duration::from_millis(self.dot_step),
                dot_duration: Duration::from_millis(self.dot_duration),
                stroke_step: Duration::from_millis(self.stroke_step),
                stroke_duration: Duration::from_millis(self.stroke_duration),
            },
            dash_length: self.dash_length,
            fill_container: self.fill_container,
            path_bounds: self.path_bounds,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.padding.is_finite() || self.padding < 0.0 {
            diag.error_with_hint(
                Self::PADDING,
                format!("must be a finite, non-negative number, got {}", self.padding),
                format!("the default is {DEFAULT_PADDING}"),
            );
        }
        if self.dash_length == 0 {
            diag.error_with_hint(
                Self::DASH_LENGTH,
                "must be greater than 0",
                format!("the default is {DEFAULT_DASH_LENGTH}"),
            );
        }
        self.validate_timing(diag);
    }

    fn validate_timing(&self, diag: &mut ConfigDiagnostics) {
        let fields = [
            (Self::DOT_STEP, self.dot_step),
            (Self::DOT_DURATION, self.dot_duration),
            (Self::STROKE_STEP, self.stroke_step),
            (Self::STROKE_DURATION, self.stroke_duration),
        ];
        for (field, value) in fields {
            if value > MAX_MILLIS {
                diag.error(field, format!("{value} ms exceeds the {MAX_MILLIS} ms limit"));
            }
        }

        if self.stroke_step == 0 {
            diag.error_with_hint(
                Self::STROKE_STEP,
                "must be greater than 0 so strokes start one after another",
                "the default is 100",
            );
        }
        if self.dot_step == 0 && self.dot_duration == 0 {
            diag.error_with_hint(
                Self::DOT_DURATION,
                "dot_step and dot_duration are both 0, the last dot would start with the first stroke",
                "the default dot_duration is 300",
            );
        }
        if self.stroke_duration == 0 {
            diag.warn(Self::STROKE_DURATION, "0 ms, strokes will appear without drawing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_animate_defaults_match_options() {
        let config = test_parse_config("");
        assert_eq!(config.animate.options(), AnimateOptions::default());
        assert_eq!(config.animate.padding, 20.0);
        assert_eq!(config.animate.dot_step, 10);
        assert_eq!(config.animate.stroke_duration, 2000);
        assert_eq!(config.animate.path_bounds, PathBounds::Tokens);
    }

    #[test]
    fn test_animate_overrides() {
        let config = test_parse_config(
            "[animate]\npadding = 5\ndot_step = 20\npath_bounds = \"commands\"\nfill_container = false",
        );
        let options = config.animate.options();
        assert_eq!(options.padding, 5.0);
        assert_eq!(options.timing.dot_step, Duration::from_millis(20));
        assert_eq!(options.timing.stroke_step, Duration::from_millis(100));
        assert_eq!(options.path_bounds, PathBounds::Commands);
        assert!(!options.fill_container);
    }

    #[test]
    fn test_invalid_path_bounds_rejected() {
        let result: Result<crate::config::KolamConfig, _> =
            toml::from_str("[animate]\npath_bounds = \"exact\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_animate() {
        let mut diag = ConfigDiagnostics::new();
        AnimateConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            padding: -1.0,
            dash_length: 0,
            stroke_duration: 0,
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_zero_stroke_step_rejected() {
        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            stroke_step: 0,
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, AnimateConfig::STROKE_STEP);
    }

    #[test]
    fn test_dots_need_time_before_strokes() {
        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            dot_step: 0,
            dot_duration: 0,
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, AnimateConfig::DOT_DURATION);

        // Either one alone keeps dots ahead of strokes.
        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            dot_step: 0,
            ..Default::default()
        }
        .validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_timing_upper_bound() {
        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            dot_step: u64::MAX,
            stroke_duration: MAX_MILLIS + 1,
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 2);

        let mut diag = ConfigDiagnostics::new();
        AnimateConfig {
            stroke_step: MAX_MILLIS,
            ..Default::default()
        }
        .validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
