//! Stylesheet injected as the root's first child.

use super::AnimateOptions;
use super::primitive::Role;
use super::schedule::format_seconds;

/// Build the keyframes and class rules for the dot and stroke animations.
///
/// Strokes are revealed by animating `stroke-dashoffset` from `dash_length`
/// to zero; dots fade and scale in around their own center.
pub fn animation_css(options: &AnimateOptions) -> String {
    let dash = options.dash_length;
    let stroke = format_seconds(options.timing.stroke_duration);
    let dot = format_seconds(options.timing.dot_duration);
    let (path_class, dot_class) = (Role::Stroke.class(), Role::Dot.class());

    format!(
        "
@keyframes drawPath {{
  to {{ stroke-dashoffset: 0; }}
}}
@keyframes fadeInDot {{
  from {{ opacity: 0; transform: scale(0); }}
  to {{ opacity: 1; transform: scale(1); }}
}}
.{path_class} {{
  stroke-dasharray: {dash};
  stroke-dashoffset: {dash};
  animation: drawPath {stroke} ease-in-out forwards;
}}
.{dot_class} {{
  opacity: 0;
  transform-box: fill-box;
  transform-origin: center;
  animation: fadeInDot {dot} ease-out forwards;
}}
"
    )
}

/// Append an `animation-delay` declaration to an existing `style` value.
pub fn with_delay(style: Option<&str>, delay: &str) -> String {
    match style.map(|s| s.trim().trim_end_matches(';').trim_end()) {
        Some(existing) if !existing.is_empty() => {
            format!("{existing}; animation-delay: {delay}")
        }
        _ => format!("animation-delay: {delay}"),
    }
}

/// Append `class` to a class list unless it is already present.
pub fn with_class(classes: Option<&str>, class: &str) -> String {
    match classes.map(str::trim) {
        Some(existing) if existing.split_whitespace().any(|c| c == class) => existing.to_string(),
        Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    }
}
