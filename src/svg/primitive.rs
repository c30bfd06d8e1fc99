//! Geometric primitives that take part in bounds and animation.

use quick_xml::events::BytesStart;
use svgtypes::Length;

use super::bounds::BoundingBox;
use super::document::{attr_value, local_name};
use super::path::PathBounds;

/// One drawable element inside the root `svg`.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle { cx: f64, cy: f64, r: f64 },
    Path { d: String },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// Animation role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Circles: fade and scale in first.
    Dot,
    /// Paths and lines: stroke-drawn after every dot.
    Stroke,
}

impl Role {
    /// Classify an element by its local name.
    pub fn of(elem: &BytesStart<'_>) -> Option<Self> {
        match local_name(elem) {
            b"circle" => Some(Self::Dot),
            b"path" | b"line" => Some(Self::Stroke),
            _ => None,
        }
    }

    /// CSS class attached to elements with this role.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Dot => "animated-dot",
            Self::Stroke => "animated-path",
        }
    }
}

/// Numeric value of a length attribute, unit dropped (`"10px"` reads as 10).
///
/// A missing attribute reads as 0 and an unparsable one as NaN, which the
/// bounding box fold then skips.
fn length_or_zero(value: Option<&str>) -> f64 {
    value.map_or(0.0, |v| {
        v.trim()
            .parse::<Length>()
            .map_or(f64::NAN, |length| length.number)
    })
}

impl Primitive {
    /// Read a primitive from an element, if it is one.
    ///
    /// Missing numeric attributes read as 0.
    pub fn from_element(elem: &BytesStart<'_>) -> Option<Self> {
        let num = |name: &str| length_or_zero(attr_value(elem, name).as_deref());

        match local_name(elem) {
            b"circle" => Some(Self::Circle {
                cx: num("cx"),
                cy: num("cy"),
                r: num("r"),
            }),
            b"line" => Some(Self::Line {
                x1: num("x1"),
                y1: num("y1"),
                x2: num("x2"),
                y2: num("y2"),
            }),
            b"path" => Some(Self::Path {
                d: attr_value(elem, "d").unwrap_or_default(),
            }),
            _ => None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Circle { .. } => Role::Dot,
            Self::Path { .. } | Self::Line { .. } => Role::Stroke,
        }
    }

    /// Fold this primitive's extent into `bbox`.
    pub fn fold(&self, path_bounds: PathBounds, bbox: &mut BoundingBox) {
        match self {
            Self::Circle { cx, cy, r } => {
                bbox.include_point(cx - r, cy - r);
                bbox.include_point(cx + r, cy + r);
            }
            Self::Line { x1, y1, x2, y2 } => {
                bbox.include_point(*x1, *y1);
                bbox.include_point(*x2, *y2);
            }
            Self::Path { d } => path_bounds.fold(d, bbox),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(xml: &str) -> BytesStart<'static> {
        let mut reader = quick_xml::Reader::from_str(xml);
        match reader.read_event() {
            Ok(quick_xml::events::Event::Empty(e)) => e.into_owned(),
            other => panic!("expected empty element, got {other:?}"),
        }
    }

    #[test]
    fn test_circle_defaults_and_units() {
        let p = Primitive::from_element(&element(r#"<circle cx="10px" r="2"/>"#));
        assert_eq!(
            p,
            Some(Primitive::Circle {
                cx: 10.0,
                cy: 0.0,
                r: 2.0
            })
        );
    }

    #[test]
    fn test_namespaced_line() {
        let p = Primitive::from_element(&element(r#"<svg:line x1="1" y1="2" x2="3" y2="4"/>"#));
        assert_eq!(
            p,
            Some(Primitive::Line {
                x1: 1.0,
                y1: 2.0,
                x2: 3.0,
                y2: 4.0
            })
        );
        assert_eq!(p.map(|p| p.role()), Some(Role::Stroke));
    }

    #[test]
    fn test_non_primitive() {
        assert_eq!(Primitive::from_element(&element(r#"<rect width="5"/>"#)), None);
        assert_eq!(Role::of(&element("<g/>")), None);
    }

    #[test]
    fn test_fold_circle_and_line() {
        let mut b = BoundingBox::EMPTY;
        Primitive::Circle {
            cx: 0.0,
            cy: 0.0,
            r: 10.0,
        }
        .fold(PathBounds::Tokens, &mut b);
        Primitive::Line {
            x1: 50.0,
            y1: -30.0,
            x2: 20.0,
            y2: 5.0,
        }
        .fold(PathBounds::Tokens, &mut b);
        assert_eq!(b, BoundingBox::from_corners(-10.0, -30.0, 50.0, 10.0));
    }

    #[test]
    fn test_length_attributes() {
        assert_eq!(length_or_zero(None), 0.0);
        assert_eq!(length_or_zero(Some("2.5")), 2.5);
        assert_eq!(length_or_zero(Some(" -4 ")), -4.0);
        assert_eq!(length_or_zero(Some("1e2")), 100.0);
        assert_eq!(length_or_zero(Some("50%")), 50.0);
        assert!(length_or_zero(Some("auto")).is_nan());
    }

    #[test]
    fn test_unparsable_radius_contributes_nothing() {
        let mut b = BoundingBox::EMPTY;
        Primitive::from_element(&element(r#"<circle cx="5" cy="5" r="auto"/>"#))
            .unwrap()
            .fold(PathBounds::Tokens, &mut b);
        assert!(!b.is_well_formed());
    }
}
