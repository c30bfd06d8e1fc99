//! Event-stream passes over the SVG text.
//!
//! The document is read twice with quick-xml:
//!
//! ```text
//! scan     ──► root viewBox + primitives in document order
//! rewrite  ──► root subtree re-emitted with viewBox, <style>, classes, delays
//! ```
//!
//! The root is the first `svg` element in document order (matched by local
//! name). Only its subtree is serialized; prolog, doctype and siblings are
//! dropped.

use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use super::SvgError;
use super::primitive::{Primitive, Role};
use super::schedule::{AnimationSchedule, format_seconds};
use super::style::{with_class, with_delay};

// ============================================================================
// Element helpers
// ============================================================================

/// Local name of an element (namespace prefix stripped).
#[inline]
pub fn local_name<'a>(elem: &'a BytesStart<'_>) -> &'a [u8] {
    let name = elem.name().into_inner();
    match name.iter().rposition(|b| *b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Unescaped value of attribute `name`, if present and readable.
pub fn attr_value(elem: &BytesStart<'_>, name: &str) -> Option<String> {
    elem.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name.as_bytes())
        .and_then(|attr| {
            let raw = std::str::from_utf8(&attr.value).ok()?;
            unescape(raw).ok().map(|v| v.into_owned())
        })
}

#[inline]
fn is_root(elem: &BytesStart<'_>) -> bool {
    local_name(elem) == b"svg"
}

fn xml_error<R>(reader: &Reader<R>, source: quick_xml::Error) -> SvgError {
    SvgError::Xml {
        position: reader.error_position() as u64,
        message: source.to_string(),
    }
}

// ============================================================================
// Scan pass
// ============================================================================

/// What the scan pass found under the root element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    /// The root's original `viewBox`, if any.
    pub view_box: Option<String>,
    /// Circles, paths and lines in document order.
    pub primitives: Vec<Primitive>,
}

impl Scan {
    pub fn count(&self, role: Role) -> usize {
        self.primitives.iter().filter(|p| p.role() == role).count()
    }
}

/// Collect primitives under the first `svg` element.
///
/// Reads the whole text so that syntax errors anywhere are reported.
/// Returns `Ok(None)` for well-formed text without an `svg` element.
pub fn scan(text: &str) -> Result<Option<Scan>, SvgError> {
    let mut reader = Reader::from_str(text);
    let mut open = 0usize;
    // Depth inside the root; 0 before entering or after leaving it.
    let mut depth = 0usize;
    let mut result: Option<Scan> = None;

    loop {
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Start(elem) => {
                open += 1;
                if depth > 0 {
                    depth += 1;
                    collect(&elem, result.as_mut());
                } else if result.is_none() && is_root(&elem) {
                    depth = 1;
                    result = Some(Scan {
                        view_box: attr_value(&elem, "viewBox"),
                        primitives: Vec::new(),
                    });
                }
            }
            Event::Empty(elem) => {
                if depth > 0 {
                    collect(&elem, result.as_mut());
                } else if result.is_none() && is_root(&elem) {
                    result = Some(Scan {
                        view_box: attr_value(&elem, "viewBox"),
                        primitives: Vec::new(),
                    });
                }
            }
            Event::End(_) => {
                open = open.checked_sub(1).ok_or(SvgError::Unbalanced)?;
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open > 0 {
        return Err(SvgError::Unbalanced);
    }
    Ok(result)
}

fn collect(elem: &BytesStart<'_>, scan: Option<&mut Scan>) {
    if let (Some(scan), Some(primitive)) = (scan, Primitive::from_element(elem)) {
        scan.primitives.push(primitive);
    }
}

// ============================================================================
// Rewrite pass
// ============================================================================

/// Edits applied while re-emitting the root subtree.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    /// New `viewBox`; `None` keeps the original attributes untouched.
    pub view_box: Option<String>,
    /// Force `width`/`height` to `100%` along with a new viewBox.
    pub fill_container: bool,
    /// Stylesheet inserted as the root's first child.
    pub css: &'a str,
    pub schedule: &'a AnimationSchedule,
}

/// Re-emit the root subtree of an already scanned `text` according to `plan`.
pub fn rewrite(text: &str, plan: &Plan<'_>) -> Result<String, SvgError> {
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::with_capacity(text.len() + plan.css.len() + 256));
    let mut depth = 0usize;
    let (mut dots, mut strokes) = (0usize, 0usize);

    loop {
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Start(elem) if depth == 0 => {
                if is_root(&elem) {
                    depth = 1;
                    write(&mut writer, Event::Start(root_start(&elem, plan)?))?;
                    write_style(&mut writer, plan.css)?;
                }
            }
            Event::Empty(elem) if depth == 0 => {
                if is_root(&elem) {
                    let start = root_start(&elem, plan)?;
                    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                    let end = BytesEnd::new(name);
                    write(&mut writer, Event::Start(start))?;
                    write_style(&mut writer, plan.css)?;
                    write(&mut writer, Event::End(end))?;
                    break;
                }
            }
            Event::Start(elem) => {
                depth += 1;
                let elem = animate(&elem, plan.schedule, &mut dots, &mut strokes)?;
                write(&mut writer, Event::Start(elem))?;
            }
            Event::Empty(elem) => {
                let elem = animate(&elem, plan.schedule, &mut dots, &mut strokes)?;
                write(&mut writer, Event::Empty(elem))?;
            }
            Event::End(elem) if depth > 0 => {
                depth -= 1;
                write(&mut writer, Event::End(elem))?;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            event if depth > 0 => write(&mut writer, event)?,
            _ => {}
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| SvgError::Write(e.to_string()))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SvgError> {
    writer
        .write_event(event)
        .map_err(|e| SvgError::Write(e.to_string()))
}

fn write_style(writer: &mut Writer<Vec<u8>>, css: &str) -> Result<(), SvgError> {
    write(writer, Event::Start(BytesStart::new("style")))?;
    write(writer, Event::Text(BytesText::new(css)))?;
    write(writer, Event::End(BytesEnd::new("style")))
}

/// Copy `elem`, replacing attributes named in `updates` in place and
/// appending the ones it did not have.
fn with_attributes(
    elem: &BytesStart<'_>,
    updates: &[(&str, String)],
) -> Result<BytesStart<'static>, SvgError> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    let mut applied = vec![false; updates.len()];

    for attr in elem.attributes() {
        let attr = attr.map_err(|e| SvgError::Attribute(e.to_string()))?;
        match updates
            .iter()
            .position(|(key, _)| attr.key.as_ref() == key.as_bytes())
        {
            Some(i) => {
                applied[i] = true;
                out.push_attribute((updates[i].0, updates[i].1.as_str()));
            }
            None => out.push_attribute(attr),
        }
    }

    for ((key, value), done) in updates.iter().zip(applied) {
        if !done {
            out.push_attribute((*key, value.as_str()));
        }
    }

    Ok(out)
}

fn root_start(elem: &BytesStart<'_>, plan: &Plan<'_>) -> Result<BytesStart<'static>, SvgError> {
    let mut updates = Vec::with_capacity(3);
    if let Some(view_box) = &plan.view_box {
        updates.push(("viewBox", view_box.clone()));
        if plan.fill_container {
            updates.push(("width", "100%".to_string()));
            updates.push(("height", "100%".to_string()));
        }
    }
    with_attributes(elem, &updates)
}

/// Attach the role class and scheduled delay to a primitive element.
fn animate(
    elem: &BytesStart<'_>,
    schedule: &AnimationSchedule,
    dots: &mut usize,
    strokes: &mut usize,
) -> Result<BytesStart<'static>, SvgError> {
    let Some(role) = Role::of(elem) else {
        return with_attributes(elem, &[]);
    };

    let delay = match role {
        Role::Dot => {
            *dots += 1;
            schedule.dot_delay(*dots - 1)
        }
        Role::Stroke => {
            *strokes += 1;
            schedule.stroke_delay(*strokes - 1)
        }
    }
    .ok_or(SvgError::ScheduleMismatch)?;

    let class = with_class(attr_value(elem, "class").as_deref(), role.class());
    let style = with_delay(attr_value(elem, "style").as_deref(), &format_seconds(delay));
    with_attributes(elem, &[("class", class), ("style", style)])
}
