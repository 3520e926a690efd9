//! XML persistence for control records.
//!
//! One `<control>` element per record, attribute-encoded fields, and the
//! action script carried in a nested `<action>` CDATA block so host command
//! text with markup-significant characters survives verbatim. A layout
//! document is an ordered sequence of `<control>` elements under a
//! `<layout>` root; a template file is a single bare `<control>`.
//!
//! Parsing is all-or-nothing: any malformed record fails the whole document
//! and nothing is handed to the canvas.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use vpick_core::{Color, Error, LayoutError, Point, Result, Size};

use crate::model::{ControlShape, ShapeKind};

/// Parse a layout document (or a single bare `<control>`) into an ordered
/// sequence of control shapes.
pub fn parse_document(xml: &str) -> Result<Vec<ControlShape>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut controls = Vec::new();
    let mut current: Option<ControlShape> = None;
    let mut in_action = false;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"layout" => saw_root = true,
                b"control" => {
                    saw_root = true;
                    if current.is_some() {
                        return Err(LayoutError::MalformedDocument {
                            reason: "nested <control> element".to_string(),
                        }
                        .into());
                    }
                    current = Some(parse_control_attributes(&e)?);
                }
                b"action" => {
                    if current.is_some() {
                        in_action = true;
                    }
                }
                _ => {
                    if !saw_root {
                        return Err(unexpected_root(&e));
                    }
                }
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"control" => {
                    saw_root = true;
                    controls.push(finish_control(parse_control_attributes(&e)?)?);
                }
                _ => {
                    if !saw_root {
                        return Err(unexpected_root(&e));
                    }
                }
            },
            Ok(Event::CData(t)) => {
                if in_action {
                    if let Some(control) = current.as_mut() {
                        let raw = t.into_inner();
                        let text = std::str::from_utf8(&raw).map_err(|e| LayoutError::Syntax {
                            reason: e.to_string(),
                        })?;
                        control.action.push_str(text);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if in_action {
                    if let Some(control) = current.as_mut() {
                        let text = t.unescape().map_err(|e| LayoutError::Syntax {
                            reason: e.to_string(),
                        })?;
                        control.action.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"action" => in_action = false,
                b"control" => {
                    if let Some(control) = current.take() {
                        controls.push(finish_control(control)?);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LayoutError::Syntax {
                    reason: e.to_string(),
                }
                .into())
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(LayoutError::MalformedDocument {
            reason: "no <layout> or <control> root element".to_string(),
        }
        .into());
    }

    Ok(controls)
}

/// Parse a single-control document (a template file).
pub fn parse_control(xml: &str) -> Result<ControlShape> {
    let mut controls = parse_document(xml)?;
    if controls.len() != 1 {
        return Err(LayoutError::MalformedDocument {
            reason: format!("expected a single <control>, found {}", controls.len()),
        }
        .into());
    }
    Ok(controls.remove(0))
}

/// Serialize an ordered sequence of controls as a `<layout>` document.
pub fn write_document(shapes: &[ControlShape]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("layout")))
        .map_err(write_error)?;
    for shape in shapes {
        write_control(&mut writer, shape)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("layout")))
        .map_err(write_error)?;

    into_string(writer)
}

/// Serialize one control as a stand-alone template document.
pub fn write_control_document(shape: &ControlShape) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_control(&mut writer, shape)?;

    into_string(writer)
}

/// `"x y,x y,..."` form of a vertex list.
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a `"x y,x y,..."` vertex list. An empty string is an empty list.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut points = Vec::new();
    for pair in text.split(',') {
        let coords: Vec<&str> = pair.split_whitespace().collect();
        if coords.len() != 2 {
            return Err(LayoutError::MalformedPoints {
                reason: format!("vertex '{}' is not an 'x y' pair", pair.trim()),
            }
            .into());
        }
        let x = coords[0].parse::<i32>().map_err(|_| bad_vertex(pair))?;
        let y = coords[1].parse::<i32>().map_err(|_| bad_vertex(pair))?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

fn bad_vertex(pair: &str) -> Error {
    LayoutError::MalformedPoints {
        reason: format!("vertex '{}' has a malformed coordinate", pair.trim()),
    }
    .into()
}

fn unexpected_root(e: &BytesStart) -> Error {
    LayoutError::MalformedDocument {
        reason: format!(
            "unexpected root element <{}>",
            String::from_utf8_lossy(e.local_name().as_ref())
        ),
    }
    .into()
}

fn write_error(e: impl std::fmt::Display) -> Error {
    Error::other(format!("XML write error: {e}"))
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::other(format!("XML write error: {e}")))
}

fn write_control<W: std::io::Write>(writer: &mut Writer<W>, shape: &ControlShape) -> Result<()> {
    let mut el = BytesStart::new("control");
    el.push_attribute(("kind", shape.kind.as_str()));
    el.push_attribute((
        "position",
        format!("{},{}", shape.position.x, shape.position.y).as_str(),
    ));
    el.push_attribute(("rotation", shape.rotation.to_string().as_str()));
    el.push_attribute(("mirrored", flag(shape.mirrored)));
    el.push_attribute((
        "size",
        format!("{},{}", shape.size.w, shape.size.h).as_str(),
    ));
    el.push_attribute(("label", shape.label.as_str()));
    el.push_attribute(("fillColor", color(shape.fill_color).as_str()));
    el.push_attribute(("useGradient", flag(shape.gradient)));
    el.push_attribute(("labelColor", color(shape.label_color).as_str()));
    el.push_attribute(("cornerRadius", shape.corner_radius.to_string().as_str()));
    if !shape.points.is_empty() {
        el.push_attribute(("points", format_points(&shape.points).as_str()));
    }
    el.push_attribute(("node", shape.node.as_str()));

    if shape.action.is_empty() {
        writer.write_event(Event::Empty(el)).map_err(write_error)?;
    } else {
        writer.write_event(Event::Start(el)).map_err(write_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("action")))
            .map_err(write_error)?;
        writer
            .write_event(Event::CData(BytesCData::new(shape.action.trim())))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("action")))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("control")))
            .map_err(write_error)?;
    }
    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn color(c: Color) -> String {
    format!("{},{},{}", c.r, c.g, c.b)
}

fn parse_control_attributes(e: &BytesStart) -> Result<ControlShape> {
    let mut shape = ControlShape::default();

    for attr in e.attributes() {
        let attr = attr.map_err(|e| LayoutError::Syntax {
            reason: e.to_string(),
        })?;
        let value = attr.unescape_value().map_err(|e| LayoutError::Syntax {
            reason: e.to_string(),
        })?;
        match attr.key.local_name().as_ref() {
            b"kind" => {
                shape.kind = ShapeKind::parse(&value).ok_or_else(|| LayoutError::UnknownKind {
                    kind: value.to_string(),
                })?;
            }
            b"position" => {
                let (x, y) = parse_pair("position", &value)?;
                shape.position = Point::new(x, y);
            }
            b"rotation" => shape.rotation = parse_int("rotation", &value)?,
            b"mirrored" => shape.mirrored = parse_int("mirrored", &value)? != 0,
            b"size" => {
                let (w, h) = parse_pair("size", &value)?;
                shape.size = Size::new(w, h);
            }
            b"label" => shape.label = value.to_string(),
            b"fillColor" => shape.fill_color = parse_color("fillColor", &value)?,
            b"useGradient" => shape.gradient = parse_int("useGradient", &value)? != 0,
            b"labelColor" => shape.label_color = parse_color("labelColor", &value)?,
            b"cornerRadius" => shape.corner_radius = parse_int("cornerRadius", &value)?,
            b"points" => shape.points = parse_points(&value)?,
            b"node" => shape.node = value.to_string(),
            _ => {}
        }
    }

    Ok(shape)
}

/// Enforce cross-field invariants once the whole record is assembled.
fn finish_control(mut shape: ControlShape) -> Result<ControlShape> {
    shape.action = shape.action.trim().to_string();

    if shape.kind == ShapeKind::Polygon && shape.points.is_empty() {
        return Err(LayoutError::MalformedPoints {
            reason: "polygon control without vertices".to_string(),
        }
        .into());
    }
    if shape.kind != ShapeKind::Polygon {
        shape.points.clear();
    }

    Ok(shape)
}

fn parse_int(attribute: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| malformed(attribute, value))
}

fn parse_pair(attribute: &str, value: &str) -> Result<(i32, i32)> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(malformed(attribute, value));
    }
    Ok((
        parts[0]
            .trim()
            .parse::<i32>()
            .map_err(|_| malformed(attribute, value))?,
        parts[1]
            .trim()
            .parse::<i32>()
            .map_err(|_| malformed(attribute, value))?,
    ))
}

fn parse_color(attribute: &str, value: &str) -> Result<Color> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        return Err(malformed(attribute, value));
    }
    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<u8>()
            .map_err(|_| malformed(attribute, value))?;
    }
    Ok(Color::new(channels[0], channels[1], channels[2]))
}

fn malformed(attribute: &str, value: &str) -> Error {
    LayoutError::MalformedNumber {
        element: "control".to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
    .into()
}
