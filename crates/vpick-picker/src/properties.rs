//! Property reflection for the control editor form.
//!
//! A thin two-way binding: the current selection's shape fields are exposed
//! as named [`Property`] values for a form to display, and edits come back
//! through [`apply`], fanned out to every selected item by
//! [`apply_to_selection`]. No validation beyond type matching happens here;
//! geometry rules are owned by the model.

use vpick_core::{Color, Point, Size};

use crate::canvas::PickerCanvas;
use crate::model::{ControlShape, ShapeKind};

/// A named field value of a control shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// The value types the editor form can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Kind(ShapeKind),
    Int(i32),
    Bool(bool),
    Text(String),
    Color(Color),
    Size(Size),
    Points(Vec<Point>),
}

fn property(name: &str, value: PropertyValue) -> Property {
    Property {
        name: name.to_string(),
        value,
    }
}

/// The editable fields of a shape, in form order.
pub fn properties(shape: &ControlShape) -> Vec<Property> {
    vec![
        property("Kind", PropertyValue::Kind(shape.kind)),
        property("Rotation", PropertyValue::Int(shape.rotation)),
        property("Mirrored", PropertyValue::Bool(shape.mirrored)),
        property("Size", PropertyValue::Size(shape.size)),
        property("Fill Color", PropertyValue::Color(shape.fill_color)),
        property("Label Color", PropertyValue::Color(shape.label_color)),
        property("Gradient", PropertyValue::Bool(shape.gradient)),
        property("Corner Radius", PropertyValue::Int(shape.corner_radius)),
        property("Label", PropertyValue::Text(shape.label.clone())),
        property("Points", PropertyValue::Points(shape.points.clone())),
        property("Node", PropertyValue::Text(shape.node.clone())),
        property("Action", PropertyValue::Text(shape.action.clone())),
    ]
}

/// Writes one named value into a shape. Returns false when the name is
/// unknown or the value type does not match the field.
pub fn apply(shape: &mut ControlShape, name: &str, value: &PropertyValue) -> bool {
    match (name, value) {
        ("Kind", PropertyValue::Kind(kind)) => shape.kind = *kind,
        ("Rotation", PropertyValue::Int(deg)) => shape.rotation = *deg,
        ("Mirrored", PropertyValue::Bool(flag)) => shape.mirrored = *flag,
        ("Size", PropertyValue::Size(size)) => shape.size = *size,
        ("Fill Color", PropertyValue::Color(color)) => shape.fill_color = *color,
        ("Label Color", PropertyValue::Color(color)) => shape.label_color = *color,
        ("Gradient", PropertyValue::Bool(flag)) => shape.gradient = *flag,
        ("Corner Radius", PropertyValue::Int(radius)) => shape.corner_radius = *radius,
        ("Label", PropertyValue::Text(text)) => shape.label = text.clone(),
        ("Points", PropertyValue::Points(points)) => shape.points = points.clone(),
        ("Node", PropertyValue::Text(text)) => shape.node = text.clone(),
        ("Action", PropertyValue::Text(text)) => shape.action = text.clone(),
        _ => return false,
    }
    true
}

/// Applies one edit to every selected item on the canvas. Returns how many
/// items accepted it.
pub fn apply_to_selection(canvas: &mut PickerCanvas, name: &str, value: &PropertyValue) -> usize {
    let mut applied = 0;
    for item in canvas.items_mut() {
        if item.selected && apply(&mut item.shape, name, value) {
            applied += 1;
        }
    }
    applied
}
