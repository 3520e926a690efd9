use vpick_core::{Color, Point, Size};
use vpick_picker::canvas::{CanvasMode, PickerCanvas};
use vpick_picker::model::{ControlShape, ShapeKind};
use vpick_picker::properties::{apply, apply_to_selection, properties, PropertyValue};

#[test]
fn properties_reflect_every_field() {
    let shape = ControlShape {
        label: "hand".to_string(),
        node: "L_hand_control".to_string(),
        ..ControlShape::default()
    };
    let props = properties(&shape);

    let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Kind",
            "Rotation",
            "Mirrored",
            "Size",
            "Fill Color",
            "Label Color",
            "Gradient",
            "Corner Radius",
            "Label",
            "Points",
            "Node",
            "Action",
        ]
    );

    let label = props.iter().find(|p| p.name == "Label").expect("label");
    assert_eq!(label.value, PropertyValue::Text("hand".to_string()));
}

#[test]
fn apply_round_trips_through_properties() {
    let mut shape = ControlShape::default();
    assert!(apply(&mut shape, "Kind", &PropertyValue::Kind(ShapeKind::Ellipse)));
    assert!(apply(&mut shape, "Rotation", &PropertyValue::Int(90)));
    assert!(apply(&mut shape, "Mirrored", &PropertyValue::Bool(true)));
    assert!(apply(&mut shape, "Size", &PropertyValue::Size(Size::new(50, 20))));
    assert!(apply(
        &mut shape,
        "Fill Color",
        &PropertyValue::Color(Color::new(1, 2, 3))
    ));
    assert!(apply(
        &mut shape,
        "Points",
        &PropertyValue::Points(vec![Point::new(0, 0), Point::new(5, 5)])
    ));

    assert_eq!(shape.kind, ShapeKind::Ellipse);
    assert_eq!(shape.rotation, 90);
    assert!(shape.mirrored);
    assert_eq!(shape.size, Size::new(50, 20));
    assert_eq!(shape.fill_color, Color::new(1, 2, 3));
    assert_eq!(shape.points.len(), 2);
}

#[test]
fn apply_rejects_unknown_names_and_type_mismatches() {
    let mut shape = ControlShape::default();
    assert!(!apply(&mut shape, "Bogus", &PropertyValue::Int(1)));
    assert!(!apply(&mut shape, "Rotation", &PropertyValue::Bool(true)));
    assert_eq!(shape.rotation, 0);
}

#[test]
fn selection_edits_fan_out_to_selected_items_only() {
    let mut canvas = PickerCanvas::new();
    canvas.set_mode(CanvasMode::Edit);
    let a = canvas.insert(None, Point::new(0, 0)).expect("insert a");
    let b = canvas.insert(None, Point::new(200, 200)).expect("insert b");
    canvas.item_mut(a).expect("a").selected = true;

    let applied = apply_to_selection(&mut canvas, "Rotation", &PropertyValue::Int(45));
    assert_eq!(applied, 1);
    assert_eq!(canvas.item(a).expect("a").shape.rotation, 45);
    assert_eq!(canvas.item(b).expect("b").shape.rotation, 0);
}
