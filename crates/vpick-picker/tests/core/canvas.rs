use vpick_core::{Point, Size};
use vpick_host::MemoryHost;
use vpick_picker::canvas::{CanvasMode, Modifiers, PickerCanvas};
use vpick_picker::model::{ControlShape, ShapeKind};

fn edit_canvas() -> PickerCanvas {
    let mut canvas = PickerCanvas::with_size(Size::new(800, 500));
    canvas.set_mode(CanvasMode::Edit);
    canvas
}

fn shift() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::none()
    }
}

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Modifiers::none()
    }
}

fn select_all(canvas: &mut PickerCanvas) {
    for item in canvas.items_mut() {
        item.selected = true;
    }
}

#[test]
fn insert_requires_edit_mode() {
    let mut canvas = PickerCanvas::new();
    assert_eq!(canvas.mode(), CanvasMode::Run);
    assert!(canvas.insert(None, Point::new(10, 10)).is_none());

    canvas.set_mode(CanvasMode::Edit);
    assert!(canvas.insert(None, Point::new(10, 10)).is_some());
    assert_eq!(canvas.len(), 1);
}

#[test]
fn bare_insert_uses_the_default_button() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(5, 5)).expect("insert");
    let item = canvas.item(id).expect("item");

    assert_eq!(item.shape.kind, ShapeKind::RoundedRect);
    assert_eq!(item.shape.size, Size::new(100, 30));
    assert_eq!(item.shape.label, "button");
    assert_eq!(item.position, Point::new(5, 5));
}

#[test]
fn lockstep_drag_moves_every_selected_item() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(10, 10)).expect("insert a");
    let b = canvas.insert(None, Point::new(200, 200)).expect("insert b");
    select_all(&mut canvas);

    // Press inside the already-selected item A starts the drag.
    canvas.press(Point::new(20, 20), Modifiers::none());
    canvas.motion(Point::new(33, 27), Modifiers::none());

    assert_eq!(canvas.item(a).expect("a").position, Point::new(23, 17));
    assert_eq!(canvas.item(b).expect("b").position, Point::new(213, 207));

    // Positions are only committed into the shapes on release.
    assert_eq!(canvas.item(a).expect("a").shape.position, Point::new(10, 10));
    canvas.release(Point::new(33, 27));
    assert_eq!(canvas.item(a).expect("a").shape.position, Point::new(23, 17));
    assert!(!canvas.item(a).expect("a").dragging);
}

#[test]
fn drag_snaps_to_the_grid_with_the_modifier() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(10, 10)).expect("insert");
    select_all(&mut canvas);

    canvas.press(Point::new(20, 20), Modifiers::none());
    canvas.motion(Point::new(33, 36), shift());

    // Raw target (23, 26) rounds to the nearest multiples of 5.
    assert_eq!(canvas.item(id).expect("item").position, Point::new(25, 25));
}

#[test]
fn drag_clamps_each_item_to_the_canvas() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(10, 10)).expect("insert");
    select_all(&mut canvas);
    let bounds = canvas.item(id).expect("item").shape.bounding_rect();

    canvas.press(Point::new(20, 20), Modifiers::none());
    canvas.motion(Point::new(5000, -5000), Modifiers::none());

    let item = canvas.item(id).expect("item");
    assert_eq!(item.position.x, 800 - bounds.w - 25);
    assert_eq!(item.position.y, 0);
}

#[test]
fn wheel_rescales_only_with_the_modifier() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(10, 10)).expect("insert");
    select_all(&mut canvas);

    canvas.wheel(1, Modifiers::none());
    assert_eq!(canvas.item(id).expect("item").shape.size, Size::new(100, 30));

    canvas.wheel(1, ctrl());
    assert_eq!(canvas.item(id).expect("item").shape.size, Size::new(103, 31));

    canvas.wheel(-1, ctrl());
    // 103 * 0.966 = 99.5 -> 99, 31 * 0.966 = 29.9 -> 30
    assert_eq!(canvas.item(id).expect("item").shape.size, Size::new(99, 30));
}

#[test]
fn copy_multi_offsets_clones_and_selects_them() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(10, 10)).expect("insert a");
    let b = canvas.insert(None, Point::new(60, 80)).expect("insert b");
    select_all(&mut canvas);

    let clones = canvas.copy_selected(Point::new(400, 400));
    assert_eq!(clones.len(), 2);

    // Originals keep their positions and lose selection.
    assert_eq!(canvas.item(a).expect("a").position, Point::new(10, 10));
    assert_eq!(canvas.item(b).expect("b").position, Point::new(60, 80));
    assert!(!canvas.item(a).expect("a").selected);

    // Clones are offset by (50, 50) and are exactly the selection.
    assert_eq!(canvas.item(clones[0]).expect("c0").position, Point::new(60, 60));
    assert_eq!(canvas.item(clones[1]).expect("c1").position, Point::new(110, 130));
    assert_eq!(canvas.selected_ids(), clones);
}

#[test]
fn copy_single_lands_at_the_cursor() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(10, 10)).expect("insert");
    canvas.item_mut(a).expect("a").selected = true;

    let clones = canvas.copy_selected(Point::new(300, 200));
    assert_eq!(clones.len(), 1);
    assert_eq!(
        canvas.item(clones[0]).expect("clone").position,
        Point::new(300, 200)
    );
    // A single copy leaves the selection alone.
    assert!(canvas.item(a).expect("a").selected);
    assert!(!canvas.item(clones[0]).expect("clone").selected);
}

#[test]
fn rubber_band_selects_intersecting_items() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(0, 0)).expect("insert a");
    let b = canvas.insert(None, Point::new(200, 200)).expect("insert b");

    canvas.press(Point::new(150, 150), Modifiers::none());
    canvas.motion(Point::new(320, 320), Modifiers::none());

    assert!(!canvas.item(a).expect("a").selected);
    assert!(canvas.item(b).expect("b").selected);

    canvas.release(Point::new(320, 320));
    // Band is gone; plain motion only updates hover.
    canvas.motion(Point::new(10, 10), Modifiers::none());
    assert!(canvas.item(b).expect("b").selected);
}

#[test]
fn press_on_empty_space_clears_selection() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(0, 0)).expect("insert");
    canvas.item_mut(a).expect("a").selected = true;

    canvas.press(Point::new(500, 400), Modifiers::none());
    assert_eq!(canvas.selected_count(), 0);
}

#[test]
fn additive_press_extends_the_selection() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(0, 0)).expect("insert a");
    let b = canvas.insert(None, Point::new(200, 200)).expect("insert b");
    canvas.item_mut(a).expect("a").selected = true;

    canvas.press(Point::new(210, 210), shift());
    assert!(canvas.item(a).expect("a").selected);
    assert!(canvas.item(b).expect("b").selected);

    // Without the modifier, pressing an unselected item replaces the
    // selection.
    canvas.release(Point::new(210, 210));
    canvas.clear_selection();
    canvas.item_mut(b).expect("b").selected = true;
    canvas.press(Point::new(10, 10), Modifiers::none());
    assert!(canvas.item(a).expect("a").selected);
    assert!(!canvas.item(b).expect("b").selected);
}

#[test]
fn remove_selected_deletes_items() {
    let mut canvas = edit_canvas();
    let a = canvas.insert(None, Point::new(0, 0)).expect("insert a");
    canvas.insert(None, Point::new(200, 200)).expect("insert b");
    canvas.item_mut(a).expect("a").selected = true;

    assert_eq!(canvas.remove_selected(), 1);
    assert_eq!(canvas.len(), 1);
    assert!(canvas.item(a).is_none());
}

#[test]
fn toggle_visibility_flips_every_item() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(0, 0)).expect("insert");
    canvas.toggle_visibility();
    assert!(!canvas.item(id).expect("item").visible);
    canvas.toggle_visibility();
    assert!(canvas.item(id).expect("item").visible);
}

#[test]
fn import_normalizes_negative_positions_per_batch() {
    let mut canvas = PickerCanvas::new();
    let shapes = vec![
        ControlShape {
            position: Point::new(-20, 10),
            ..ControlShape::default()
        },
        ControlShape {
            position: Point::new(30, -5),
            ..ControlShape::default()
        },
    ];
    canvas.import(shapes, true);

    let positions: Vec<Point> = canvas.items().map(|i| i.position).collect();
    assert_eq!(positions, vec![Point::new(0, 15), Point::new(50, 0)]);
}

#[test]
fn import_keeps_positive_layouts_in_place() {
    let mut canvas = PickerCanvas::new();
    let shapes = vec![ControlShape {
        position: Point::new(40, 60),
        ..ControlShape::default()
    }];
    canvas.import(shapes, true);
    assert_eq!(
        canvas.items().next().expect("item").position,
        Point::new(40, 60)
    );
}

#[test]
fn import_append_never_shifts_existing_items() {
    let mut canvas = PickerCanvas::new();
    canvas.import(
        vec![ControlShape {
            position: Point::new(40, 60),
            ..ControlShape::default()
        }],
        true,
    );
    canvas.import(
        vec![ControlShape {
            position: Point::new(-10, 0),
            ..ControlShape::default()
        }],
        false,
    );

    let positions: Vec<Point> = canvas.items().map(|i| i.position).collect();
    assert_eq!(positions, vec![Point::new(40, 60), Point::new(0, 0)]);
    assert_eq!(canvas.len(), 2);
}

#[test]
fn entering_edit_mode_enables_everything_and_clears_selection() {
    let mut canvas = edit_canvas();
    let id = canvas.insert(None, Point::new(0, 0)).expect("insert");
    canvas.item_mut(id).expect("item").selected = true;
    canvas.item_mut(id).expect("item").enabled = false;

    canvas.set_mode(CanvasMode::Run);
    assert!(!canvas.item(id).expect("item").selected);

    canvas.set_mode(CanvasMode::Edit);
    let item = canvas.item(id).expect("item");
    assert!(item.enabled);
    assert!(item.editable);
    assert!(!item.selected);
}

#[test]
fn enablement_follows_the_host_scene() {
    let mut canvas = PickerCanvas::new();
    canvas.import(
        vec![
            ControlShape {
                node: "hand_ctl".to_string(),
                ..ControlShape::default()
            },
            ControlShape {
                node: "missing_ctl".to_string(),
                ..ControlShape::default()
            },
            ControlShape {
                node: "hidden_ctl".to_string(),
                ..ControlShape::default()
            },
            // Decorative: no node at all.
            ControlShape::default(),
        ],
        true,
    );

    let mut host = MemoryHost::new();
    host.add_node("chr1:hand_ctl", None)
        .add_node("chr1:hidden_ctl", None)
        .set_visibility("chr1:hidden_ctl", false);

    canvas.update_enablement(&host, "chr1");
    let enabled: Vec<bool> = canvas.items().map(|i| i.enabled).collect();
    assert_eq!(enabled, vec![true, false, false, true]);
}
