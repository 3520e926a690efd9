use vpick_core::{Point, Size};
use vpick_picker::model::{ControlShape, ShapeKind};
use vpick_picker::templates::{
    default_layout, load_layout, load_layout_or_default, save_layout, TemplateStore,
};

fn named_shape(label: &str) -> ControlShape {
    ControlShape {
        label: label.to_string(),
        size: Size::new(60, 24),
        ..ControlShape::default()
    }
}

#[test]
fn save_list_load_delete_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TemplateStore::new(dir.path().join("templates"));

    // Fresh store: directory does not exist yet, library is empty.
    assert!(store.list().expect("list").is_empty());

    store.save("slider", &named_shape("slider")).expect("save");
    let path = store.save("button", &named_shape("button")).expect("save");

    let entries = store.list().expect("list");
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["button", "slider"]);

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded.label, "button");

    store.delete(&path).expect("delete");
    let names: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["slider".to_string()]);
}

#[test]
fn load_missing_template_reports_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TemplateStore::new(dir.path());
    let err = store.load(dir.path().join("nope.xml")).expect_err("missing");
    assert!(err.is_not_found());
}

#[test]
fn delete_missing_template_reports_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TemplateStore::new(dir.path());
    let err = store
        .delete(dir.path().join("nope.xml"))
        .expect_err("missing");
    assert!(err.is_not_found());
}

#[test]
fn non_xml_files_are_not_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TemplateStore::new(dir.path());
    store.save("real", &named_shape("real")).expect("save");
    std::fs::write(dir.path().join("notes.txt"), "not a template").expect("write");

    let entries = store.list().expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "real");
}

#[test]
fn layout_save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layouts/user.xml");

    let shapes = vec![named_shape("a"), named_shape("b")];
    save_layout(&path, &shapes).expect("save");

    let loaded = load_layout(&path).expect("load");
    assert_eq!(loaded, shapes);
}

#[test]
fn missing_layout_falls_back_to_the_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = load_layout_or_default(dir.path().join("absent.xml")).expect("load");
    assert_eq!(loaded, default_layout());
}

#[test]
fn default_layout_is_a_thumb_and_a_pinky() {
    let shapes = default_layout();
    assert_eq!(shapes.len(), 2);

    assert_eq!(shapes[0].kind, ShapeKind::Polygon);
    assert_eq!(shapes[0].label, "thumb");
    assert!(!shapes[0].points.is_empty());
    assert_eq!(shapes[0].position, Point::new(40, 60));

    assert_eq!(shapes[1].kind, ShapeKind::Ellipse);
    assert_eq!(shapes[1].label, "pinky");
    assert!(shapes[1].points.is_empty());
    assert!(!shapes[1].node.is_empty());
}

#[test]
fn malformed_existing_layout_still_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("user.xml");
    std::fs::write(&path, "<layout><control kind=\"star\"/></layout>").expect("write");

    let err = load_layout_or_default(&path).expect_err("must fail");
    assert!(err.is_parse_error());
}
