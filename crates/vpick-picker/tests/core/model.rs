use vpick_core::{Point, Rect, Size, MARGIN};
use vpick_picker::model::{ControlShape, ShapeKind};

fn polygon(points: &[(i32, i32)], size: Size) -> ControlShape {
    ControlShape {
        kind: ShapeKind::Polygon,
        size,
        points: points.iter().map(|(x, y)| Point::new(*x, *y)).collect(),
        ..ControlShape::default()
    }
}

#[test]
fn default_shape() {
    let shape = ControlShape::default();
    assert_eq!(shape.kind, ShapeKind::RoundedRect);
    assert_eq!(shape.size, Size::new(10, 10));
    assert_eq!(shape.corner_radius, 25);
    assert!(shape.gradient);
    assert!(shape.points.is_empty());
    assert!(shape.node.is_empty());
    assert!(shape.action.is_empty());
}

#[test]
fn scaled_points_hit_size_plus_margin() {
    let shape = polygon(&[(0, 0), (10, 4), (5, 8)], Size::new(20, 16));
    let scaled = shape.scaled_points();

    let max_x = scaled.iter().map(|p| p.0).fold(f32::MIN, f32::max);
    let max_y = scaled.iter().map(|p| p.1).fold(f32::MIN, f32::max);
    assert!((max_x - (20.0 + MARGIN as f32)).abs() < 0.5);
    assert!((max_y - (16.0 + MARGIN as f32)).abs() < 0.5);
}

#[test]
fn scaled_points_scale_each_axis_independently() {
    let shape = polygon(&[(10, 0), (10, 20), (0, 20)], Size::new(30, 40));
    let scaled = shape.scaled_points();

    // (10, 20) is the extreme vertex on both axes.
    assert!((scaled[1].0 - 32.0).abs() < 0.5);
    assert!((scaled[1].1 - 42.0).abs() < 0.5);
    // (10, 0) keeps its zero Y at the margin offset.
    assert!((scaled[0].1 - MARGIN as f32).abs() < 0.01);
}

#[test]
fn scaled_points_survive_all_zero_vertices() {
    let shape = polygon(&[(0, 0), (0, 0), (0, 0)], Size::new(20, 20));
    for (x, y) in shape.scaled_points() {
        assert!(x.is_finite() && y.is_finite());
        assert!((x - MARGIN as f32).abs() < 0.01);
        assert!((y - MARGIN as f32).abs() < 0.01);
    }
}

#[test]
fn polygon_bounding_rect_pads_far_edges() {
    let shape = polygon(&[(0, 0), (10, 4), (5, 8)], Size::new(20, 16));
    // Scaled extremes land on size + MARGIN; the box pads one more MARGIN.
    assert_eq!(
        shape.bounding_rect(),
        Rect::new(0, 0, 20 + 2 * MARGIN, 16 + 2 * MARGIN)
    );
}

#[test]
fn box_bounding_rect_ignores_rotation_and_mirroring() {
    for kind in [ShapeKind::Ellipse, ShapeKind::RoundedRect] {
        let shape = ControlShape {
            kind,
            size: Size::new(40, 18),
            rotation: 45,
            mirrored: true,
            ..ControlShape::default()
        };
        assert_eq!(
            shape.bounding_rect(),
            Rect::new(0, 0, 40 + MARGIN, 18 + MARGIN)
        );
    }
}

#[test]
fn clone_is_a_deep_copy() {
    let mut shape = polygon(&[(0, 0), (10, 0), (5, 5)], Size::new(20, 20));
    let copy = shape.clone();

    shape.points[0] = Point::new(99, 99);
    shape.label = "changed".to_string();

    assert_eq!(copy.points[0], Point::new(0, 0));
    assert!(copy.label.is_empty());
}

#[test]
fn rounded_rect_contains_its_interior() {
    let shape = ControlShape {
        size: Size::new(100, 30),
        ..ControlShape::default()
    };
    assert!(shape.contains(50.0, 15.0));
    assert!(!shape.contains(110.0, 15.0));
    assert!(!shape.contains(50.0, -5.0));
}

#[test]
fn ellipse_excludes_box_corners() {
    let shape = ControlShape {
        kind: ShapeKind::Ellipse,
        size: Size::new(20, 20),
        ..ControlShape::default()
    };
    assert!(shape.contains(11.0, 11.0));
    // Inside the bounding box but outside the ellipse.
    assert!(!shape.contains(3.0, 3.0));
}

#[test]
fn polygon_contains_uses_the_outline() {
    let shape = polygon(&[(0, 0), (20, 0), (10, 20)], Size::new(20, 20));
    // Triangle pointing down: apex region is inside, top corners' mirror
    // region below the slanted edges is not.
    assert!(shape.contains(12.0, 10.0));
    assert!(!shape.contains(3.0, 20.0));
}
