//! Canvas renderer.
//!
//! Rasterizes the picker canvas into a transparent RGBA pixmap using
//! tiny-skia: per-control fill (hover-lightened, neutral gray when
//! disabled, 65% alpha), optional vertical white-to-fill gradient, outline,
//! centered label, and a dashed highlight around selected controls.
//!
//! Labels use the system sans-serif face resolved through fontdb; when no
//! face resolves (headless CI, bare containers) labels are skipped and the
//! rest of the control still renders. Glyphs are drawn axis-aligned at the
//! control's transformed center; they do not follow rotation or mirroring.

use rusttype::{point as rt_point, Font, Scale};
use std::sync::OnceLock;
use tiny_skia::{
    Color as SkiaColor, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap,
    Point as SkiaPoint, SpreadMode, Stroke, StrokeDash, Transform,
};
use vpick_core::{Color, Error, Result, MARGIN};

use crate::canvas::PickerCanvas;
use crate::item::ControlItem;
use crate::model::ShapeKind;

/// Hover lightens the fill by this percentage.
const HOVER_LIGHTEN: u32 = 133;
/// Fill alpha for every control.
const FILL_ALPHA: u8 = 166;
/// Fill used for disabled controls.
const DISABLED_FILL: Color = Color {
    r: 88,
    g: 88,
    b: 88,
};
/// Outline pen color.
const OUTLINE: Color = Color {
    r: 33,
    g: 33,
    b: 33,
};
/// Label point size.
const LABEL_SIZE: f32 = 12.0;

/// Renders the canvas to a transparent pixmap. `None` for a zero-sized
/// target.
pub fn render(canvas: &PickerCanvas, width: u32, height: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;

    for item in canvas.items() {
        if item.visible {
            draw_item(&mut pixmap, item);
        }
    }

    Some(pixmap)
}

/// Renders the canvas and writes a PNG preview.
pub fn render_to_png(
    canvas: &PickerCanvas,
    width: u32,
    height: u32,
    path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let pixmap = render(canvas, width, height)
        .ok_or_else(|| Error::other("cannot render a zero-sized canvas"))?;
    pixmap
        .save_png(path.as_ref())
        .map_err(|e| Error::other(format!("PNG encode error: {e}")))
}

fn draw_item(pixmap: &mut Pixmap, item: &ControlItem) {
    let shape = &item.shape;
    let transform = item_transform(item);

    let base = if item.hovered {
        shape.fill_color.lighter(HOVER_LIGHTEN)
    } else {
        shape.fill_color
    };
    let base = if item.enabled { base } else { DISABLED_FILL };
    let fill = SkiaColor::from_rgba8(base.r, base.g, base.b, FILL_ALPHA);

    let Some(path) = shape_path(shape) else {
        return;
    };
    let bounds = shape.bounding_rect();

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(fill);
    if shape.gradient && item.enabled {
        // Vertical ramp from the fill at mid-height up to white at the top
        // edge; coordinates are in item-local space and follow the item
        // transform together with the path.
        let stops = vec![
            GradientStop::new(0.0, fill),
            GradientStop::new(1.0, SkiaColor::from_rgba8(255, 255, 255, 255)),
        ];
        if let Some(shader) = LinearGradient::new(
            SkiaPoint::from_xy(0.0, bounds.h as f32 / 2.0),
            SkiaPoint::from_xy(0.0, 0.0),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) {
            paint.shader = shader;
        }
    }
    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);

    let mut outline = Paint::default();
    outline.anti_alias = true;
    outline.set_color(SkiaColor::from_rgba8(OUTLINE.r, OUTLINE.g, OUTLINE.b, 255));
    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &outline, &stroke, transform, None);

    if !shape.label.is_empty() {
        draw_label(pixmap, item);
    }

    if item.selected {
        draw_selection(pixmap, item, transform);
    }
}

/// Item-local to scene transform: rotate, then mirror, then translate.
fn item_transform(item: &ControlItem) -> Transform {
    let mut t = Transform::from_translate(item.position.x as f32, item.position.y as f32);
    if item.shape.mirrored {
        t = t.pre_scale(-1.0, 1.0);
    }
    if item.shape.rotation != 0 {
        t = t.pre_concat(Transform::from_rotate(item.shape.rotation as f32));
    }
    t
}

fn shape_path(shape: &crate::model::ControlShape) -> Option<tiny_skia::Path> {
    let m = MARGIN as f32;
    match shape.kind {
        ShapeKind::Polygon => {
            let points = shape.scaled_points();
            if points.len() < 3 {
                return None;
            }
            let mut pb = PathBuilder::new();
            pb.move_to(points[0].0, points[0].1);
            for (x, y) in &points[1..] {
                pb.line_to(*x, *y);
            }
            pb.close();
            pb.finish()
        }
        ShapeKind::Ellipse => {
            let rect = tiny_skia::Rect::from_xywh(
                m,
                m,
                (shape.size.w - MARGIN) as f32,
                (shape.size.h - MARGIN) as f32,
            )?;
            PathBuilder::from_oval(rect)
        }
        ShapeKind::RoundedRect => {
            let w = (shape.size.w - MARGIN) as f32;
            let h = (shape.size.h - MARGIN) as f32;
            if w <= 0.0 || h <= 0.0 {
                return None;
            }
            let r = (shape.corner_radius as f32).clamp(0.0, w.min(h) / 2.0);
            rounded_rect_path(m, m, w, h, r)
        }
    }
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

fn draw_selection(pixmap: &mut Pixmap, item: &ControlItem, transform: Transform) {
    let bounds = item.shape.bounding_rect();
    let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, bounds.w as f32, bounds.h as f32) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);

    let mut paint = Paint::default();
    paint.set_color(SkiaColor::from_rgba8(255, 255, 255, 255));
    let stroke = Stroke {
        width: 1.0,
        dash: StrokeDash::new(vec![4.0, 4.0], 0.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}

fn draw_label(pixmap: &mut Pixmap, item: &ControlItem) {
    let Some(font) = system_font() else {
        return;
    };
    let shape = &item.shape;
    let scale = Scale::uniform(LABEL_SIZE);
    let v_metrics = font.v_metrics(scale);
    let text_height = v_metrics.ascent - v_metrics.descent;

    let text_width = font
        .layout(&shape.label, scale, rt_point(0.0, 0.0))
        .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x as f32))
        .fold(0.0f32, f32::max);

    // Label is centered inside the size box, like the shape fill.
    let m = MARGIN as f32;
    let local_cx = m + (shape.size.w - MARGIN) as f32 / 2.0;
    let local_cy = m + (shape.size.h - MARGIN) as f32 / 2.0;
    let (cx, cy) = to_scene(item, local_cx, local_cy);

    let start = rt_point(cx - text_width / 2.0, cy + text_height / 4.0);
    let color = shape.label_color;

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    for glyph in font.layout(&shape.label, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || px >= width || py < 0 || py >= height {
                return;
            }
            let alpha = (coverage * 255.0) as u16;
            if alpha == 0 {
                return;
            }
            let idx = ((py * width + px) * 4) as usize;
            let data = pixmap.data_mut();
            // Premultiplied source-over blend of the label color.
            let inv = 255 - alpha;
            data[idx] = ((color.r as u16 * alpha + data[idx] as u16 * inv) / 255) as u8;
            data[idx + 1] = ((color.g as u16 * alpha + data[idx + 1] as u16 * inv) / 255) as u8;
            data[idx + 2] = ((color.b as u16 * alpha + data[idx + 2] as u16 * inv) / 255) as u8;
            data[idx + 3] = (alpha + data[idx + 3] as u16 * inv / 255).min(255) as u8;
        });
    }
}

/// Maps an item-local point to scene coordinates (rotate, mirror,
/// translate) without going through tiny-skia.
fn to_scene(item: &ControlItem, x: f32, y: f32) -> (f32, f32) {
    let (mut x, mut y) = if item.shape.rotation != 0 {
        let angle = (item.shape.rotation as f32).to_radians();
        let (sin, cos) = angle.sin_cos();
        (x * cos - y * sin, x * sin + y * cos)
    } else {
        (x, y)
    };
    if item.shape.mirrored {
        x = -x;
    }
    x += item.position.x as f32;
    y += item.position.y as f32;
    (x, y)
}

/// The system sans-serif face, resolved once. `None` when the platform has
/// no usable font.
fn system_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_system_font).as_ref()
}

fn load_system_font() -> Option<Font<'static>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    let face = db.face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = std::fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = std::fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
