//! The persisted control definition.
//!
//! A [`ControlShape`] is the authoritative record of one picker control:
//! geometry, styling, and what it does when clicked (select a bound node,
//! run an action script, or both). Everything the canvas and the template
//! store persist goes through this type; per-instance interaction state
//! lives on `ControlItem` instead.

use serde::{Deserialize, Serialize};
use vpick_core::{Color, Point, Rect, Size, MARGIN};

/// Fallback for the observed vertex maximum, so a degenerate polygon whose
/// coordinates are all zero scales without dividing by zero.
const MIN_POINT_EXTENT: f32 = 0.001;

/// The geometric kind of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Arbitrary closed outline given by the `points` vertex list.
    Polygon,
    /// Ellipse filling the size box.
    Ellipse,
    /// Rectangle with rounded corners filling the size box.
    RoundedRect,
}

impl ShapeKind {
    /// Token used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::RoundedRect => "rounded-rect",
        }
    }

    /// Parse a serialized kind token.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "polygon" => Some(ShapeKind::Polygon),
            "ellipse" => Some(ShapeKind::Ellipse),
            "rounded-rect" => Some(ShapeKind::RoundedRect),
            _ => None,
        }
    }
}

/// One control definition.
///
/// `points` is meaningful only for [`ShapeKind::Polygon`] and is kept empty
/// otherwise; `size` is the target the vertex list is scaled to for
/// polygons, and the literal box for the other kinds. `Clone` is the deep
/// value copy used whenever a control is duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlShape {
    pub kind: ShapeKind,
    /// Offset in canvas space.
    pub position: Point,
    /// Degrees, applied around the control's own origin.
    pub rotation: i32,
    /// Mirrors the shape horizontally about its own origin.
    pub mirrored: bool,
    pub size: Size,
    pub fill_color: Color,
    pub label_color: Color,
    /// Corner rounding, meaningful for [`ShapeKind::RoundedRect`] only.
    pub corner_radius: i32,
    /// Vertical white-to-fill gradient when enabled (flat fill otherwise).
    pub gradient: bool,
    /// Text centered in the shape.
    pub label: String,
    /// Raw vertex list, polygon kind only.
    pub points: Vec<Point>,
    /// Host node this control selects; empty means no selection action.
    pub node: String,
    /// Host command run on click; empty means no action. `$NAMESPACE` is
    /// substituted at dispatch time.
    pub action: String,
}

impl Default for ControlShape {
    fn default() -> Self {
        Self {
            kind: ShapeKind::RoundedRect,
            position: Point::default(),
            rotation: 0,
            mirrored: false,
            size: Size::new(10, 10),
            fill_color: Color::BLACK,
            label_color: Color::BLACK,
            corner_radius: 25,
            gradient: true,
            label: String::new(),
            points: Vec::new(),
            node: String::new(),
            action: String::new(),
        }
    }
}

impl ControlShape {
    /// The vertex list normalized to the size box.
    ///
    /// Each coordinate is divided by the observed maximum on its axis and
    /// multiplied by the target size, so the extreme vertices land exactly
    /// on `size.w`/`size.h`; every vertex is then offset by [`MARGIN`].
    pub fn scaled_points(&self) -> Vec<(f32, f32)> {
        let mut max_x = MIN_POINT_EXTENT;
        let mut max_y = MIN_POINT_EXTENT;
        for p in &self.points {
            max_x = max_x.max(p.x as f32);
            max_y = max_y.max(p.y as f32);
        }

        self.points
            .iter()
            .map(|p| {
                (
                    p.x as f32 / max_x * self.size.w as f32 + MARGIN as f32,
                    p.y as f32 / max_y * self.size.h as f32 + MARGIN as f32,
                )
            })
            .collect()
    }

    /// Bounding box in the control's own coordinate space.
    ///
    /// Polygons get the tight box around the scaled vertices plus one extra
    /// [`MARGIN`] on the far edges; the other kinds span the size box plus
    /// [`MARGIN`], regardless of rotation or mirroring.
    pub fn bounding_rect(&self) -> Rect {
        match self.kind {
            ShapeKind::Polygon => {
                let mut w = 0.0f32;
                let mut h = 0.0f32;
                for (x, y) in self.scaled_points() {
                    w = w.max(x);
                    h = h.max(y);
                }
                Rect::new(0, 0, w.round() as i32 + MARGIN, h.round() as i32 + MARGIN)
            }
            _ => Rect::new(0, 0, self.size.w + MARGIN, self.size.h + MARGIN),
        }
    }

    /// Shape-precise hit test in the control's own coordinate space
    /// (before rotation and mirroring are applied).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let m = MARGIN as f32;
        match self.kind {
            ShapeKind::Polygon => polygon_contains(&self.scaled_points(), x, y),
            ShapeKind::Ellipse => {
                let rx = (self.size.w - MARGIN) as f32 / 2.0;
                let ry = (self.size.h - MARGIN) as f32 / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (x - (m + rx)) / rx;
                let dy = (y - (m + ry)) / ry;
                dx * dx + dy * dy <= 1.0
            }
            ShapeKind::RoundedRect => {
                // Corner rounding is ignored for hit purposes.
                x >= m && x <= self.size.w as f32 && y >= m && y <= self.size.h as f32
            }
        }
    }
}

/// Ray-cast point-in-polygon test over an ordered vertex loop.
fn polygon_contains(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}
