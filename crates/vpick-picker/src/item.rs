//! A control instance on the canvas.
//!
//! [`ControlItem`] wraps one [`ControlShape`] with the per-instance state
//! the canvas needs while the user interacts: hover, selection, drag
//! bookkeeping, and whether the item is editable/enabled in the current
//! mode. None of this is persisted; saving always goes through the owned
//! shape, with the live position committed back on drag release.

use vpick_core::{Point, Rect};

use crate::model::ControlShape;

#[derive(Debug, Clone)]
pub struct ControlItem {
    pub id: u64,
    pub shape: ControlShape,
    /// Live scene position; authoritative while dragging, committed into
    /// `shape.position` on release.
    pub position: Point,
    pub visible: bool,
    /// Whether authoring operations apply (canvas edit mode).
    pub editable: bool,
    /// Whether run-mode interaction is allowed (bound node exists and is
    /// effectively visible, or the control is decorative).
    pub enabled: bool,
    pub selected: bool,
    pub hovered: bool,
    pub dragging: bool,
    /// Cursor-to-position offset captured when a drag starts.
    pub drag_offset: Point,
}

impl ControlItem {
    pub fn new(id: u64, shape: ControlShape, editable: bool) -> Self {
        let position = shape.position;
        Self {
            id,
            shape,
            position,
            visible: true,
            editable,
            enabled: true,
            selected: false,
            hovered: false,
            dragging: false,
            drag_offset: Point::default(),
        }
    }

    /// Bounding box in scene coordinates. Rotation and mirroring do not
    /// change it, matching the shape's own bounding contract.
    pub fn scene_rect(&self) -> Rect {
        self.shape.bounding_rect().translated(self.position)
    }

    /// Shape-precise hit test against a scene point: the point is mapped
    /// into item-local space (undo translation, mirroring, rotation, in
    /// that order) and tested against the shape.
    pub fn hit(&self, scene: Point) -> bool {
        let mut x = (scene.x - self.position.x) as f32;
        let mut y = (scene.y - self.position.y) as f32;

        if self.shape.mirrored {
            x = -x;
        }
        if self.shape.rotation != 0 {
            let angle = -(self.shape.rotation as f32).to_radians();
            let (sin, cos) = angle.sin_cos();
            let (rx, ry) = (x * cos - y * sin, x * sin + y * cos);
            x = rx;
            y = ry;
        }

        self.shape.contains(x, y)
    }

    /// Writes the live position back into the persisted shape.
    pub fn commit_position(&mut self) {
        self.shape.position = self.position;
    }

    /// Controls with neither a bound node nor an action are decorative and
    /// never disabled.
    pub fn is_decorative(&self) -> bool {
        self.shape.node.is_empty() && self.shape.action.is_empty()
    }
}
