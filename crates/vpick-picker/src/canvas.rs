//! The picker canvas.
//!
//! Owns the set of [`ControlItem`]s, the current selection, and the edit
//! mode flag that gates authoring operations. Input routing lives here:
//! press/motion/release drive selection, rubber-band selection and lockstep
//! dragging; the wheel rescales the selection. Run-mode clicks are resolved
//! by the overlay, which only needs `item_at`.
//!
//! No user-driven edit ever errors out of this module; out-of-range drags
//! and resizes are clamped or rounded instead.

use tracing::{debug, info};
use vpick_core::{Color, Point, Rect, Size};
use vpick_host::{is_actually_visible, qualify, SceneHost};

use crate::item::ControlItem;
use crate::model::{ControlShape, ShapeKind};

/// Multiplicative size step per wheel notch, scaling up.
const SCALE_STEP_UP: f64 = 1.033;
/// Multiplicative size step per wheel notch, scaling down.
const SCALE_STEP_DOWN: f64 = 0.966;
/// Offset applied to every clone when copying a multi-selection.
const COPY_OFFSET: Point = Point { x: 50, y: 50 };
/// Dragged items keep this distance from the far canvas edges.
const EDGE_MARGIN: i32 = 25;

/// Whether the canvas allows authoring operations or only run-mode clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    /// Authoring: move/resize/add/remove controls.
    Edit,
    /// Selection and action dispatch only.
    Run,
}

/// Modifier keys as delivered with an input event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Additive selection and grid snapping.
    pub shift: bool,
    /// Wheel rescale.
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy)]
struct RubberBand {
    anchor: Point,
}

/// The 2D scene of picker controls.
#[derive(Debug)]
pub struct PickerCanvas {
    items: Vec<ControlItem>,
    next_id: u64,
    size: Size,
    mode: CanvasMode,
    snap_step: i32,
    rubber_band: Option<RubberBand>,
}

impl PickerCanvas {
    pub fn new() -> Self {
        Self::with_size(Size::new(800, 500))
    }

    pub fn with_size(size: Size) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            size,
            mode: CanvasMode::Run,
            snap_step: 5,
            rubber_band: None,
        }
    }

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    /// Switches edit/run mode. Either direction clears the selection and
    /// re-tags item editability; entering edit mode additionally enables
    /// every item so everything can be authored.
    pub fn set_mode(&mut self, mode: CanvasMode) {
        self.mode = mode;
        let editable = mode == CanvasMode::Edit;
        for item in &mut self.items {
            item.editable = editable;
            item.selected = false;
            if editable {
                item.enabled = true;
            }
        }
        self.rubber_band = None;
        debug!(?mode, "canvas mode changed");
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_snap_step(&mut self, step: i32) {
        self.snap_step = step.max(1);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &ControlItem> {
        self.items.iter()
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ControlItem> {
        self.items.iter_mut()
    }

    pub fn item(&self, id: u64) -> Option<&ControlItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: u64) -> Option<&mut ControlItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn selected_ids(&self) -> Vec<u64> {
        self.items.iter().filter(|i| i.selected).map(|i| i.id).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.selected).count()
    }

    pub fn clear_selection(&mut self) {
        for item in &mut self.items {
            item.selected = false;
        }
    }

    /// The topmost visible item under a scene point.
    pub fn item_at(&self, pos: Point) -> Option<u64> {
        self.items
            .iter()
            .rev()
            .find(|i| i.visible && i.hit(pos))
            .map(|i| i.id)
    }

    /// Inserts a control at a position. Edit mode only; a default button
    /// shape is used when none is supplied. Returns the new item id.
    pub fn insert(&mut self, shape: Option<ControlShape>, position: Point) -> Option<u64> {
        if self.mode != CanvasMode::Edit {
            return None;
        }

        let mut shape = shape.unwrap_or_else(default_control);
        shape.position = position;

        let id = self.next_id;
        self.next_id += 1;
        let mut item = ControlItem::new(id, shape, true);
        item.position = position;
        self.items.push(item);
        debug!(id, "control inserted");
        Some(id)
    }

    /// Replaces or appends a batch-deserialized document.
    ///
    /// Runs the normalization pass once over the batch: the smallest X/Y
    /// position (clamped at zero) is subtracted from every imported control,
    /// so negative authoring coordinates land on the visible canvas while
    /// already-positive layouts keep their placement. Items from earlier
    /// imports are never shifted.
    pub fn import(&mut self, shapes: Vec<ControlShape>, replace: bool) {
        if replace {
            self.items.clear();
        }

        let min_x = shapes.iter().map(|s| s.position.x).min().unwrap_or(0).min(0);
        let min_y = shapes.iter().map(|s| s.position.y).min().unwrap_or(0).min(0);
        let offset = Point::new(-min_x, -min_y);

        let editable = self.mode == CanvasMode::Edit;
        let count = shapes.len();
        for mut shape in shapes {
            shape.position = shape.position + offset;
            let id = self.next_id;
            self.next_id += 1;
            self.items.push(ControlItem::new(id, shape, editable));
        }
        info!(count, replace, "layout imported");
    }

    /// Ordered control shapes with live positions committed, ready to
    /// serialize.
    pub fn layout_shapes(&self) -> Vec<ControlShape> {
        self.items
            .iter()
            .map(|item| {
                let mut shape = item.shape.clone();
                shape.position = item.position;
                shape
            })
            .collect()
    }

    /// Mouse press. In edit mode this drives selection, drag start and
    /// rubber-band start; run-mode presses are handled by the overlay.
    pub fn press(&mut self, pos: Point, modifiers: Modifiers) {
        if self.mode != CanvasMode::Edit {
            return;
        }

        if let Some(id) = self.item_at(pos) {
            let already_selected = self.item(id).is_some_and(|i| i.selected);
            if already_selected {
                // Second press on a selected item begins a lockstep drag of
                // the whole selection.
                for item in &mut self.items {
                    if item.selected {
                        item.dragging = true;
                        item.drag_offset = pos - item.position;
                    }
                }
            } else {
                if !modifiers.shift {
                    self.clear_selection();
                }
                if let Some(item) = self.item_mut(id) {
                    item.selected = true;
                }
            }
        } else {
            if !modifiers.shift {
                self.clear_selection();
            }
            if self.selected_count() == 0 {
                self.rubber_band = Some(RubberBand { anchor: pos });
            }
        }
    }

    /// Mouse motion. Updates the rubber band, moves a drag in progress, or
    /// refreshes hover state.
    pub fn motion(&mut self, pos: Point, modifiers: Modifiers) {
        if let Some(band) = self.rubber_band {
            let rect = Rect::from_corners(band.anchor, pos);
            for item in &mut self.items {
                item.selected = item.visible && rect.intersects(&item.scene_rect());
            }
            return;
        }

        if self.items.iter().any(|i| i.dragging) {
            self.drag_to(pos, modifiers);
            return;
        }

        let top = self.item_at(pos);
        for item in &mut self.items {
            item.hovered = top == Some(item.id);
        }
    }

    /// Mouse release: ends the rubber band and commits dragged positions
    /// back into the shapes.
    pub fn release(&mut self, _pos: Point) {
        self.rubber_band = None;
        for item in &mut self.items {
            if item.dragging {
                item.dragging = false;
                item.commit_position();
            }
        }
    }

    /// Wheel with the rescale modifier multiplies every selected item's
    /// size by a fixed step per notch, rounded to the nearest integer.
    pub fn wheel(&mut self, delta: i32, modifiers: Modifiers) {
        if self.mode != CanvasMode::Edit || !modifiers.ctrl || delta == 0 {
            return;
        }

        let factor = if delta > 0 {
            SCALE_STEP_UP
        } else {
            SCALE_STEP_DOWN
        };
        for item in &mut self.items {
            if item.selected {
                item.shape.size = Size::new(
                    (item.shape.size.w as f64 * factor).round() as i32,
                    (item.shape.size.h as f64 * factor).round() as i32,
                );
            }
        }
    }

    /// Clones every selected item. With a multi-selection each clone lands
    /// at its source offset by a fixed (50, 50) and the selection becomes
    /// exactly the clones; a single clone is placed at the supplied cursor
    /// position and the selection is untouched. Returns the new ids.
    pub fn copy_selected(&mut self, cursor: Point) -> Vec<u64> {
        if self.mode != CanvasMode::Edit {
            return Vec::new();
        }

        let sources: Vec<(Point, ControlShape)> = self
            .items
            .iter()
            .filter(|i| i.selected)
            .map(|i| (i.position, i.shape.clone()))
            .collect();
        let multi = sources.len() > 1;

        let mut new_ids = Vec::with_capacity(sources.len());
        for (source_pos, shape) in sources {
            let position = if multi {
                source_pos + COPY_OFFSET
            } else {
                cursor
            };
            if let Some(id) = self.insert(Some(shape), position) {
                new_ids.push(id);
            }
        }

        if multi {
            self.clear_selection();
            for id in &new_ids {
                if let Some(item) = self.item_mut(*id) {
                    item.selected = true;
                }
            }
        }
        new_ids
    }

    /// Removes every selected item. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        if self.mode != CanvasMode::Edit {
            return 0;
        }
        let before = self.items.len();
        self.items.retain(|i| !i.selected);
        let removed = before - self.items.len();
        if removed > 0 {
            debug!(removed, "controls removed");
        }
        removed
    }

    /// Flips visibility of every item.
    pub fn toggle_visibility(&mut self) {
        for item in &mut self.items {
            item.visible = !item.visible;
        }
    }

    /// Re-evaluates run-mode enablement against the host scene: a control
    /// is enabled when it has no bound node, or when the namespaced node
    /// exists and is effectively visible.
    pub fn update_enablement(&mut self, host: &dyn SceneHost, namespace: &str) {
        for item in &mut self.items {
            item.enabled = if item.shape.node.is_empty() {
                true
            } else {
                let node = qualify(namespace, &item.shape.node);
                host.node_exists(&node) && is_actually_visible(host, &node)
            };
        }
    }

    fn drag_to(&mut self, pos: Point, modifiers: Modifiers) {
        let snap = self.snap_step;
        let canvas = self.size;
        for item in &mut self.items {
            if !(item.dragging && item.selected) {
                continue;
            }

            let mut new_pos = pos - item.drag_offset;
            if modifiers.shift {
                new_pos.x = snap_to(new_pos.x, snap);
                new_pos.y = snap_to(new_pos.y, snap);
            }

            let bounds = item.shape.bounding_rect();
            new_pos.x = clamp_axis(new_pos.x, canvas.w - bounds.w - EDGE_MARGIN);
            new_pos.y = clamp_axis(new_pos.y, canvas.h - bounds.h - EDGE_MARGIN);
            item.position = new_pos;
        }
    }
}

impl Default for PickerCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// The default model for a bare insert: a small accent-colored button.
fn default_control() -> ControlShape {
    ControlShape {
        kind: ShapeKind::RoundedRect,
        size: Size::new(100, 30),
        fill_color: Color::new(121, 255, 12),
        label: "button".to_string(),
        ..ControlShape::default()
    }
}

fn snap_to(value: i32, step: i32) -> i32 {
    let step = step.max(1);
    ((value as f64 / step as f64).round() as i32) * step
}

fn clamp_axis(value: i32, max: i32) -> i32 {
    value.clamp(0, max.max(0))
}
