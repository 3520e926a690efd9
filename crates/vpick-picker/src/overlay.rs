//! The overlay controller.
//!
//! Glues the canvas to one host session: positions the picker over the
//! viewport, loads the per-project layout (built-in default when absent),
//! tracks rig namespaces, owns the edit/run mode toggle (leaving edit mode
//! saves the layout), and dispatches run-mode clicks as host selection and
//! action scripts.
//!
//! Host notifications arrive through an explicit registration list added on
//! [`Overlay::show`] and removed on [`Overlay::close`]. Handlers only
//! enqueue into the overlay's inbox so a host callback never blocks;
//! [`Overlay::process_events`] drains the inbox on the UI tick and performs
//! the idempotent resyncs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};
use vpick_core::{Error, PickerConfig, Point, Rect, Result, Size};
use vpick_host::{
    qualify, rig_namespaces, run_action, HostEvent, HostEventKind, SceneHost, SelectMode,
    SubscriptionId, Subscriptions,
};

use crate::canvas::{CanvasMode, PickerCanvas};
use crate::library::LibraryBrowser;
use crate::model::ControlShape;
use crate::templates::{load_layout_or_default, save_layout, TemplateStore};

type Inbox = Rc<RefCell<VecDeque<HostEvent>>>;

pub struct Overlay {
    pub canvas: PickerCanvas,
    store: TemplateStore,
    config: PickerConfig,
    namespaces: Vec<String>,
    active_namespace: usize,
    geometry: Rect,
    visible: bool,
    /// Node whose watched attributes currently re-trigger enablement.
    watched_node: Option<String>,
    subscriptions: Vec<SubscriptionId>,
    inbox: Inbox,
}

impl Overlay {
    pub fn new(config: PickerConfig) -> Self {
        let mut canvas = PickerCanvas::new();
        canvas.set_snap_step(config.snap_step);
        let store = TemplateStore::new(&config.template_dir);
        Self {
            canvas,
            store,
            config,
            namespaces: Vec::new(),
            active_namespace: 0,
            geometry: Rect::default(),
            visible: false,
            watched_node: None,
            subscriptions: Vec::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Brings the overlay up over the host viewport: syncs geometry, loads
    /// the user layout (or the built-in default), discovers rig namespaces
    /// and registers the host event handlers.
    pub fn show(&mut self, host: &mut dyn SceneHost, events: &mut Subscriptions) -> Result<()> {
        self.geometry = host.viewport_rect();
        self.canvas
            .set_size(Size::new(self.geometry.w, self.geometry.h));

        let shapes = load_layout_or_default(&self.config.user_layout)?;
        self.canvas.import(shapes, true);

        self.namespaces = rig_namespaces(host, &self.config.signature_node);
        self.active_namespace = 0;

        for kind in [
            HostEventKind::Selection,
            HostEventKind::Attribute,
            HostEventKind::Viewport,
            HostEventKind::Application,
        ] {
            let inbox = self.inbox.clone();
            let id = events.subscribe(kind, move |event| {
                inbox.borrow_mut().push_back(event.clone());
            });
            self.subscriptions.push(id);
        }

        let namespace = self.active_namespace().to_string();
        self.canvas.update_enablement(host, &namespace);
        self.visible = true;
        info!(controls = self.canvas.len(), "overlay shown");
        Ok(())
    }

    /// Removes every host event registration added by `show`.
    pub fn close(&mut self, events: &mut Subscriptions) {
        for id in self.subscriptions.drain(..) {
            events.unsubscribe(id);
        }
        self.visible = false;
        info!("overlay closed");
    }

    /// Drains queued host notifications and performs the matching resyncs.
    /// Safe to call every UI tick; each resync is idempotent.
    pub fn process_events(&mut self, host: &mut dyn SceneHost) {
        let pending: Vec<HostEvent> = self.inbox.borrow_mut().drain(..).collect();
        for event in pending {
            match event {
                HostEvent::SelectionChanged => {
                    if self.canvas.mode() == CanvasMode::Run {
                        // Retarget the attribute watch onto the newly
                        // selected node.
                        self.watched_node = host.selected_nodes().first().cloned();
                        debug!(node = ?self.watched_node, "attribute watch retargeted");
                    }
                }
                HostEvent::AttributeChanged { node, attribute } => {
                    let watched = self.watched_node.as_deref() == Some(node.as_str())
                        && self.config.watched_attributes.contains(&attribute);
                    if watched {
                        let namespace = self.active_namespace().to_string();
                        self.canvas.update_enablement(host, &namespace);
                    }
                }
                HostEvent::ViewportResized { rect } => {
                    self.geometry = rect;
                    self.canvas.set_size(Size::new(rect.w, rect.h));
                }
                HostEvent::ApplicationActivated => self.visible = true,
                HostEvent::ApplicationDeactivated => self.visible = false,
            }
        }
    }

    /// Flips edit/run mode. Leaving edit mode persists the full layout to
    /// the per-project user path and re-syncs enablement against the host.
    pub fn toggle_edit_mode(&mut self, host: &mut dyn SceneHost) -> Result<()> {
        if self.canvas.mode() == CanvasMode::Edit {
            save_layout(&self.config.user_layout, &self.canvas.layout_shapes())?;
            self.canvas.set_mode(CanvasMode::Run);
            let namespace = self.active_namespace().to_string();
            self.canvas.update_enablement(host, &namespace);
            info!(path = %self.config.user_layout.display(), "edit mode left, layout saved");
        } else {
            self.canvas.set_mode(CanvasMode::Edit);
            info!("edit mode entered");
        }
        Ok(())
    }

    /// Run-mode click on the overlay: selects the hit control's bound node
    /// (additively with the modifier) and dispatches its action script.
    pub fn click(&mut self, host: &mut dyn SceneHost, pos: Point, additive: bool) {
        if self.canvas.mode() != CanvasMode::Run {
            return;
        }
        let Some(id) = self.canvas.item_at(pos) else {
            return;
        };
        let (node, action, enabled) = match self.canvas.item(id) {
            Some(item) => (
                item.shape.node.clone(),
                item.shape.action.clone(),
                item.enabled,
            ),
            None => return,
        };
        if !enabled {
            return;
        }

        let namespace = self.active_namespace().to_string();
        if !node.is_empty() {
            let mode = if additive {
                SelectMode::Add
            } else {
                SelectMode::Replace
            };
            host.select_node(&qualify(&namespace, &node), mode);
        }
        if !action.is_empty() {
            run_action(host, &action, &namespace);
        }
    }

    /// Re-discovers rig namespaces, re-reads viewport geometry and re-syncs
    /// enablement (the "update" action of the overlay menu).
    pub fn refresh(&mut self, host: &mut dyn SceneHost) {
        self.namespaces = rig_namespaces(host, &self.config.signature_node);
        if self.active_namespace >= self.namespaces.len() {
            self.active_namespace = 0;
        }
        self.geometry = host.viewport_rect();
        self.canvas
            .set_size(Size::new(self.geometry.w, self.geometry.h));
        let namespace = self.active_namespace().to_string();
        self.canvas.update_enablement(host, &namespace);
    }

    /// Saves the first selected control as a named template.
    pub fn save_selected_as_template(&self, name: &str) -> Result<PathBuf> {
        let item = self
            .canvas
            .items()
            .find(|i| i.selected)
            .ok_or_else(|| Error::other("no control selected"))?;
        let mut shape = item.shape.clone();
        shape.position = item.position;
        self.store.save(name, &shape)
    }

    /// Opens the template library browser over this overlay's store.
    pub fn open_library(&self) -> Result<LibraryBrowser> {
        LibraryBrowser::open(
            &self.store,
            self.config.library_columns,
            self.config.library_spacing,
        )
    }

    /// Inserts a control picked from the library at a canvas position.
    pub fn insert_control(&mut self, shape: Option<ControlShape>, pos: Point) -> Option<u64> {
        self.canvas.insert(shape, pos)
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// The namespace bound node names resolve against; empty when no rig is
    /// loaded.
    pub fn active_namespace(&self) -> &str {
        self.namespaces
            .get(self.active_namespace)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_active_namespace(&mut self, index: usize) -> bool {
        if index < self.namespaces.len() {
            self.active_namespace = index;
            true
        } else {
            false
        }
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("controls", &self.canvas.len())
            .field("mode", &self.canvas.mode())
            .field("namespaces", &self.namespaces)
            .field("visible", &self.visible)
            .finish()
    }
}
