//! The host scene boundary.
//!
//! [`SceneHost`] is the complete set of primitives the picker consumes from
//! the host 3D application. The picker never reaches past this trait: it
//! queries node state, forwards selection intents, and hands command strings
//! over for execution. Command execution is fire-and-forget; the host owns
//! any failure handling.

use vpick_core::Rect;

/// How a node selection combines with the host's existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Replace the current selection.
    Replace,
    /// Add to the current selection.
    Add,
}

/// Primitives the host application exposes to the picker.
pub trait SceneHost {
    /// Does a node with this (namespace-qualified) name exist?
    fn node_exists(&self, node: &str) -> bool;

    /// The node's own visibility attribute; `None` when the node has no such
    /// attribute (it then never hides the node).
    fn visibility_attribute(&self, node: &str) -> Option<bool>;

    /// Visibility flags of the node's renderable sub-shapes, empty when the
    /// node has none.
    fn shape_visibilities(&self, node: &str) -> Vec<bool>;

    /// The node's parent transform, `None` at the scene root.
    fn parent(&self, node: &str) -> Option<String>;

    /// Nodes currently selected in the host.
    fn selected_nodes(&self) -> Vec<String>;

    /// Select a node, replacing or extending the host selection.
    fn select_node(&mut self, node: &str, mode: SelectMode);

    /// Execute a host command string. Fire-and-forget; results and failures
    /// stay on the host side.
    fn execute(&mut self, command: &str);

    /// Namespaces of currently loaded scene references.
    fn reference_namespaces(&self) -> Vec<String>;

    /// Screen-space geometry of the viewport the overlay covers.
    fn viewport_rect(&self) -> Rect;
}

/// Qualifies a node name with a namespace prefix.
///
/// An empty namespace leaves the name untouched so layouts keep working in
/// scenes where the rig is not referenced.
pub fn qualify(namespace: &str, node: &str) -> String {
    if namespace.is_empty() {
        node.to_string()
    } else {
        format!("{namespace}:{node}")
    }
}

/// A host with no scene: every node is absent and commands are dropped.
///
/// Used when the picker runs outside a host session (layout validation,
/// rendering previews).
#[derive(Debug, Default)]
pub struct NullHost;

impl SceneHost for NullHost {
    fn node_exists(&self, _node: &str) -> bool {
        false
    }

    fn visibility_attribute(&self, _node: &str) -> Option<bool> {
        None
    }

    fn shape_visibilities(&self, _node: &str) -> Vec<bool> {
        Vec::new()
    }

    fn parent(&self, _node: &str) -> Option<String> {
        None
    }

    fn selected_nodes(&self) -> Vec<String> {
        Vec::new()
    }

    fn select_node(&mut self, node: &str, _mode: SelectMode) {
        tracing::debug!(node, "select dropped: no host session");
    }

    fn execute(&mut self, _command: &str) {
        tracing::debug!("command dropped: no host session");
    }

    fn reference_namespaces(&self) -> Vec<String> {
        Vec::new()
    }

    fn viewport_rect(&self) -> Rect {
        Rect::default()
    }
}

/// One node of a [`MemoryHost`] scene.
#[derive(Debug, Clone, Default)]
struct MemoryNode {
    parent: Option<String>,
    visibility: Option<bool>,
    shape_visibilities: Vec<bool>,
}

/// An in-memory scene standing in for the host application.
///
/// Backs the test suite and headless runs: nodes with parenting and
/// visibility state, recorded selection, and a transcript of executed
/// commands.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: std::collections::HashMap<String, MemoryNode>,
    namespaces: Vec<String>,
    selection: Vec<String>,
    commands: Vec<String>,
    viewport: Rect,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            viewport: Rect::new(0, 0, 800, 500),
            ..Default::default()
        }
    }

    /// Adds a node. The parent does not have to exist yet.
    pub fn add_node(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.nodes.insert(
            name.to_string(),
            MemoryNode {
                parent: parent.map(str::to_string),
                ..Default::default()
            },
        );
        self
    }

    /// Sets the node's visibility attribute.
    pub fn set_visibility(&mut self, name: &str, visible: bool) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(name) {
            node.visibility = Some(visible);
        }
        self
    }

    /// Appends a renderable sub-shape with the given visibility flag.
    pub fn add_shape(&mut self, name: &str, visible: bool) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(name) {
            node.shape_visibilities.push(visible);
        }
        self
    }

    /// Registers a loaded reference namespace.
    pub fn add_namespace(&mut self, namespace: &str) -> &mut Self {
        self.namespaces.push(namespace.to_string());
        self
    }

    pub fn set_viewport(&mut self, rect: Rect) -> &mut Self {
        self.viewport = rect;
        self
    }

    /// The selection as recorded by `select_node` calls.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Pretend the user selected these nodes in the host.
    pub fn set_selection(&mut self, nodes: &[&str]) -> &mut Self {
        self.selection = nodes.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Every command string handed over for execution, oldest first.
    pub fn executed_commands(&self) -> &[String] {
        &self.commands
    }
}

impl SceneHost for MemoryHost {
    fn node_exists(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    fn visibility_attribute(&self, node: &str) -> Option<bool> {
        self.nodes.get(node).and_then(|n| n.visibility)
    }

    fn shape_visibilities(&self, node: &str) -> Vec<bool> {
        self.nodes
            .get(node)
            .map(|n| n.shape_visibilities.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: &str) -> Option<String> {
        self.nodes.get(node).and_then(|n| n.parent.clone())
    }

    fn selected_nodes(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn select_node(&mut self, node: &str, mode: SelectMode) {
        if mode == SelectMode::Replace {
            self.selection.clear();
        }
        self.selection.push(node.to_string());
    }

    fn execute(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn reference_namespaces(&self) -> Vec<String> {
        self.namespaces.clone()
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }
}
