//! Host event subscriptions.
//!
//! The host delivers asynchronous notifications (selection changed, an
//! attribute changed, the viewport moved) as plain callbacks. Subscriptions
//! are an explicit list of (event kind, handler) registrations: the overlay
//! adds its registrations on show and removes them on close, and nothing is
//! delivered through inheritance or a global bus.
//!
//! Everything here is single-threaded; handlers run on the publishing call
//! and must return quickly.

use serde::{Deserialize, Serialize};
use vpick_core::Rect;

/// A notification delivered by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// The host's node selection changed.
    SelectionChanged,
    /// A watched attribute on a node changed.
    AttributeChanged {
        /// The node carrying the attribute.
        node: String,
        /// The attribute name.
        attribute: String,
    },
    /// The viewport the overlay covers moved or resized.
    ViewportResized {
        /// New screen-space geometry.
        rect: Rect,
    },
    /// The host application gained focus.
    ApplicationActivated,
    /// The host application lost focus.
    ApplicationDeactivated,
}

impl HostEvent {
    /// The kind used for subscription filtering.
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::SelectionChanged => HostEventKind::Selection,
            HostEvent::AttributeChanged { .. } => HostEventKind::Attribute,
            HostEvent::ViewportResized { .. } => HostEventKind::Viewport,
            HostEvent::ApplicationActivated | HostEvent::ApplicationDeactivated => {
                HostEventKind::Application
            }
        }
    }
}

/// Event kind for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostEventKind {
    Selection,
    Attribute,
    Viewport,
    Application,
}

/// Handle for a registered event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Handler = Box<dyn FnMut(&HostEvent)>;

/// The registration list the host exposes to overlay code.
///
/// Registrations are dispatched in subscription order.
#[derive(Default)]
pub struct Subscriptions {
    next_id: u64,
    handlers: Vec<(SubscriptionId, HostEventKind, Handler)>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    pub fn subscribe<F>(&mut self, kind: HostEventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&HostEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        tracing::debug!(%id, ?kind, "subscription added");
        id
    }

    /// Remove a registration. Returns true when it was present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _, _)| *hid != id);
        let removed = self.handlers.len() != before;
        if removed {
            tracing::debug!(%id, "subscription removed");
        }
        removed
    }

    /// Deliver an event to every matching handler, in registration order.
    /// Returns the number of handlers called.
    pub fn dispatch(&mut self, event: &HostEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for (_, handler_kind, handler) in self.handlers.iter_mut() {
            if *handler_kind == kind {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
