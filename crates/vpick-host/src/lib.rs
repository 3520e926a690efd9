//! # vpick Host
//!
//! The boundary between the picker and the host 3D application. The host's
//! scene graph, selection, command interpreter and windowing are external
//! collaborators; this crate defines the narrow surface the picker consumes:
//!
//! - [`SceneHost`] - node queries, selection intents, command execution
//! - [`Subscriptions`] - explicit (event kind, handler) registrations for
//!   host notifications
//! - effective-visibility resolution and rig namespace discovery
//! - action script namespace expansion and dispatch
//!
//! [`MemoryHost`] is an in-memory stand-in used by tests and headless runs.

pub mod command;
pub mod events;
pub mod scene;
pub mod visibility;

pub use command::{expand_namespace, run_action, NAMESPACE_TOKEN};
pub use events::{HostEvent, HostEventKind, SubscriptionId, Subscriptions};
pub use scene::{qualify, MemoryHost, NullHost, SceneHost, SelectMode};
pub use visibility::{is_actually_visible, rig_namespaces};
