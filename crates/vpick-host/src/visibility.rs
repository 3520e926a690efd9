//! Effective visibility of host nodes.
//!
//! A control is only clickable when its bound node would actually render,
//! which is more than the node's own visibility flag: a node whose renderable
//! sub-shapes are all hidden is effectively invisible, and any hidden
//! ancestor hides the whole branch.

use crate::scene::{qualify, SceneHost};

/// Whether `node` is effectively visible in the host scene.
///
/// A node is invisible if all of its renderable sub-shapes are individually
/// hidden, or if its own visibility attribute is off. Ancestors are walked
/// with the visibility attribute check only; the sub-shape check applies to
/// the queried node itself, since ancestor transforms usually carry no
/// shapes of their own.
pub fn is_actually_visible(host: &dyn SceneHost, node: &str) -> bool {
    visible_from(host, node, true)
}

fn visible_from(host: &dyn SceneHost, node: &str, check_shapes: bool) -> bool {
    if check_shapes {
        let shapes = host.shape_visibilities(node);
        if !shapes.is_empty() && !shapes.iter().any(|v| *v) {
            return false;
        }
    }

    if host.visibility_attribute(node) == Some(false) {
        return false;
    }

    match host.parent(node) {
        Some(parent) => visible_from(host, &parent, false),
        None => true,
    }
}

/// Loaded reference namespaces that look like a rig.
///
/// A namespace counts when the configured signature node exists under it;
/// this is how the overlay builds its character list without a dedicated
/// host-side registry.
pub fn rig_namespaces(host: &dyn SceneHost, signature_node: &str) -> Vec<String> {
    host.reference_namespaces()
        .into_iter()
        .filter(|ns| host.node_exists(&qualify(ns, signature_node)))
        .collect()
}
