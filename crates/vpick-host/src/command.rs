//! Action script dispatch.
//!
//! A control's action script is an opaque host command string with a single
//! substitution rule: every standalone `$NAMESPACE` token becomes the quoted
//! active namespace. The expanded text goes to the host verbatim. The script
//! is attacker-equivalent to arbitrary host code; the picker neither parses
//! nor sandboxes it, execution is entirely the host's responsibility.

use crate::scene::SceneHost;

/// The placeholder substituted at dispatch time.
pub const NAMESPACE_TOKEN: &str = "$NAMESPACE";

/// Replaces every standalone `$NAMESPACE` with the quoted namespace prefix.
///
/// "Standalone" means the token is not followed by an identifier character,
/// so `$NAMESPACE_SUFFIX` stays untouched. The replacement carries the
/// trailing `:` separator (`"chr1:"`) so scripts can concatenate node names
/// directly; an empty namespace substitutes the empty quoted string.
pub fn expand_namespace(script: &str, namespace: &str) -> String {
    let replacement = if namespace.is_empty() {
        "\"\"".to_string()
    } else {
        format!("\"{namespace}:\"")
    };

    let mut out = String::with_capacity(script.len());
    let mut rest = script;
    while let Some(at) = rest.find(NAMESPACE_TOKEN) {
        let after = &rest[at + NAMESPACE_TOKEN.len()..];
        let boundary = after
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_');

        out.push_str(&rest[..at]);
        if boundary {
            out.push_str(&replacement);
        } else {
            out.push_str(NAMESPACE_TOKEN);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Expands the namespace placeholder and hands the script to the host.
///
/// Empty scripts are ignored. Fire-and-forget: no result comes back.
pub fn run_action(host: &mut dyn SceneHost, script: &str, namespace: &str) {
    if script.is_empty() {
        return;
    }
    let expanded = expand_namespace(script, namespace);
    tracing::debug!(namespace, "dispatching action script");
    host.execute(&expanded);
}
