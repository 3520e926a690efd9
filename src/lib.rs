//! # vpick
//!
//! An on-screen control picker overlaid on a 3D viewport inside a host
//! animation application: riggers author clickable shape layouts bound to
//! scene nodes, animators click them to select and drive a rig.
//!
//! ## Architecture
//!
//! vpick is organized as a workspace with multiple crates:
//!
//! 1. **vpick-core** - errors, canvas geometry, colors, configuration
//! 2. **vpick-host** - the host application boundary: scene queries,
//!    selection intents, command dispatch, event subscriptions
//! 3. **vpick-picker** - control shapes, XML layouts, the editable canvas,
//!    template library, overlay controller and renderer
//! 4. **vpick** - this crate: the headless binary and shared logging setup
//!
//! The host 3D application itself (scene graph, command interpreter,
//! windowing) stays behind the `SceneHost` trait; `MemoryHost` stands in
//! for it in tests and headless runs.

pub use vpick_core::{
    Color, Error, LayoutError, PickerConfig, Point, Rect, Result, Size, TemplateError, MARGIN,
};
pub use vpick_host::{
    expand_namespace, is_actually_visible, qualify, rig_namespaces, run_action, HostEvent,
    HostEventKind, MemoryHost, NullHost, SceneHost, SelectMode, SubscriptionId, Subscriptions,
};
pub use vpick_picker::{
    default_layout, load_layout, load_layout_or_default, save_layout, CanvasMode, ControlItem,
    ControlShape, LibraryBrowser, Modifiers, Overlay, PickerCanvas, ShapeKind, TemplateStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
