//! # vpick Picker
//!
//! The picker surface: everything between the persisted control definitions
//! and the host boundary.
//!
//! ## Core components
//!
//! - **Model**: [`ControlShape`] - geometry, styling and behavior of one
//!   control; polygon scaling and bounding-box rules
//! - **XML**: the human-editable record format and batch layout documents
//! - **Canvas**: [`PickerCanvas`] - the editable 2D scene with selection,
//!   rubber-band, lockstep drag, wheel rescale and host enablement sync
//! - **Templates**: the file-backed single-control library and per-project
//!   layout persistence with a built-in default
//! - **Library**: [`LibraryBrowser`] - modal template picker returning a
//!   value copy
//! - **Overlay**: [`Overlay`] - host integration: viewport geometry, edit
//!   vs. run mode, namespaces, event registrations, click dispatch
//! - **Renderer**: tiny-skia rasterization of the canvas
//!
//! ## Data flow
//!
//! ```text
//! templates/layout file -> Canvas (import) -> ControlItem (hit/render)
//!        ^                                         |
//!        +--------- save on leaving edit mode <----+
//! ```

pub mod canvas;
pub mod item;
pub mod library;
pub mod model;
pub mod overlay;
pub mod properties;
pub mod renderer;
pub mod templates;
pub mod xml;

pub use canvas::{CanvasMode, Modifiers, PickerCanvas};
pub use item::ControlItem;
pub use library::{LibraryBrowser, LibraryEntry};
pub use model::{ControlShape, ShapeKind};
pub use overlay::Overlay;
pub use properties::{apply, apply_to_selection, properties, Property, PropertyValue};
pub use templates::{
    default_layout, load_layout, load_layout_or_default, save_layout, TemplateEntry, TemplateStore,
};
