//! # vpick Core
//!
//! Core types shared by every vpick crate:
//! - Error taxonomy (`LayoutError`, `TemplateError`, unified [`Error`])
//! - Integer canvas geometry ([`Point`], [`Size`], [`Rect`]) and [`Color`]
//! - User configuration ([`PickerConfig`])
//!
//! Nothing in this crate touches the host application or the filesystem
//! beyond configuration load/save.

pub mod config;
pub mod error;
pub mod geometry;

pub use config::PickerConfig;
pub use error::{Error, LayoutError, Result, TemplateError};
pub use geometry::{Color, Point, Rect, Size, MARGIN};
