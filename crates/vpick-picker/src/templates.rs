//! File-backed template library and layout persistence.
//!
//! Templates are single-control XML files in one directory, used as copy
//! sources when inserting; a layout is the full canvas state saved as one
//! batch document per project. All operations are synchronous whole-file
//! reads/writes; a failed write leaves the previous file untouched only in
//! the sense that nothing else is cleaned up or retried.

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vpick_core::{Result, TemplateError};

use crate::model::ControlShape;
use crate::xml;

/// Built-in fallback layout used when the per-project user layout is
/// missing: a minimal hand picker with a thumb polygon and a pinky ellipse.
const DEFAULT_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<layout>
  <control kind="polygon" position="40,60" rotation="0" mirrored="0" size="24,30" label="thumb" fillColor="255,85,85" useGradient="1" labelColor="0,0,0" cornerRadius="25" points="0 0,14 2,20 8,18 16,8 18,2 10" node="L_thumb_1_control"/>
  <control kind="ellipse" position="80,45" rotation="0" mirrored="0" size="14,40" label="pinky" fillColor="85,170,255" useGradient="1" labelColor="0,0,0" cornerRadius="25" node="L_pinky_1_control"/>
</layout>
"#;

/// One enumerated template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Display name (the file stem).
    pub name: String,
    pub path: PathBuf,
}

/// A directory of reusable single-control templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerates template files, sorted by name. A missing directory is an
    /// empty library, not an error.
    pub fn list(&self) -> Result<Vec<TemplateEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|_| TemplateError::DirectoryNotReadable {
            path: self.dir.display().to_string(),
        })?;

        let mut templates = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            templates.push(TemplateEntry { name, path });
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Loads one template file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ControlShape> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TemplateError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        xml::parse_control(&content)
    }

    /// Saves a control under a template name, creating the directory on
    /// first use. Returns the written path.
    pub fn save(&self, name: &str, shape: &ControlShape) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{name}.xml"));
        let document = xml::write_control_document(shape)?;
        std::fs::write(&path, document)?;
        info!(path = %path.display(), "template saved");
        Ok(path)
    }

    /// Deletes a template file.
    pub fn delete(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TemplateError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        std::fs::remove_file(path)?;
        info!(path = %path.display(), "template deleted");
        Ok(())
    }
}

/// Loads a layout document from disk.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Vec<ControlShape>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    xml::parse_document(&content)
}

/// Loads the user layout, falling back to the built-in default when the
/// file does not exist. Parse errors in an existing file still surface.
pub fn load_layout_or_default(path: impl AsRef<Path>) -> Result<Vec<ControlShape>> {
    let path = path.as_ref();
    if path.exists() {
        load_layout(path)
    } else {
        warn!(path = %path.display(), "user layout missing, using built-in default");
        Ok(default_layout())
    }
}

/// Saves a layout document, creating parent directories as needed.
pub fn save_layout(path: impl AsRef<Path>, shapes: &[ControlShape]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let document = xml::write_document(shapes)?;
    std::fs::write(path, document)?;
    info!(path = %path.display(), controls = shapes.len(), "layout saved");
    Ok(())
}

/// The built-in fallback layout.
pub fn default_layout() -> Vec<ControlShape> {
    // The embedded document is validated by the test suite; failing to
    // parse it is a build defect, not a runtime condition.
    xml::parse_document(DEFAULT_LAYOUT).expect("built-in default layout is valid")
}
