//! The template library browser.
//!
//! A modal picker over the template store: every template is loaded as a
//! thumbnail entry and laid out in a grid, and picking returns a value copy
//! of the chosen control for insertion. There is no selection model beyond
//! single-click pick; the embedding UI is expected to confirm before
//! calling [`LibraryBrowser::delete`].

use std::path::PathBuf;
use tracing::warn;
use vpick_core::{Point, Rect, Result};

use crate::model::ControlShape;
use crate::templates::TemplateStore;

/// One template thumbnail in the grid.
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    /// Display name (the template file stem).
    pub name: String,
    pub path: PathBuf,
    pub shape: ControlShape,
    /// Grid cell in browser coordinates.
    pub cell: Rect,
}

/// A grid of template thumbnails with a synchronous pick result.
#[derive(Debug)]
pub struct LibraryBrowser {
    entries: Vec<LibraryEntry>,
    columns: usize,
    spacing: i32,
}

impl LibraryBrowser {
    /// Loads every template in the store into a laid-out grid. Unreadable
    /// template files are skipped with a warning; browsing should not fail
    /// because one file went bad.
    pub fn open(store: &TemplateStore, columns: usize, spacing: i32) -> Result<Self> {
        let mut entries = Vec::new();
        for template in store.list()? {
            match store.load(&template.path) {
                Ok(shape) => entries.push(LibraryEntry {
                    name: template.name,
                    path: template.path,
                    shape,
                    cell: Rect::default(),
                }),
                Err(e) => {
                    warn!(path = %template.path.display(), error = %e, "skipping unreadable template");
                }
            }
        }

        let mut browser = Self {
            entries,
            columns: columns.max(1),
            spacing,
        };
        browser.layout();
        Ok(browser)
    }

    /// Lays entries out left-to-right, wrapping at the column count; each
    /// row is as tall as its tallest entry.
    fn layout(&mut self) {
        let mut y = 0;
        for row in self.entries.chunks_mut(self.columns) {
            let row_height = row
                .iter()
                .map(|e| e.shape.bounding_rect().h)
                .max()
                .unwrap_or(0);

            let mut x = 0;
            for entry in row.iter_mut() {
                let bounds = entry.shape.bounding_rect();
                entry.cell = Rect::new(x, y, bounds.w, bounds.h);
                x += bounds.w + self.spacing;
            }
            y += row_height + self.spacing;
        }
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry whose grid cell contains a browser-space point.
    pub fn entry_at(&self, pos: Point) -> Option<usize> {
        self.entries.iter().position(|e| e.cell.contains(pos))
    }

    /// The modal result: a value copy of the picked template's control.
    pub fn pick(&self, index: usize) -> Option<ControlShape> {
        self.entries.get(index).map(|e| e.shape.clone())
    }

    /// Removes the backing file of an entry and refreshes the grid.
    pub fn delete(&mut self, store: &TemplateStore, index: usize) -> Result<()> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(());
        };
        store.delete(&entry.path)?;
        self.entries.remove(index);
        self.layout();
        Ok(())
    }
}
