//! Configuration for the picker.
//!
//! A single JSON file per project holds the knobs a rigger may want to move:
//! where templates and the personal layout live, the snap grid step, how the
//! overlay reacts to the host scene, and how the template browser lays out.
//! Missing file or missing fields fall back to defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_snap_step() -> i32 {
    5
}

fn default_library_columns() -> usize {
    3
}

fn default_library_spacing() -> i32 {
    10
}

fn default_watched_attributes() -> Vec<String> {
    vec!["ikfk".to_string(), "v".to_string()]
}

fn default_signature_node() -> String {
    "M_spine_fk_1_control".to_string()
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("vpick/templates")
}

fn default_user_layout() -> PathBuf {
    PathBuf::from("vpick/user_layout.xml")
}

/// Picker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Directory holding single-control template files
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    /// Per-project path of the user's saved layout
    #[serde(default = "default_user_layout")]
    pub user_layout: PathBuf,
    /// Grid step used when dragging with the snap modifier held
    #[serde(default = "default_snap_step")]
    pub snap_step: i32,
    /// Column count of the template browser grid
    #[serde(default = "default_library_columns")]
    pub library_columns: usize,
    /// Spacing between template browser cells
    #[serde(default = "default_library_spacing")]
    pub library_spacing: i32,
    /// Host attributes whose changes re-evaluate control enablement
    #[serde(default = "default_watched_attributes")]
    pub watched_attributes: Vec<String>,
    /// Node that must exist under a namespace for it to count as a rig
    #[serde(default = "default_signature_node")]
    pub signature_node: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            user_layout: default_user_layout(),
            snap_step: default_snap_step(),
            library_columns: default_library_columns(),
            library_spacing: default_library_spacing(),
            watched_attributes: default_watched_attributes(),
            signature_node: default_signature_node(),
        }
    }
}

impl PickerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            reason: e.to_string(),
        })
    }

    /// Load configuration, falling back to defaults when the file is absent
    /// or unreadable. A malformed file is reported and otherwise ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(
                        path = %path.as_ref().display(),
                        error = %e,
                        "falling back to default configuration"
                    );
                }
                Self::default()
            }
        }
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config {
            reason: e.to_string(),
        })?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
