//! Centralized picking/brush options with TOML preset support.
//!
//! Every tweakable setting of the picking engine (symmetry, selection mode,
//! brush footprint, camera projection, stencil choice) is consolidated here.
//! Options serialize to/from TOML so tool presets can be stored on disk.

mod alpha;
mod brush;
mod camera;
mod picking;

use std::path::Path;

pub use alpha::AlphaOptions;
pub use brush::BrushOptions;
pub use camera::{CameraOptions, ProjectionKind};
pub use picking::PickingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PickError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[brush]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Picking behavior toggles.
    pub picking: PickingOptions,
    /// Brush footprint parameters.
    pub brush: BrushOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Stencil selection.
    pub alpha: AlphaOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`PickError::Io`] when the file cannot be read,
    /// [`PickError::OptionsParse`] when it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, PickError> {
        let content = std::fs::read_to_string(path).map_err(PickError::Io)?;
        let options = toml::from_str(&content).map_err(|e| {
            log::error!("Failed to parse options {}: {e}", path.display());
            PickError::OptionsParse(e.to_string())
        })?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`PickError::OptionsParse`] if serialization fails,
    /// [`PickError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PickError::Io)?;
        }
        std::fs::write(path, content).map_err(PickError::Io)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
