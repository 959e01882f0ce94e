//! Skinning configuration loaded from TOML.
//!
//! ```toml
//! skin_all_screens = true
//! skin_status_bar = true
//! skin_window_background = false
//! skins_dir = "skins"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Global feature toggles consulted by the lifecycle coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkinFeatures {
    /// Skin every screen, not only those that declare a skin capability.
    pub skin_all_screens: bool,
    /// Re-tint the status bar on skin changes.
    pub skin_status_bar: bool,
    /// Replace the window background on skin changes.
    pub skin_window_background: bool,
}

impl Default for SkinFeatures {
    fn default() -> Self {
        Self {
            skin_all_screens: true,
            skin_status_bar: true,
            skin_window_background: true,
        }
    }
}

/// Top-level configuration for the skinning layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkinConfig {
    #[serde(flatten)]
    pub features: SkinFeatures,
    /// Directory scanned for `<name>.toml` skin files.
    #[serde(default)]
    pub skins_dir: Option<PathBuf>,
}

impl SkinConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded skin config from {}", path.display());
        Ok(config)
    }
}
