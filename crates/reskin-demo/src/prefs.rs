//! Persisted user preferences: the active skin and the night-mode switch.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use reskin_core::SkinManager;

/// Skin loaded when night mode is switched on.
pub const NIGHT_SKIN: &str = "night";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Skin to restore at startup. Empty means the default skin.
    pub skin: String,
    /// Skin that was active before night mode was switched on.
    pub day_skin: String,
    pub night_mode: bool,
}

impl Preferences {
    /// Read preferences from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading preferences {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing preferences {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("writing preferences {}", path.display()))?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Re-apply the remembered skin. A skin that no longer exists falls
    /// back to the default.
    pub fn restore(&mut self, manager: &SkinManager) -> Result<()> {
        if let Err(e) = manager.load_skin(&self.skin) {
            log::warn!("Cannot restore saved skin: {e}; using default");
            manager.restore_default_skin()?;
            self.skin.clear();
        }
        Ok(())
    }

    /// Load `name` as the day skin, leaving night mode.
    pub fn load_skin(&mut self, manager: &SkinManager, name: &str) -> Result<()> {
        manager.load_skin(name)?;
        self.skin = manager.current_skin_name();
        self.night_mode = false;
        Ok(())
    }

    /// Switch night mode on (remembering the current skin) or off
    /// (restoring the remembered skin).
    pub fn toggle_night_mode(&mut self, manager: &SkinManager) -> Result<()> {
        if self.night_mode {
            manager
                .load_skin(&self.day_skin)
                .with_context(|| format!("restoring day skin '{}'", self.day_skin))?;
        } else {
            self.day_skin = manager.current_skin_name();
            manager.load_skin(NIGHT_SKIN)?;
        }
        self.night_mode = !self.night_mode;
        self.skin = manager.current_skin_name();
        log::info!("Night mode {}", if self.night_mode { "on" } else { "off" });
        Ok(())
    }
}
