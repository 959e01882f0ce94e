//! The skin manager: owner of the skin channel and of the active skin.
//!
//! The manager is the only caller of `notify` on its channel. Every
//! successful [`SkinManager::load_skin`] fans a [`SkinChange`] out to the
//! subscribed observers, most recently subscribed first.

use std::sync::{Arc, PoisonError, RwLock};

use reskin_observe::{ObserverRef, SkinObservable, SkinObserver};
use reskin_types::error::{Result, SkinError};
use reskin_types::{SkinConfig, SkinFeatures};

use crate::skin::{DEFAULT_SKIN, SkinDef, SkinRegistry, SkinResources};

/// Payload delivered with every skin change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinChange {
    /// Skin active before the change (empty for the default skin).
    pub previous: String,
    /// Skin active after the change.
    pub current: String,
}

/// Channel type the manager notifies on.
pub type SkinChannel = SkinObservable<SkinChange>;

/// Owns the skin registry, the active skin, the feature toggles, and the
/// skin change channel.
#[derive(Debug)]
pub struct SkinManager {
    channel: SkinChannel,
    registry: SkinRegistry,
    current: RwLock<Arc<SkinDef>>,
    features: RwLock<SkinFeatures>,
}

impl SkinManager {
    /// Create a manager starting on the default skin.
    pub fn new(features: SkinFeatures, registry: SkinRegistry) -> Self {
        let current = registry.default_skin();
        Self {
            channel: SkinObservable::new(),
            registry,
            current: RwLock::new(current),
            features: RwLock::new(features),
        }
    }

    /// Build the built-in registry, add skins from `config.skins_dir`, and
    /// create a manager from the result.
    pub fn from_config(config: &SkinConfig) -> Result<Self> {
        let mut registry = SkinRegistry::new()?;
        if let Some(dir) = &config.skins_dir {
            let loaded = registry.load_dir(dir)?;
            log::info!("Loaded {loaded} skin(s) from {}", dir.display());
        }
        Ok(Self::new(config.features, registry))
    }

    /// Switch to skin `name` and notify observers. The empty name restores
    /// the default skin. Unknown names leave the current skin untouched.
    pub fn load_skin(&self, name: &str) -> Result<()> {
        let next = self
            .registry
            .get(name)
            .ok_or_else(|| SkinError::SkinNotFound(name.to_string()))?;
        let change = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let previous = std::mem::replace(&mut *current, next);
            SkinChange {
                previous: previous.name.clone(),
                current: current.name.clone(),
            }
        };
        log::info!(
            "Skin changed: '{}' -> '{}'",
            display_name(&change.previous),
            display_name(&change.current)
        );
        self.channel.notify(Some(&change));
        Ok(())
    }

    pub fn restore_default_skin(&self) -> Result<()> {
        self.load_skin(DEFAULT_SKIN)
    }

    /// Name of the active skin; empty for the default skin.
    pub fn current_skin_name(&self) -> String {
        self.current_skin().name.clone()
    }

    pub fn current_skin(&self) -> Arc<SkinDef> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Resolver for the active skin, falling back to the default skin.
    pub fn resources(&self) -> SkinResources {
        SkinResources::new(self.current_skin(), self.registry.default_skin())
    }

    pub fn registry(&self) -> &SkinRegistry {
        &self.registry
    }

    pub fn features(&self) -> SkinFeatures {
        *self.features.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_features(&self, f: impl FnOnce(&mut SkinFeatures)) {
        f(&mut self.features.write().unwrap_or_else(PoisonError::into_inner));
    }

    pub fn set_skin_all_screens(&self, enabled: bool) {
        self.update_features(|f| f.skin_all_screens = enabled);
    }

    pub fn set_skin_status_bar(&self, enabled: bool) {
        self.update_features(|f| f.skin_status_bar = enabled);
    }

    pub fn set_skin_window_background(&self, enabled: bool) {
        self.update_features(|f| f.skin_window_background = enabled);
    }

    pub fn add_observer(&self, observer: ObserverRef<SkinChange>) -> bool {
        self.channel.subscribe(observer)
    }

    pub fn delete_observer(&self, observer: &dyn SkinObserver<SkinChange>) -> bool {
        self.channel.unsubscribe(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.channel.count()
    }
}

fn display_name(name: &str) -> &str {
    if name == DEFAULT_SKIN { "default" } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use reskin_types::{Color, ResourceId};

    use crate::skin::ResourceResolver;

    fn manager() -> SkinManager {
        SkinManager::new(SkinFeatures::default(), SkinRegistry::new().unwrap())
    }

    #[derive(Default)]
    struct Changes(Mutex<Vec<SkinChange>>);

    impl SkinObserver<SkinChange> for Changes {
        fn update_skin(&self, _o: &SkinChannel, payload: Option<&SkinChange>) {
            if let Some(change) = payload {
                self.0.lock().unwrap().push(change.clone());
            }
        }
    }

    #[test]
    fn starts_on_default() {
        let m = manager();
        assert_eq!(m.current_skin_name(), "");
        assert!(m.current_skin().is_default());
    }

    #[test]
    fn load_skin_notifies_with_change() {
        let m = manager();
        let changes = Arc::new(Changes::default());
        m.add_observer(changes.clone());
        m.load_skin("night").unwrap();
        m.restore_default_skin().unwrap();
        let seen = changes.0.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                SkinChange {
                    previous: String::new(),
                    current: "night".into()
                },
                SkinChange {
                    previous: "night".into(),
                    current: String::new()
                },
            ]
        );
    }

    #[test]
    fn unknown_skin_keeps_current_and_stays_silent() {
        let m = manager();
        let changes = Arc::new(Changes::default());
        m.add_observer(changes.clone());
        m.load_skin("ocean").unwrap();
        let err = m.load_skin("missing").unwrap_err();
        assert!(matches!(err, SkinError::SkinNotFound(ref n) if n == "missing"));
        assert_eq!(m.current_skin_name(), "ocean");
        assert_eq!(changes.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn reloading_same_skin_still_notifies() {
        let m = manager();
        let changes = Arc::new(Changes::default());
        m.add_observer(changes.clone());
        m.load_skin("night").unwrap();
        m.load_skin("night").unwrap();
        assert_eq!(changes.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn resources_follow_active_skin() {
        let m = manager();
        let id = ResourceId::from("color/status_bar");
        assert_eq!(m.resources().color(&id), Some(Color::rgb(0x1E, 0x3C, 0x78)));
        m.load_skin("night").unwrap();
        assert_eq!(m.resources().color(&id), Some(Color::BLACK));
    }

    #[test]
    fn feature_setters() {
        let m = manager();
        m.set_skin_all_screens(false);
        m.set_skin_status_bar(false);
        m.set_skin_window_background(false);
        let f = m.features();
        assert!(!f.skin_all_screens && !f.skin_status_bar && !f.skin_window_background);
    }

    #[test]
    fn observer_pass_throughs() {
        let m = manager();
        let changes = Arc::new(Changes::default());
        assert!(m.add_observer(changes.clone()));
        assert!(!m.add_observer(changes.clone()));
        assert_eq!(m.observer_count(), 1);
        assert!(m.delete_observer(&*changes));
        assert_eq!(m.observer_count(), 0);
    }

    #[test]
    fn from_config_loads_skins_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("forest.toml"),
            "[colors]\n\"color/primary\" = \"#2E7D32\"\n",
        )
        .unwrap();
        let config = SkinConfig {
            skins_dir: Some(dir.path().to_path_buf()),
            ..SkinConfig::default()
        };
        let m = SkinManager::from_config(&config).unwrap();
        m.load_skin("forest").unwrap();
        assert_eq!(
            m.resources().color(&ResourceId::from("color/primary")),
            Some(Color::rgb(0x2E, 0x7D, 0x32))
        );
    }
}
