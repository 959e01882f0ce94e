//! Skin definitions, the skin registry, and resource resolution.
//!
//! A skin is a TOML file with two tables:
//!
//! ```toml
//! [colors]
//! "color/primary_dark" = "#101418"
//!
//! [drawables]
//! "drawable/window_bg" = "#121212"      # flat color
//! "drawable/header" = "header_night.png" # image asset
//! ```
//!
//! The default skin is always present under the empty name. Named skins
//! override any subset of its resources; [`SkinResources`] resolves an id
//! against the active skin first and the default skin second.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use reskin_types::error::{Result, SkinError};
use reskin_types::{Color, Drawable, ResourceId, parse_hex_color};

/// Name under which the default skin is registered.
pub const DEFAULT_SKIN: &str = "";

const DEFAULT_TOML: &str = include_str!("../skins/default.toml");
const NIGHT_TOML: &str = include_str!("../skins/night.toml");
const OCEAN_TOML: &str = include_str!("../skins/ocean.toml");

/// Resolves themed resource ids to concrete values for the active skin.
pub trait ResourceResolver {
    fn color(&self, id: &ResourceId) -> Option<Color>;

    fn drawable(&self, id: &ResourceId) -> Option<Drawable>;
}

#[derive(Debug, Deserialize)]
struct RawSkin {
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default)]
    drawables: BTreeMap<String, String>,
}

/// One parsed skin.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinDef {
    pub name: String,
    colors: BTreeMap<ResourceId, Color>,
    drawables: BTreeMap<ResourceId, Drawable>,
}

impl SkinDef {
    /// Parse a skin from TOML. Color values must be `#RRGGBB[AA]`.
    pub fn from_toml(name: &str, text: &str) -> Result<Self> {
        let raw: RawSkin = toml::from_str(text)?;
        let colors = raw
            .colors
            .into_iter()
            .map(|(key, value)| match parse_hex_color(&value) {
                Some(c) => Ok((ResourceId::new(key), c)),
                None => Err(SkinError::Config(format!(
                    "skin '{name}': invalid color '{value}' for '{key}'"
                ))),
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        let drawables = raw
            .drawables
            .into_iter()
            .map(|(key, value)| (ResourceId::new(key), Drawable::from_value(&value)))
            .collect();
        Ok(Self {
            name: name.to_string(),
            colors,
            drawables,
        })
    }

    /// Load `<dir>/<name>.toml`-style files; the name is the file stem.
    pub fn from_file(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| SkinError::Config(format!("bad skin path: {}", path.display())))?;
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&name, &text)
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SKIN
    }

    /// Color defined by this skin alone.
    pub fn color(&self, id: &ResourceId) -> Option<Color> {
        self.colors.get(id).copied()
    }

    /// Drawable defined by this skin alone. A color resource doubles as a
    /// flat drawable.
    pub fn drawable(&self, id: &ResourceId) -> Option<Drawable> {
        self.drawables
            .get(id)
            .cloned()
            .or_else(|| self.color(id).map(Drawable::Color))
    }

    pub fn resource_count(&self) -> usize {
        self.colors.len() + self.drawables.len()
    }
}

/// All known skins: the default skin plus any number of named skins.
#[derive(Debug, Clone)]
pub struct SkinRegistry {
    default: Arc<SkinDef>,
    named: BTreeMap<String, Arc<SkinDef>>,
}

impl SkinRegistry {
    /// Registry with the built-in default, `night`, and `ocean` skins.
    pub fn new() -> Result<Self> {
        let mut registry = Self::with_default(SkinDef::from_toml(DEFAULT_SKIN, DEFAULT_TOML)?);
        registry.insert(SkinDef::from_toml("night", NIGHT_TOML)?);
        registry.insert(SkinDef::from_toml("ocean", OCEAN_TOML)?);
        Ok(registry)
    }

    /// Registry containing only `default`, re-registered under the empty name.
    pub fn with_default(mut default: SkinDef) -> Self {
        default.name = DEFAULT_SKIN.to_string();
        Self {
            default: Arc::new(default),
            named: BTreeMap::new(),
        }
    }

    /// Add or replace a named skin. A skin with the empty name replaces
    /// the default.
    pub fn insert(&mut self, skin: SkinDef) {
        if skin.is_default() {
            self.default = Arc::new(skin);
        } else {
            self.named.insert(skin.name.clone(), Arc::new(skin));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<SkinDef>> {
        if name == DEFAULT_SKIN {
            return Some(Arc::clone(&self.default));
        }
        self.named.get(name).map(Arc::clone)
    }

    pub fn default_skin(&self) -> Arc<SkinDef> {
        Arc::clone(&self.default)
    }

    /// Named skins, sorted. The default skin is not listed.
    pub fn names(&self) -> Vec<&str> {
        self.named.keys().map(String::as_str).collect()
    }

    /// Register every `*.toml` file in `dir`. Files that fail to parse are
    /// skipped with a warning. Returns the number of skins registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match SkinDef::from_file(&path) {
                Ok(skin) => {
                    log::debug!("Registered skin '{}' from {}", skin.name, path.display());
                    self.insert(skin);
                    loaded += 1;
                },
                Err(e) => log::warn!("Skipping skin {}: {e}", path.display()),
            }
        }
        Ok(loaded)
    }
}

/// Resolver over the active skin with the default skin as fallback.
#[derive(Debug, Clone)]
pub struct SkinResources {
    active: Arc<SkinDef>,
    default: Arc<SkinDef>,
}

impl SkinResources {
    pub fn new(active: Arc<SkinDef>, default: Arc<SkinDef>) -> Self {
        Self { active, default }
    }

    pub fn skin_name(&self) -> &str {
        &self.active.name
    }
}

impl ResourceResolver for SkinResources {
    fn color(&self, id: &ResourceId) -> Option<Color> {
        self.active.color(id).or_else(|| self.default.color(id))
    }

    fn drawable(&self, id: &ResourceId) -> Option<Drawable> {
        self.active.drawable(id).or_else(|| self.default.drawable(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::from(s)
    }

    #[test]
    fn builtins_load() {
        let registry = SkinRegistry::new().unwrap();
        assert_eq!(registry.names(), vec!["night", "ocean"]);
        assert!(registry.get(DEFAULT_SKIN).unwrap().is_default());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn parse_colors_and_drawables() {
        let skin = SkinDef::from_toml(
            "t",
            r##"
[colors]
"color/a" = "#FF0000"
[drawables]
"drawable/bg" = "#00FF0080"
"drawable/img" = "waves.png"
"##,
        )
        .unwrap();
        assert_eq!(skin.color(&id("color/a")), Some(Color::rgb(255, 0, 0)));
        assert_eq!(
            skin.drawable(&id("drawable/bg")),
            Some(Drawable::Color(Color::rgba(0, 255, 0, 128)))
        );
        assert_eq!(
            skin.drawable(&id("drawable/img")),
            Some(Drawable::Image("waves.png".into()))
        );
        assert_eq!(skin.resource_count(), 3);
    }

    #[test]
    fn color_doubles_as_drawable() {
        let skin = SkinDef::from_toml("t", "[colors]\n\"color/bg\" = \"#101010\"\n").unwrap();
        assert_eq!(
            skin.drawable(&id("color/bg")),
            Some(Drawable::Color(Color::rgb(16, 16, 16)))
        );
    }

    #[test]
    fn invalid_color_names_key() {
        let err = SkinDef::from_toml("bad", "[colors]\n\"color/x\" = \"red\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("color/x"));
        assert!(msg.contains("bad"));
    }

    #[test]
    fn empty_skin_is_valid() {
        let skin = SkinDef::from_toml("empty", "").unwrap();
        assert_eq!(skin.resource_count(), 0);
    }

    #[test]
    fn active_skin_shadows_default() {
        let registry = SkinRegistry::new().unwrap();
        let res = SkinResources::new(
            registry.get("ocean").unwrap(),
            registry.default_skin(),
        );
        assert_eq!(
            res.color(&id("color/primary_dark")),
            Some(Color::rgb(0x01, 0x57, 0x9B))
        );
        // Ocean leaves text colors to the default skin.
        assert_eq!(res.color(&id("color/text")), Some(Color::rgb(0x21, 0x21, 0x21)));
        assert_eq!(
            res.drawable(&id("drawable/window_bg")),
            Some(Drawable::Image("ocean_waves.png".into()))
        );
        assert_eq!(res.color(&id("color/unknown")), None);
        assert_eq!(res.skin_name(), "ocean");
    }

    #[test]
    fn insert_empty_name_replaces_default() {
        let mut registry = SkinRegistry::new().unwrap();
        registry.insert(SkinDef::from_toml(DEFAULT_SKIN, "").unwrap());
        assert_eq!(registry.default_skin().resource_count(), 0);
        assert_eq!(registry.names().len(), 2);
    }

    #[test]
    fn load_dir_registers_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("forest.toml"),
            "[colors]\n\"color/primary\" = \"#2E7D32\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[colors\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = SkinRegistry::new().unwrap();
        let loaded = registry.load_dir(dir.path()).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(registry.names(), vec!["forest", "night", "ocean"]);
    }

    #[test]
    fn load_dir_missing_is_error() {
        let mut registry = SkinRegistry::new().unwrap();
        assert!(registry.load_dir(Path::new("/nonexistent/skins")).is_err());
    }
}
