//! Resource identifiers, theme attributes, and drawables.
//!
//! A screen's theme maps a small set of [`ThemeAttr`]s to [`ResourceId`]s.
//! The active skin then resolves each id to a concrete color or drawable.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;

/// Stable identity of a screen (or of the application context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

impl ScreenId {
    /// Allocate a process-unique id. Recreated screens get fresh ids.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name of a themed resource, e.g. `color/primary_dark`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Theme attributes the skinning layer re-applies at the window level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeAttr {
    /// Explicit status bar color.
    StatusBarColor,
    /// Dark variant of the primary color; status bar fallback.
    ColorPrimaryDark,
    /// Window background drawable.
    WindowBackground,
}

impl ThemeAttr {
    pub fn name(self) -> &'static str {
        match self {
            Self::StatusBarColor => "statusBarColor",
            Self::ColorPrimaryDark => "colorPrimaryDark",
            Self::WindowBackground => "windowBackground",
        }
    }
}

/// Something a window can paint as its background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawable {
    /// Flat color fill.
    Color(Color),
    /// Named image asset supplied by the skin.
    Image(String),
}

impl Drawable {
    /// Interpret a skin value: hex strings become colors, anything else an image name.
    pub fn from_value(value: &str) -> Self {
        match crate::color::parse_hex_color(value) {
            Some(c) => Self::Color(c),
            None => Self::Image(value.to_string()),
        }
    }
}
