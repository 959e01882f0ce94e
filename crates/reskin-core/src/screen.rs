//! Screens, their declared skin capabilities, and per-screen delegates.
//!
//! A [`Screen`] is anything with a skinning lifecycle: a navigable UI unit
//! with its own window, or the application-level context that owns views
//! created outside any screen. The coordinator never inspects concrete
//! types; a screen states what it supports through [`Capabilities`].

use std::sync::Arc;

use reskin_types::error::Result;
use reskin_types::{Color, Drawable, ResourceId, ScreenId, SkinFeatures, ThemeAttr};

/// What kind of context a [`Screen`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// A navigable screen with its own window (status bar, background).
    Window,
    /// The application-level context. Has no window of its own.
    Application,
}

impl ScreenKind {
    /// Whether this context owns a window that can be re-themed.
    pub fn is_screen_like(self) -> bool {
        matches!(self, Self::Window)
    }
}

/// Skin capabilities a screen type declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Opt in to skinning even when "skin all screens" is off.
    pub skinnable: bool,
    /// The screen implements [`Screen::apply_skin`] and wants it called on
    /// every refresh. Implies opting in to skinning.
    pub self_applies: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        skinnable: false,
        self_applies: false,
    };

    pub const SKINNABLE: Self = Self {
        skinnable: true,
        self_applies: false,
    };

    pub const SELF_APPLIES: Self = Self {
        skinnable: false,
        self_applies: true,
    };

    /// Union of two capability sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            skinnable: self.skinnable || other.skinnable,
            self_applies: self.self_applies || other.self_applies,
        }
    }
}

/// Whether a screen with `caps` takes part in skinning.
///
/// Any one condition suffices: the global "skin all screens" toggle, the
/// skinnable marker, or the self-apply hook.
pub fn is_skin_enabled(features: &SkinFeatures, caps: Capabilities) -> bool {
    features.skin_all_screens || caps.skinnable || caps.self_applies
}

/// A context with a skinning lifecycle.
///
/// Implementations use interior mutability: every method takes `&self`
/// because screens are shared between the host app and the coordinator.
pub trait Screen: Send + Sync {
    /// Stable identity, unique for the lifetime of the process.
    fn id(&self) -> ScreenId;

    fn kind(&self) -> ScreenKind;

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Resource the current theme binds to `attr`, if any.
    fn theme_attr(&self, _attr: ThemeAttr) -> Option<ResourceId> {
        None
    }

    /// Whether the platform can tint this screen's status bar.
    fn supports_status_bar_tint(&self) -> bool {
        true
    }

    fn set_status_bar_color(&self, _color: Color) {}

    fn set_window_background(&self, _drawable: Drawable) {}

    /// Install `delegate` as the view-inflation interceptor for this
    /// screen's inflater. Fails with
    /// [`SkinError::FactoryAlreadySet`](reskin_types::SkinError::FactoryAlreadySet)
    /// when an interceptor is already in place.
    fn install_inflater_factory(&self, delegate: Arc<dyn SkinDelegate>) -> Result<()>;

    /// Explicit re-skin hook, called when [`Capabilities::self_applies`] is set.
    fn apply_skin(&self) {}
}

/// Per-screen helper that re-themes an already-inflated view tree.
pub trait SkinDelegate: Send + Sync {
    fn apply_skin(&self);
}

/// Creates the delegate for a screen on first use.
pub trait DelegateFactory: Send + Sync {
    fn create(&self, screen: &dyn Screen) -> Arc<dyn SkinDelegate>;
}

impl<F> DelegateFactory for F
where
    F: Fn(&dyn Screen) -> Arc<dyn SkinDelegate> + Send + Sync,
{
    fn create(&self, screen: &dyn Screen) -> Arc<dyn SkinDelegate> {
        self(screen)
    }
}
