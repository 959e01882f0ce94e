//! reskin core.
//!
//! Runtime skin switching for screen-based applications: a registry of
//! skins and the manager that switches between them, window re-theming,
//! and the lifecycle coordinator that keeps every live screen in step with
//! the active skin. Background screens are refreshed lazily, on resume.
//!
//! Platform specifics (how a screen tints its status bar, how view
//! inflation is intercepted) stay behind the [`screen::Screen`] and
//! [`screen::SkinDelegate`] traits.

// Re-exports from reskin-types (foundation types).
pub use reskin_types::color;
pub use reskin_types::config;
pub use reskin_types::error;
pub use reskin_types::resource;

pub use reskin_observe as observe;

pub mod app;
pub mod lifecycle;
pub mod manager;
pub mod observer;
pub mod registry;
pub mod screen;
pub mod skin;
pub mod window;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::{Application, LifecycleCallbacks, LifecycleEvent};
pub use lifecycle::SkinLifecycle;
pub use manager::{SkinChange, SkinChannel, SkinManager};
pub use observer::LazySkinObserver;
pub use screen::{Capabilities, DelegateFactory, Screen, ScreenKind, SkinDelegate};
pub use skin::{DEFAULT_SKIN, ResourceResolver, SkinDef, SkinRegistry, SkinResources};
