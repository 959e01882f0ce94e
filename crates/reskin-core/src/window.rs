//! Window-level re-theming: status bar color and window background.
//!
//! Both run when a skinned screen is created and on every forced refresh.
//! A theme attribute that is unbound, or bound to a resource the active
//! skin cannot resolve, means "not applicable" and leaves the window as is.

use reskin_types::{Color, Drawable, SkinFeatures, ThemeAttr};

use crate::screen::Screen;
use crate::skin::ResourceResolver;

/// Color the status bar should take: the explicit status bar color if it
/// resolves, else the primary-dark color, else `None`.
pub fn resolve_status_bar_color(
    screen: &dyn Screen,
    resources: &dyn ResourceResolver,
) -> Option<Color> {
    [ThemeAttr::StatusBarColor, ThemeAttr::ColorPrimaryDark]
        .into_iter()
        .find_map(|attr| {
            let id = screen.theme_attr(attr)?;
            let color = resources.color(&id);
            if color.is_none() {
                log::debug!(
                    "Screen {}: {} -> '{id}' is not a color in the active skin",
                    screen.id(),
                    attr.name()
                );
            }
            color
        })
}

/// Re-tint the status bar if the feature is on and the platform supports
/// it. Returns the applied color.
pub fn update_status_bar_color(
    screen: &dyn Screen,
    features: &SkinFeatures,
    resources: &dyn ResourceResolver,
) -> Option<Color> {
    if !features.skin_status_bar || !screen.supports_status_bar_tint() {
        return None;
    }
    let color = resolve_status_bar_color(screen, resources)?;
    screen.set_status_bar_color(color);
    Some(color)
}

/// Replace the window background if the feature is on and the theme's
/// background resolves. Returns the applied drawable.
pub fn update_window_background(
    screen: &dyn Screen,
    features: &SkinFeatures,
    resources: &dyn ResourceResolver,
) -> Option<Drawable> {
    if !features.skin_window_background {
        return None;
    }
    let attr = ThemeAttr::WindowBackground;
    let id = screen.theme_attr(attr)?;
    let Some(drawable) = resources.drawable(&id) else {
        log::debug!(
            "Screen {}: {} -> '{id}' does not resolve in the active skin",
            screen.id(),
            attr.name()
        );
        return None;
    };
    screen.set_window_background(drawable.clone());
    Some(drawable)
}
