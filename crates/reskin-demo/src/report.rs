//! End-of-run summary, printed as text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use reskin_core::resource::Drawable;
use reskin_core::{Screen, SkinLifecycle, SkinManager};

use crate::prefs::Preferences;
use crate::screens::{DemoScreen, ViewTreeFactory};

#[derive(Debug, Serialize)]
pub struct Report {
    pub skin: String,
    pub night_mode: bool,
    pub skins: Vec<String>,
    pub screens: Vec<ScreenReport>,
}

#[derive(Debug, Serialize)]
pub struct ScreenReport {
    pub name: String,
    pub skinned: bool,
    pub pending: bool,
    pub status_bar: Option<String>,
    pub background: Option<String>,
    pub refreshes: usize,
    pub self_applied: usize,
    pub views: Vec<ViewReport>,
}

#[derive(Debug, Serialize)]
pub struct ViewReport {
    pub name: String,
    pub color: Option<String>,
}

fn skin_label(name: &str) -> String {
    if name.is_empty() {
        "default".to_string()
    } else {
        name.to_string()
    }
}

fn drawable_label(drawable: &Drawable) -> String {
    match drawable {
        Drawable::Color(c) => c.to_string(),
        Drawable::Image(name) => name.clone(),
    }
}

impl Report {
    pub fn skins_only(manager: &SkinManager, prefs: &Preferences) -> Self {
        Self {
            skin: skin_label(&manager.current_skin_name()),
            night_mode: prefs.night_mode,
            skins: manager
                .registry()
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            screens: Vec::new(),
        }
    }

    pub fn collect(
        lifecycle: &SkinLifecycle,
        factory: &ViewTreeFactory,
        prefs: &Preferences,
        screens: &[&DemoScreen],
    ) -> Self {
        let mut report = Self::skins_only(lifecycle.manager(), prefs);
        report.screens = screens
            .iter()
            .map(|screen| {
                let tree = factory.tree(screen.id());
                ScreenReport {
                    name: screen.name().to_string(),
                    skinned: lifecycle.is_skin_enabled(*screen),
                    pending: lifecycle.is_pending(screen.id()),
                    status_bar: screen.status_bar().map(|c| c.to_string()),
                    background: screen.background().as_ref().map(drawable_label),
                    refreshes: tree.as_ref().map_or(0, |t| t.applied()),
                    self_applied: screen.self_applied(),
                    views: tree
                        .map(|t| {
                            t.colors()
                                .into_iter()
                                .map(|(name, color)| ViewReport {
                                    name: name.to_string(),
                                    color: color.map(|c| c.to_string()),
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                }
            })
            .collect();
        report
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "skin: {} (night mode {})",
            self.skin,
            if self.night_mode { "on" } else { "off" }
        );
        let _ = writeln!(out, "available: default, {}", self.skins.join(", "));
        for screen in &self.screens {
            let _ = writeln!(
                out,
                "\n[{}]{}{}",
                screen.name,
                if screen.skinned { "" } else { " (not skinned)" },
                if screen.pending { " (update pending)" } else { "" }
            );
            let _ = writeln!(
                out,
                "  status bar: {}",
                screen.status_bar.as_deref().unwrap_or("-")
            );
            let _ = writeln!(
                out,
                "  background: {}",
                screen.background.as_deref().unwrap_or("-")
            );
            let _ = writeln!(out, "  refreshes:  {}", screen.refreshes);
            if screen.self_applied > 0 {
                let _ = writeln!(out, "  self-applied: {}", screen.self_applied);
            }
            for view in &screen.views {
                let _ = writeln!(
                    out,
                    "  {:<10}  {}",
                    view.name,
                    view.color.as_deref().unwrap_or("-")
                );
            }
        }
        out
    }
}
