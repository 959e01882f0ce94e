//! reskin demo entry point.
//!
//! Builds an application with three screens (main, settings, about), drives
//! them through their lifecycle, and switches skin while `main` sits in the
//! background so its refresh is deferred until it resumes. The chosen skin
//! and the night-mode switch persist in a TOML preferences file.

mod cli;
mod prefs;
mod report;
mod screens;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Args, Command};
use prefs::Preferences;
use report::Report;
use reskin_core::config::SkinConfig;
use reskin_core::resource::ThemeAttr;
use reskin_core::{
    Application, Capabilities, DEFAULT_SKIN, LifecycleEvent, Screen, ScreenKind, SkinLifecycle,
    SkinManager,
};
use screens::{DemoScreen, ViewSpec, ViewTreeFactory};

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &args.config {
        Some(path) => SkinConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SkinConfig::default(),
    };
    let manager = Arc::new(SkinManager::from_config(&config)?);
    let mut prefs = Preferences::load(&args.prefs)?;
    prefs.restore(&manager)?;

    if args.command == Command::List {
        let report = Report::skins_only(&manager, &prefs);
        emit(&report, args.json)?;
        return Ok(());
    }

    let stage = Stage::new(&manager);
    stage.send_main_to_background();

    match &args.command {
        Command::Load { name } => {
            prefs.load_skin(&manager, name.as_deref().unwrap_or(DEFAULT_SKIN))?;
        },
        Command::Night => prefs.toggle_night_mode(&manager)?,
        Command::List => {},
    }
    log::info!(
        "[main] in background, update pending: {}",
        stage.lifecycle.is_pending(stage.main.id())
    );

    stage.return_to_main();
    emit(&stage.report(&prefs), args.json)?;

    prefs.save(&args.prefs)?;
    log::debug!("{:?}", stage.lifecycle);
    Ok(())
}

/// The application, its coordinator and the three demo screens.
struct Stage {
    app: Application,
    factory: Arc<ViewTreeFactory>,
    lifecycle: Arc<SkinLifecycle>,
    main: Arc<DemoScreen>,
    settings: Arc<DemoScreen>,
    about: Arc<DemoScreen>,
}

impl Stage {
    fn new(manager: &Arc<SkinManager>) -> Self {
        let factory = Arc::new(ViewTreeFactory::new(manager));
        let context = DemoScreen::new("app", ScreenKind::Application, Capabilities::NONE);
        let app = Application::new(Arc::new(context));
        let lifecycle = SkinLifecycle::install(
            &app,
            Arc::clone(manager),
            Arc::<ViewTreeFactory>::clone(&factory),
        );
        Self {
            main: stage(&factory, main_screen()),
            settings: stage(&factory, settings_screen()),
            about: stage(&factory, about_screen()),
            app,
            factory,
            lifecycle,
        }
    }

    fn as_dyn(screen: &Arc<DemoScreen>) -> Arc<dyn Screen> {
        Arc::<DemoScreen>::clone(screen)
    }

    /// Open main, then cover it with settings.
    fn send_main_to_background(&self) {
        let main = Self::as_dyn(&self.main);
        self.app.open(&main);
        self.app.dispatch(LifecycleEvent::Paused, &main);
        self.app.dispatch(LifecycleEvent::Stopped, &main);
        self.app.open(&Self::as_dyn(&self.settings));
    }

    /// Close settings, bring main back, then open about.
    fn return_to_main(&self) {
        let main = Self::as_dyn(&self.main);
        self.app.close(&Self::as_dyn(&self.settings));
        self.app.dispatch(LifecycleEvent::Started, &main);
        self.app.dispatch(LifecycleEvent::Resumed, &main);
        self.app.open(&Self::as_dyn(&self.about));
    }

    fn report(&self, prefs: &Preferences) -> Report {
        Report::collect(
            &self.lifecycle,
            &self.factory,
            prefs,
            &[&*self.main, &*self.settings, &*self.about],
        )
    }
}

fn emit(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn stage(factory: &ViewTreeFactory, screen: DemoScreen) -> Arc<DemoScreen> {
    factory.register(&screen);
    Arc::new(screen)
}

fn main_screen() -> DemoScreen {
    DemoScreen::new("main", ScreenKind::Window, Capabilities::SKINNABLE)
        .with_attr(ThemeAttr::StatusBarColor, "color/status_bar")
        .with_attr(ThemeAttr::ColorPrimaryDark, "color/primary_dark")
        .with_attr(ThemeAttr::WindowBackground, "drawable/window_bg")
        .with_view(ViewSpec::new("toolbar", "color/primary"))
        .with_view(ViewSpec::new("tabs", "color/accent"))
        .with_view(ViewSpec::new("title", "color/text"))
        .with_view(ViewSpec::new("subtitle", "color/text_dim"))
}

fn settings_screen() -> DemoScreen {
    DemoScreen::new(
        "settings",
        ScreenKind::Window,
        Capabilities::SKINNABLE.union(Capabilities::SELF_APPLIES),
    )
    .with_attr(ThemeAttr::ColorPrimaryDark, "color/primary_dark")
    .with_attr(ThemeAttr::WindowBackground, "drawable/window_bg")
    .with_view(ViewSpec::new("toolbar", "color/primary"))
    .with_view(ViewSpec::new("switch", "color/accent"))
}

/// No skin capability: only skinned when `skin_all_screens` is on.
fn about_screen() -> DemoScreen {
    DemoScreen::new("about", ScreenKind::Window, Capabilities::NONE)
        .with_attr(ThemeAttr::ColorPrimaryDark, "color/primary_dark")
        .with_view(ViewSpec::new("body", "color/text"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reskin_core::SkinRegistry;
    use reskin_core::color::Color;
    use reskin_core::config::SkinFeatures;

    fn manager(features: SkinFeatures) -> Arc<SkinManager> {
        Arc::new(SkinManager::new(features, SkinRegistry::new().unwrap()))
    }

    #[test]
    fn background_main_catches_up_on_resume() {
        let manager = manager(SkinFeatures::default());
        let stage = Stage::new(&manager);
        stage.send_main_to_background();
        let before = stage.factory.tree(stage.main.id()).unwrap().applied();

        manager.load_skin("night").unwrap();
        assert!(stage.lifecycle.is_pending(stage.main.id()));
        assert!(!stage.lifecycle.is_pending(stage.settings.id()));
        // Settings is in front: re-tinted from night's primary dark at once.
        assert_eq!(stage.settings.status_bar(), Some(Color::rgb(0x10, 0x14, 0x18)));
        assert_eq!(stage.main.status_bar(), Some(Color::rgb(0x1E, 0x3C, 0x78)));

        stage.return_to_main();
        assert!(!stage.lifecycle.is_pending(stage.main.id()));
        assert_eq!(stage.main.status_bar(), Some(Color::BLACK));
        assert_eq!(
            stage.factory.tree(stage.main.id()).unwrap().applied(),
            before + 1
        );
    }

    #[test]
    fn foreground_settings_refreshes_immediately() {
        let manager = manager(SkinFeatures::default());
        let stage = Stage::new(&manager);
        stage.send_main_to_background();
        let applied = stage.settings.self_applied();

        manager.load_skin("ocean").unwrap();
        assert_eq!(stage.settings.self_applied(), applied + 1);
    }

    #[test]
    fn report_reflects_final_state() {
        let manager = manager(SkinFeatures {
            skin_all_screens: false,
            ..SkinFeatures::default()
        });
        let stage = Stage::new(&manager);
        stage.send_main_to_background();
        manager.load_skin("night").unwrap();
        stage.return_to_main();

        let report = stage.report(&Preferences::default());
        let names: Vec<_> = report.screens.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["main", "settings", "about"]);
        assert!(report.screens.iter().all(|s| !s.pending));
        assert!(report.screens[0].skinned);
        assert!(!report.screens[2].skinned);
        assert_eq!(report.screens[2].refreshes, 0);
    }
}
