//! Shared test utilities for reskin-core tests.
//!
//! Provides a [`MockScreen`] that records every window mutation, a
//! [`RecordingFactory`] whose delegates count their `apply_skin` calls, and
//! a [`Harness`] wiring both into a live coordinator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use reskin_types::error::{Result, SkinError};
use reskin_types::{Color, Drawable, ResourceId, ScreenId, SkinFeatures, ThemeAttr};

use crate::app::Application;
use crate::lifecycle::SkinLifecycle;
use crate::manager::SkinManager;
use crate::screen::{Capabilities, DelegateFactory, Screen, ScreenKind, SkinDelegate};
use crate::skin::SkinRegistry;

/// A screen that records what the coordinator did to it.
pub struct MockScreen {
    id: ScreenId,
    kind: ScreenKind,
    caps: Capabilities,
    attrs: HashMap<ThemeAttr, ResourceId>,
    tint_supported: bool,
    pub status_bar: Mutex<Option<Color>>,
    pub background: Mutex<Option<Drawable>>,
    pub status_bar_writes: AtomicUsize,
    pub background_writes: AtomicUsize,
    pub self_applied: AtomicUsize,
    factory: Mutex<Option<Arc<dyn SkinDelegate>>>,
}

/// Builder for [`MockScreen`].
pub struct MockScreenBuilder {
    kind: ScreenKind,
    caps: Capabilities,
    attrs: HashMap<ThemeAttr, ResourceId>,
    tint_supported: bool,
    preinstalled_factory: bool,
}

impl MockScreen {
    pub fn window() -> MockScreenBuilder {
        MockScreenBuilder::new(ScreenKind::Window)
    }

    pub fn application() -> MockScreenBuilder {
        MockScreenBuilder::new(ScreenKind::Application)
    }

    pub fn status_bar(&self) -> Option<Color> {
        *self.status_bar.lock().unwrap()
    }

    pub fn background(&self) -> Option<Drawable> {
        self.background.lock().unwrap().clone()
    }

    pub fn self_applied(&self) -> usize {
        self.self_applied.load(Ordering::SeqCst)
    }

    pub fn status_bar_writes(&self) -> usize {
        self.status_bar_writes.load(Ordering::SeqCst)
    }

    pub fn has_factory(&self) -> bool {
        self.factory.lock().unwrap().is_some()
    }
}

impl MockScreenBuilder {
    fn new(kind: ScreenKind) -> Self {
        Self {
            kind,
            caps: Capabilities::NONE,
            attrs: HashMap::new(),
            tint_supported: true,
            preinstalled_factory: false,
        }
    }

    pub fn caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    pub fn attr(mut self, attr: ThemeAttr, id: &str) -> Self {
        self.attrs.insert(attr, ResourceId::from(id));
        self
    }

    /// Bind the attributes the built-in skins define.
    pub fn themed(self) -> Self {
        self.attr(ThemeAttr::StatusBarColor, "color/status_bar")
            .attr(ThemeAttr::ColorPrimaryDark, "color/primary_dark")
            .attr(ThemeAttr::WindowBackground, "drawable/window_bg")
    }

    pub fn no_tint(mut self) -> Self {
        self.tint_supported = false;
        self
    }

    /// Simulate an inflater that already carries a foreign interceptor.
    pub fn with_foreign_factory(mut self) -> Self {
        self.preinstalled_factory = true;
        self
    }

    pub fn build_mock(self) -> Arc<MockScreen> {
        let factory: Option<Arc<dyn SkinDelegate>> = if self.preinstalled_factory {
            Some(Arc::new(CountingDelegate::default()))
        } else {
            None
        };
        Arc::new(MockScreen {
            id: ScreenId::next(),
            kind: self.kind,
            caps: self.caps,
            attrs: self.attrs,
            tint_supported: self.tint_supported,
            status_bar: Mutex::new(None),
            background: Mutex::new(None),
            status_bar_writes: AtomicUsize::new(0),
            background_writes: AtomicUsize::new(0),
            self_applied: AtomicUsize::new(0),
            factory: Mutex::new(factory),
        })
    }

    pub fn build(self) -> Arc<dyn Screen> {
        self.build_mock()
    }
}

impl Screen for MockScreen {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn kind(&self) -> ScreenKind {
        self.kind
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn theme_attr(&self, attr: ThemeAttr) -> Option<ResourceId> {
        self.attrs.get(&attr).cloned()
    }

    fn supports_status_bar_tint(&self) -> bool {
        self.tint_supported
    }

    fn set_status_bar_color(&self, color: Color) {
        self.status_bar_writes.fetch_add(1, Ordering::SeqCst);
        *self.status_bar.lock().unwrap() = Some(color);
    }

    fn set_window_background(&self, drawable: Drawable) {
        self.background_writes.fetch_add(1, Ordering::SeqCst);
        *self.background.lock().unwrap() = Some(drawable);
    }

    fn install_inflater_factory(&self, delegate: Arc<dyn SkinDelegate>) -> Result<()> {
        let mut slot = self.factory.lock().unwrap();
        if slot.is_some() {
            return Err(SkinError::FactoryAlreadySet(self.id));
        }
        *slot = Some(delegate);
        Ok(())
    }

    fn apply_skin(&self) {
        self.self_applied.fetch_add(1, Ordering::SeqCst);
    }
}

/// Delegate that counts `apply_skin` calls.
#[derive(Default)]
pub struct CountingDelegate {
    applied: AtomicUsize,
}

impl CountingDelegate {
    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }
}

impl SkinDelegate for CountingDelegate {
    fn apply_skin(&self) {
        self.applied.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory that keeps a typed handle to every delegate it creates.
#[derive(Default)]
pub struct RecordingFactory {
    created: Mutex<Vec<(ScreenId, Arc<CountingDelegate>)>>,
}

impl RecordingFactory {
    /// Number of delegates created for `id`.
    pub fn created_for(&self, id: ScreenId) -> usize {
        self.created
            .lock()
            .unwrap()
            .iter()
            .filter(|(sid, _)| *sid == id)
            .count()
    }

    /// Total `apply_skin` calls across the delegates created for `id`.
    pub fn applied_for(&self, id: ScreenId) -> usize {
        self.created
            .lock()
            .unwrap()
            .iter()
            .filter(|(sid, _)| *sid == id)
            .map(|(_, d)| d.applied())
            .sum()
    }
}

impl DelegateFactory for RecordingFactory {
    fn create(&self, screen: &dyn Screen) -> Arc<dyn SkinDelegate> {
        let delegate = Arc::new(CountingDelegate::default());
        self.created
            .lock()
            .unwrap()
            .push((screen.id(), Arc::clone(&delegate)));
        delegate
    }
}

/// An application with a coordinator installed over the built-in skins.
pub struct Harness {
    pub app: Application,
    pub manager: Arc<SkinManager>,
    pub factory: Arc<RecordingFactory>,
    pub lifecycle: Arc<SkinLifecycle>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_context(MockScreen::application().build())
    }

    pub fn with_context(context: Arc<dyn Screen>) -> Self {
        let app = Application::new(context);
        let registry = SkinRegistry::new().unwrap();
        let manager = Arc::new(SkinManager::new(SkinFeatures::default(), registry));
        let factory = Arc::new(RecordingFactory::default());
        let lifecycle = SkinLifecycle::install(&app, manager.clone(), factory.clone());
        Self {
            app,
            manager,
            factory,
            lifecycle,
        }
    }
}
