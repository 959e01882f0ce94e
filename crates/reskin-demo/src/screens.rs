//! Simulated screens and the view-tree delegates that re-skin them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use reskin_core::color::Color;
use reskin_core::error::{Result, SkinError};
use reskin_core::resource::{Drawable, ResourceId, ScreenId, ThemeAttr};
use reskin_core::{
    Capabilities, DelegateFactory, ResourceResolver, Screen, ScreenKind, SkinDelegate, SkinManager,
};

/// One named view bound to a color resource.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub name: &'static str,
    pub color: ResourceId,
}

impl ViewSpec {
    pub fn new(name: &'static str, color: &str) -> Self {
        Self {
            name,
            color: ResourceId::from(color),
        }
    }
}

#[derive(Debug, Default)]
struct WindowState {
    status_bar: Option<Color>,
    background: Option<Drawable>,
}

/// A screen the demo drives through its lifecycle.
pub struct DemoScreen {
    id: ScreenId,
    name: &'static str,
    kind: ScreenKind,
    caps: Capabilities,
    attrs: HashMap<ThemeAttr, ResourceId>,
    layout: Vec<ViewSpec>,
    window: Mutex<WindowState>,
    inflater: Mutex<Option<Arc<dyn SkinDelegate>>>,
    self_applied: AtomicUsize,
}

impl DemoScreen {
    pub fn new(name: &'static str, kind: ScreenKind, caps: Capabilities) -> Self {
        Self {
            id: ScreenId::next(),
            name,
            kind,
            caps,
            attrs: HashMap::new(),
            layout: Vec::new(),
            window: Mutex::new(WindowState::default()),
            inflater: Mutex::new(None),
            self_applied: AtomicUsize::new(0),
        }
    }

    pub fn with_attr(mut self, attr: ThemeAttr, id: &str) -> Self {
        self.attrs.insert(attr, ResourceId::from(id));
        self
    }

    pub fn with_view(mut self, view: ViewSpec) -> Self {
        self.layout.push(view);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn layout(&self) -> &[ViewSpec] {
        &self.layout
    }

    pub fn status_bar(&self) -> Option<Color> {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status_bar
    }

    pub fn background(&self) -> Option<Drawable> {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .background
            .clone()
    }

    pub fn self_applied(&self) -> usize {
        self.self_applied.load(Ordering::Relaxed)
    }
}

impl Screen for DemoScreen {
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

    fn set_status_bar_color(&self, color: Color) {
        log::debug!("[{}] status bar -> {color}", self.name);
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status_bar = Some(color);
    }

    fn set_window_background(&self, drawable: Drawable) {
        log::debug!("[{}] window background -> {drawable:?}", self.name);
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .background = Some(drawable);
    }

    fn install_inflater_factory(&self, delegate: Arc<dyn SkinDelegate>) -> Result<()> {
        let mut slot = self.inflater.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(SkinError::FactoryAlreadySet(self.id));
        }
        *slot = Some(Arc::clone(&delegate));
        drop(slot);
        // Inflation runs every view through the interceptor.
        delegate.apply_skin();
        Ok(())
    }

    fn apply_skin(&self) {
        self.self_applied.fetch_add(1, Ordering::Relaxed);
        log::debug!("[{}] self-applied skin", self.name);
    }
}

/// Re-themes one screen's views from the manager's active skin.
pub struct ViewTree {
    screen: &'static str,
    layout: Vec<ViewSpec>,
    manager: Weak<SkinManager>,
    colors: Mutex<Vec<Option<Color>>>,
    applied: AtomicUsize,
}

impl ViewTree {
    /// Current color of every view, in layout order.
    pub fn colors(&self) -> Vec<(&'static str, Option<Color>)> {
        let colors = self.colors.lock().unwrap_or_else(PoisonError::into_inner);
        self.layout
            .iter()
            .zip(colors.iter())
            .map(|(view, color)| (view.name, *color))
            .collect()
    }

    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::Relaxed)
    }
}

impl SkinDelegate for ViewTree {
    fn apply_skin(&self) {
        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        let resources = manager.resources();
        let resolved: Vec<_> = self
            .layout
            .iter()
            .map(|view| resources.color(&view.color))
            .collect();
        log::debug!(
            "[{}] re-skinned {} view(s) from '{}'",
            self.screen,
            resolved.len(),
            resources.skin_name()
        );
        *self.colors.lock().unwrap_or_else(PoisonError::into_inner) = resolved;
        self.applied.fetch_add(1, Ordering::Relaxed);
    }
}

/// Builds a [`ViewTree`] per screen from the layouts registered up front.
///
/// Trees are owned by the coordinator and the screen's inflater; the
/// factory only keeps a `Weak` handle for reporting.
pub struct ViewTreeFactory {
    manager: Weak<SkinManager>,
    layouts: Mutex<HashMap<ScreenId, (&'static str, Vec<ViewSpec>)>>,
    trees: Mutex<HashMap<ScreenId, Weak<ViewTree>>>,
}

impl ViewTreeFactory {
    pub fn new(manager: &Arc<SkinManager>) -> Self {
        Self {
            manager: Arc::downgrade(manager),
            layouts: Mutex::new(HashMap::new()),
            trees: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, screen: &DemoScreen) {
        self.layouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(screen.id(), (screen.name(), screen.layout().to_vec()));
    }

    pub fn tree(&self, id: ScreenId) -> Option<Arc<ViewTree>> {
        self.trees
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .and_then(Weak::upgrade)
    }

    /// Number of view trees still alive.
    pub fn live_trees(&self) -> usize {
        let mut trees = self.trees.lock().unwrap_or_else(PoisonError::into_inner);
        trees.retain(|_, tree| tree.strong_count() > 0);
        trees.len()
    }
}

impl DelegateFactory for ViewTreeFactory {
    fn create(&self, screen: &dyn Screen) -> Arc<dyn SkinDelegate> {
        let (name, layout) = self
            .layouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&screen.id())
            .cloned()
            .unwrap_or(("app", Vec::new()));
        let tree = Arc::new(ViewTree {
            screen: name,
            colors: Mutex::new(vec![None; layout.len()]),
            layout,
            manager: Weak::clone(&self.manager),
            applied: AtomicUsize::new(0),
        });
        let mut trees = self.trees.lock().unwrap_or_else(PoisonError::into_inner);
        trees.retain(|_, tree| tree.strong_count() > 0);
        trees.insert(screen.id(), Arc::downgrade(&tree));
        drop(trees);
        log::trace!("Created view tree for [{name}]");
        tree
    }
}
