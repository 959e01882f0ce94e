//! Screen lifecycle coordinator.
//!
//! [`SkinLifecycle`] listens to application lifecycle events and wires each
//! eligible screen into the skin system: view-inflation interception on
//! create, window re-theming, a lazy observer subscribed on resume, and
//! cleanup on destroy. It also tracks which screen is in the foreground so
//! observers can tell whether to refresh now or wait.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use reskin_types::ScreenId;

use crate::app::{Application, LifecycleCallbacks};
use crate::manager::SkinManager;
use crate::observer::LazySkinObserver;
use crate::registry::ScreenRegistry;
use crate::screen::{self, DelegateFactory, Screen, SkinDelegate};
use crate::window;

struct Foreground {
    id: ScreenId,
    screen: Weak<dyn Screen>,
}

pub struct SkinLifecycle {
    manager: Arc<SkinManager>,
    factory: Arc<dyn DelegateFactory>,
    delegates: ScreenRegistry<dyn SkinDelegate>,
    observers: ScreenRegistry<LazySkinObserver>,
    foreground: Mutex<Option<Foreground>>,
    this: Weak<SkinLifecycle>,
}

impl SkinLifecycle {
    /// Create the coordinator and hook it into `app`.
    ///
    /// The application context gets its inflation delegate and its observer
    /// right away, since it never passes through the screen lifecycle.
    pub fn install(
        app: &Application,
        manager: Arc<SkinManager>,
        factory: Arc<dyn DelegateFactory>,
    ) -> Arc<Self> {
        let lifecycle = Arc::new_cyclic(|this| Self {
            manager,
            factory,
            delegates: ScreenRegistry::new(),
            observers: ScreenRegistry::new(),
            foreground: Mutex::new(None),
            this: Weak::clone(this),
        });
        app.register_lifecycle_callbacks(Arc::<Self>::clone(&lifecycle));

        let context = app.context();
        lifecycle.install_layout_factory(context);
        lifecycle
            .manager
            .add_observer(lifecycle.observer(context));

        log::info!(
            "Skin lifecycle installed (app context {}, skin '{}')",
            context.id(),
            lifecycle.manager.current_skin_name()
        );
        lifecycle
    }

    pub fn manager(&self) -> &Arc<SkinManager> {
        &self.manager
    }

    /// Whether window re-theming and observation apply to `screen` under
    /// the current feature flags.
    pub fn is_skin_enabled(&self, screen: &dyn Screen) -> bool {
        screen::is_skin_enabled(&self.manager.features(), screen.capabilities())
    }

    /// The inflation delegate for `screen`, created on first use.
    pub fn skin_delegate(&self, screen: &Arc<dyn Screen>) -> Arc<dyn SkinDelegate> {
        self.delegates
            .get_or_insert_with(screen, || self.factory.create(&**screen))
    }

    /// The lazy observer for `screen`, created on first use.
    pub fn observer(&self, screen: &Arc<dyn Screen>) -> Arc<LazySkinObserver> {
        self.observers.get_or_insert_with(screen, || {
            Arc::new(LazySkinObserver::new(screen, Weak::clone(&self.this)))
        })
    }

    fn lock_foreground(&self) -> MutexGuard<'_, Option<Foreground>> {
        self.foreground
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Identity of the most recently resumed screen, or `None` if nothing
    /// has resumed yet or that screen has since been dropped.
    pub fn foreground_id(&self) -> Option<ScreenId> {
        self.lock_foreground()
            .as_ref()
            .filter(|fg| fg.screen.strong_count() > 0)
            .map(|fg| fg.id)
    }

    pub fn foreground(&self) -> Option<Arc<dyn Screen>> {
        self.lock_foreground()
            .as_ref()
            .and_then(|fg| fg.screen.upgrade())
    }

    /// Whether the screen `id` has a skin change waiting for its resume.
    pub fn is_pending(&self, id: ScreenId) -> bool {
        self.observers.get(id).is_some_and(|o| o.is_pending())
    }

    pub fn delegate_count(&self) -> usize {
        self.delegates.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Route view inflation on `screen` through its skin delegate. A screen
    /// that already carries an interceptor keeps it.
    fn install_layout_factory(&self, screen: &Arc<dyn Screen>) {
        let delegate = self.skin_delegate(screen);
        if let Err(e) = screen.install_inflater_factory(delegate) {
            log::info!("Keeping existing inflation interceptor: {e}");
        }
    }

    /// Status bar and window background from the active skin.
    pub(crate) fn apply_window_theme(&self, screen: &dyn Screen) {
        let features = self.manager.features();
        let resources = self.manager.resources();
        let status_bar = window::update_status_bar_color(screen, &features, &resources);
        let background = window::update_window_background(screen, &features, &resources);
        log::debug!(
            "Screen {} themed from '{}': status bar {:?}, background {:?}",
            screen.id(),
            resources.skin_name(),
            status_bar,
            background
        );
    }
}

impl LifecycleCallbacks for SkinLifecycle {
    fn on_screen_created(&self, screen: &Arc<dyn Screen>) {
        if !self.is_skin_enabled(&**screen) {
            return;
        }
        self.install_layout_factory(screen);
        self.apply_window_theme(&**screen);
        if screen.capabilities().self_applies {
            screen.apply_skin();
        }
    }

    fn on_screen_resumed(&self, screen: &Arc<dyn Screen>) {
        *self.lock_foreground() = Some(Foreground {
            id: screen.id(),
            screen: Arc::downgrade(screen),
        });
        if !self.is_skin_enabled(&**screen) {
            return;
        }
        let observer = self.observer(screen);
        self.manager
            .add_observer(Arc::<LazySkinObserver>::clone(&observer));
        observer.flush_if_pending();
    }

    fn on_screen_destroyed(&self, screen: &Arc<dyn Screen>) {
        if !self.is_skin_enabled(&**screen) {
            return;
        }
        let id = screen.id();
        if let Some(observer) = self.observers.remove(id) {
            self.manager.delete_observer(&*observer);
            log::trace!("Unsubscribed observer for screen {}", observer.screen_id());
        }
        self.delegates.remove(id);
        log::debug!("Screen {id} released from skinning");
    }
}

impl fmt::Debug for SkinLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinLifecycle")
            .field("skin", &self.manager.current_skin_name())
            .field("foreground", &self.foreground_id())
            .field("delegates", &self.delegate_count())
            .field("observers", &self.observer_count())
            .finish()
    }
}
