//! Application-wide source of screen lifecycle events.
//!
//! The host app calls [`Application::dispatch`] as its screens move through
//! their lifecycle; every registered [`LifecycleCallbacks`] sees each event
//! in registration order.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::screen::Screen;

/// A point in a screen's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    SaveState,
    Destroyed,
}

/// Hooks invoked for every screen lifecycle event. All default to no-ops.
pub trait LifecycleCallbacks: Send + Sync {
    fn on_screen_created(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_started(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_resumed(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_paused(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_stopped(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_save_state(&self, _screen: &Arc<dyn Screen>) {}

    fn on_screen_destroyed(&self, _screen: &Arc<dyn Screen>) {}
}

/// The application: owns its context and the lifecycle callback list.
pub struct Application {
    context: Arc<dyn Screen>,
    callbacks: Mutex<Vec<Arc<dyn LifecycleCallbacks>>>,
}

impl Application {
    /// `context` is the application-level context; its kind is normally
    /// [`ScreenKind::Application`](crate::screen::ScreenKind::Application).
    pub fn new(context: Arc<dyn Screen>) -> Self {
        Self {
            context,
            callbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn context(&self) -> &Arc<dyn Screen> {
        &self.context
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn LifecycleCallbacks>>> {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_lifecycle_callbacks(&self, callbacks: Arc<dyn LifecycleCallbacks>) {
        self.lock().push(callbacks);
    }

    pub fn unregister_lifecycle_callbacks(&self, callbacks: &dyn LifecycleCallbacks) {
        self.lock()
            .retain(|c| !std::ptr::addr_eq(Arc::as_ptr(c), callbacks));
    }

    pub fn callback_count(&self) -> usize {
        self.lock().len()
    }

    /// Forward `event` for `screen` to every registered callback.
    pub fn dispatch(&self, event: LifecycleEvent, screen: &Arc<dyn Screen>) {
        let snapshot: Vec<_> = self.lock().clone();
        log::trace!("{event:?} for screen {}", screen.id());
        for cb in snapshot {
            match event {
                LifecycleEvent::Created => cb.on_screen_created(screen),
                LifecycleEvent::Started => cb.on_screen_started(screen),
                LifecycleEvent::Resumed => cb.on_screen_resumed(screen),
                LifecycleEvent::Paused => cb.on_screen_paused(screen),
                LifecycleEvent::Stopped => cb.on_screen_stopped(screen),
                LifecycleEvent::SaveState => cb.on_screen_save_state(screen),
                LifecycleEvent::Destroyed => cb.on_screen_destroyed(screen),
            }
        }
    }

    /// Created, started, resumed.
    pub fn open(&self, screen: &Arc<dyn Screen>) {
        for event in [
            LifecycleEvent::Created,
            LifecycleEvent::Started,
            LifecycleEvent::Resumed,
        ] {
            self.dispatch(event, screen);
        }
    }

    /// Paused, stopped, destroyed.
    pub fn close(&self, screen: &Arc<dyn Screen>) {
        for event in [
            LifecycleEvent::Paused,
            LifecycleEvent::Stopped,
            LifecycleEvent::Destroyed,
        ] {
            self.dispatch(event, screen);
        }
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("context", &self.context.id())
            .field("callbacks", &self.callback_count())
            .finish()
    }
}
