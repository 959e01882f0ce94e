//! Lazy per-screen skin observer.
//!
//! Each skinned screen gets one [`LazySkinObserver`]. On a skin change it
//! refreshes its screen right away when that screen is in the foreground
//! (or when there is no window to wait for), and otherwise only marks the
//! screen dirty. The pending refresh is flushed when the screen resumes.
//!
//! ```text
//!            deferred notify
//!   Clean ─────────────────────▶ Pending
//!     ▲ │                           │
//!     │ └── forced refresh ──┐      │ resume / forced refresh
//!     └──────────────────────┴──────┘
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use reskin_observe::SkinObserver;
use reskin_types::ScreenId;

use crate::lifecycle::SkinLifecycle;
use crate::manager::{SkinChange, SkinChannel};
use crate::screen::Screen;

/// Observer bound to exactly one screen for its whole life.
pub struct LazySkinObserver {
    screen: Weak<dyn Screen>,
    screen_id: ScreenId,
    screen_like: bool,
    pending: AtomicBool,
    lifecycle: Weak<SkinLifecycle>,
}

impl LazySkinObserver {
    pub(crate) fn new(screen: &Arc<dyn Screen>, lifecycle: Weak<SkinLifecycle>) -> Self {
        Self {
            screen: Arc::downgrade(screen),
            screen_id: screen.id(),
            screen_like: screen.kind().is_screen_like(),
            pending: AtomicBool::new(false),
            lifecycle,
        }
    }

    pub fn screen_id(&self) -> ScreenId {
        self.screen_id
    }

    /// Whether a skin change is waiting for this screen to resume.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// React to a skin change: refresh now or defer.
    pub fn on_notified(&self) {
        let Some(lifecycle) = self.lifecycle.upgrade() else {
            return;
        };
        let refresh_now = !self.screen_like
            || match lifecycle.foreground_id() {
                None => true,
                Some(fg) => fg == self.screen_id,
            };
        if refresh_now {
            log::debug!("Screen {}: refreshing skin now", self.screen_id);
            self.forced_refresh();
        } else {
            log::debug!("Screen {}: skin refresh deferred until resume", self.screen_id);
            self.pending.store(true, Ordering::SeqCst);
        }
    }

    /// Run the deferred refresh, if any.
    pub fn flush_if_pending(&self) {
        if self.is_pending() {
            self.forced_refresh();
        }
    }

    /// Re-apply the active skin to the bound screen immediately.
    ///
    /// No-op once the screen (or the coordinator) has been dropped.
    pub fn forced_refresh(&self) {
        let Some(screen) = self.screen.upgrade() else {
            return;
        };
        let Some(lifecycle) = self.lifecycle.upgrade() else {
            return;
        };
        log::trace!("Screen {}: forced skin refresh", self.screen_id);

        if self.screen_like && lifecycle.is_skin_enabled(&*screen) {
            lifecycle.apply_window_theme(&*screen);
        }
        lifecycle.skin_delegate(&screen).apply_skin();
        if screen.capabilities().self_applies {
            screen.apply_skin();
        }
        self.pending.store(false, Ordering::SeqCst);
    }
}

impl SkinObserver<SkinChange> for LazySkinObserver {
    fn update_skin(&self, observable: &SkinChannel, payload: Option<&SkinChange>) {
        if self.screen.strong_count() == 0 {
            // Screen vanished without a destroy event.
            observable.unsubscribe(self);
            return;
        }
        if let Some(change) = payload {
            log::trace!("Screen {} notified of {change:?}", self.screen_id);
        }
        self.on_notified();
    }
}

impl fmt::Debug for LazySkinObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySkinObserver")
            .field("screen_id", &self.screen_id)
            .field("screen_like", &self.screen_like)
            .field("pending", &self.is_pending())
            .finish()
    }
}
