//! Per-screen registries that never keep a screen alive.
//!
//! Entries are keyed by [`ScreenId`] and hold only a `Weak` handle to their
//! screen. Removal on screen destruction is the primary cleanup path; every
//! access also sweeps entries whose screen has been dropped, which covers
//! screens that vanished without a destroy event.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use reskin_types::ScreenId;

use crate::screen::Screen;

struct Entry<V: ?Sized> {
    screen: Weak<dyn Screen>,
    value: Arc<V>,
}

impl<V: ?Sized> Entry<V> {
    fn is_live(&self) -> bool {
        self.screen.strong_count() > 0
    }

    fn belongs_to(&self, screen: &Arc<dyn Screen>) -> bool {
        std::ptr::addr_eq(self.screen.as_ptr(), Arc::as_ptr(screen))
    }
}

/// Map from screen identity to exactly one value per live screen.
pub struct ScreenRegistry<V: ?Sized> {
    entries: Mutex<HashMap<ScreenId, Entry<V>>>,
}

impl<V: ?Sized> ScreenRegistry<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ScreenId, Entry<V>>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, e| e.is_live());
        let swept = before - entries.len();
        if swept > 0 {
            log::debug!("Swept {swept} registry entr(ies) for dropped screens");
        }
        entries
    }

    /// Value for `screen`, creating it with `make` on first use.
    ///
    /// `make` runs without the registry lock held. If two callers race, the
    /// first insert wins and both get the same value.
    pub fn get_or_insert_with(
        &self,
        screen: &Arc<dyn Screen>,
        make: impl FnOnce() -> Arc<V>,
    ) -> Arc<V> {
        let id = screen.id();
        if let Some(entry) = self.lock().get(&id)
            && entry.belongs_to(screen)
        {
            return Arc::clone(&entry.value);
        }

        let value = make();
        let mut entries = self.lock();
        match entries.get(&id) {
            Some(entry) if entry.belongs_to(screen) => Arc::clone(&entry.value),
            _ => {
                entries.insert(
                    id,
                    Entry {
                        screen: Arc::downgrade(screen),
                        value: Arc::clone(&value),
                    },
                );
                value
            },
        }
    }

    pub fn get(&self, id: ScreenId) -> Option<Arc<V>> {
        self.lock().get(&id).map(|e| Arc::clone(&e.value))
    }

    pub fn remove(&self, id: ScreenId) -> Option<Arc<V>> {
        self.lock().remove(&id).map(|e| e.value)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Number of entries for live screens.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: ?Sized> Default for ScreenRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for ScreenRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("len", &self.len())
            .finish()
    }
}
