//! Skin change channel -- a minimal thread-safe observable/observer pair.
//!
//! The channel knows nothing about screens or skins: it keeps an ordered,
//! duplicate-free list of observers and fans a payload out to them.
//!
//! # Delivery contract
//!
//! 1. `notify` snapshots the observer list under the lock and releases the
//!    lock before delivering, so an observer may subscribe or unsubscribe
//!    (itself or others) from inside its callback without deadlocking.
//! 2. Delivery runs in reverse registration order: the most recently
//!    subscribed observer hears about a change first.
//! 3. Delivery is synchronous. A panicking observer unwinds into the caller
//!    of `notify`; later observers in the snapshot are not reached.
//! 4. Changes made during delivery take effect from the next `notify`.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reskin_types::error::{Result, SkinError};

/// Receiver of change notifications from a [`SkinObservable`].
pub trait SkinObserver<E>: Send + Sync {
    /// Called once per `notify` with the channel that fired and its payload.
    fn update_skin(&self, observable: &SkinObservable<E>, payload: Option<&E>);
}

/// Shared handle to an observer. Identity is the pointer, not the value.
pub type ObserverRef<E> = Arc<dyn SkinObserver<E>>;

/// Ordered, duplicate-free set of observers with snapshot fan-out.
pub struct SkinObservable<E> {
    observers: Mutex<Vec<ObserverRef<E>>>,
}

impl<E> SkinObservable<E> {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    // Observers never run under this lock, so poisoning can only come from
    // a panic inside a `Vec` operation; the list itself stays consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<ObserverRef<E>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `observer` unless it is already subscribed.
    ///
    /// Returns `true` if the observer was added.
    pub fn subscribe(&self, observer: ObserverRef<E>) -> bool {
        let mut observers = self.lock();
        if observers.iter().any(|o| same(o, &*observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Like [`subscribe`](Self::subscribe) for callers holding an optional
    /// handle. `None` is a caller bug and fails with [`SkinError::NullObserver`].
    pub fn try_subscribe(&self, observer: Option<ObserverRef<E>>) -> Result<bool> {
        let observer = observer.ok_or(SkinError::NullObserver)?;
        Ok(self.subscribe(observer))
    }

    /// Remove `observer` if present. Returns `true` if it was subscribed.
    pub fn unsubscribe(&self, observer: &dyn SkinObserver<E>) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|o| !same(o, observer));
        observers.len() != before
    }

    /// Whether `observer` is currently subscribed.
    pub fn contains(&self, observer: &dyn SkinObserver<E>) -> bool {
        self.lock().iter().any(|o| same(o, observer))
    }

    /// Deliver `payload` to every observer, most recently subscribed first.
    pub fn notify(&self, payload: Option<&E>) {
        let snapshot: Vec<ObserverRef<E>> = self.lock().clone();
        log::debug!("Notifying {} skin observer(s)", snapshot.len());
        for (i, observer) in snapshot.iter().enumerate().rev() {
            log::trace!("Delivering skin change to observer {i}");
            observer.update_skin(self, payload);
        }
    }

    /// Drop every subscription.
    pub fn unsubscribe_all(&self) {
        self.lock().clear();
    }

    /// Number of distinct subscribed observers.
    pub fn count(&self) -> usize {
        self.lock().len()
    }
}

impl<E> Default for SkinObservable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for SkinObservable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinObservable")
            .field("observer_count", &self.count())
            .finish()
    }
}

/// Pointer identity, ignoring vtable metadata.
fn same<E>(a: &ObserverRef<E>, b: &dyn SkinObserver<E>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), b)
}
