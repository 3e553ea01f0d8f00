use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::storage::PreferenceStorage;

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Registered observers, keyed by registration id.
///
/// Kept separate from the value so subscription guards can hold a weak
/// reference without being generic over the value type.
#[derive(Default)]
struct ObserverRegistry {
    observers: RwLock<HashMap<usize, Observer>>,
    next_id: AtomicUsize,
}

impl ObserverRegistry {
    fn insert(&self, observer: Observer) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.observers.write().unwrap().insert(id, observer);
        id
    }

    fn remove(&self, id: usize) {
        self.observers.write().unwrap().remove(&id);
    }

    fn snapshot(&self) -> Vec<Observer> {
        self.observers.read().unwrap().values().cloned().collect()
    }
}

struct StoreInner<T> {
    value: RwLock<T>,
    registry: Arc<ObserverRegistry>,
    storage: PreferenceStorage<T>,
}

/// The authoritative holder of a single persisted preference value.
///
/// One store exists per preference per process; clones share state, so a
/// store can be handed to any number of consumers cheaply. Every write
/// persists through the storage adapter and then synchronously notifies all
/// registered observers before returning.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prefstore::{MemoryBackend, PreferenceStorage, PreferenceStore};
///
/// let storage = PreferenceStorage::new(Arc::new(MemoryBackend::new()), "app.v1.expanded", true);
/// let store = PreferenceStore::new(storage);
///
/// assert!(store.get());
/// store.set(false);
/// assert!(!store.get());
/// ```
pub struct PreferenceStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> PreferenceStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a store over `storage`, seeded with the storage default.
    ///
    /// The store does not read the backend on construction; persisted state
    /// enters through [`hydrate`](Self::hydrate) so that a context without
    /// storage still observes a deterministic initial value.
    pub fn new(storage: PreferenceStorage<T>) -> Self {
        let initial = storage.default_value().clone();
        Self {
            inner: Arc::new(StoreInner {
                value: RwLock::new(initial),
                registry: Arc::new(ObserverRegistry::default()),
                storage,
            }),
        }
    }

    /// Get the current value synchronously.
    pub fn get(&self) -> T {
        self.inner.value.read().unwrap().clone()
    }

    /// Set a new value: store, persist, then notify every observer.
    ///
    /// Writes equal to the current value still persist and notify; callers
    /// converge on final-state equality either way.
    pub fn set(&self, new_value: T) {
        *self.inner.value.write().unwrap() = new_value.clone();
        self.inner.storage.save(&new_value);
        self.notify();
    }

    /// Update the value in place, then persist and notify.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut value = self.inner.value.write().unwrap();
            f(&mut value);
            value.clone()
        };
        self.inner.storage.save(&snapshot);
        self.notify();
    }

    /// Apply the persisted value (or the default) through [`set`](Self::set).
    ///
    /// The one-time act of loading durable state into the running process.
    pub fn hydrate(&self) {
        self.set(self.inner.storage.load());
    }

    /// Register an observer for change notifications.
    ///
    /// The callback takes no arguments; observers re-query via
    /// [`get`](Self::get). Each call is an independent registration with its
    /// own guard, even for the same logical observer. Dropping the returned
    /// [`Subscription`] deregisters it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.registry.insert(Arc::new(callback));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner.registry),
        }
    }

    /// Notify all currently-registered observers.
    ///
    /// Fan-out runs on a snapshot taken up front, with no locks held, so a
    /// callback may re-read the store or register further observers. A
    /// panicking observer is isolated: the panic is logged and the
    /// remaining observers are still notified.
    fn notify(&self) {
        for observer in self.inner.registry.snapshot() {
            if catch_unwind(AssertUnwindSafe(|| observer())).is_err() {
                warn!("preference observer panicked during notification");
            }
        }
    }
}

impl PreferenceStore<bool> {
    /// Set the preference to `true`.
    pub fn set_true(&self) {
        self.set(true);
    }

    /// Set the preference to `false`.
    pub fn set_false(&self) {
        self.set(false);
    }

    /// Invert the current value.
    pub fn toggle(&self) {
        let current = self.get();
        self.set(!current);
    }
}

impl<T> Clone for PreferenceStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// RAII guard for a registered observer.
///
/// Dropping the guard deregisters the observer; it receives no further
/// notifications. Outliving the store is harmless: the guard only holds a
/// weak reference to the registry.
pub struct Subscription {
    id: usize,
    registry: Weak<ObserverRegistry>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
