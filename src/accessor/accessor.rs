use std::sync::{Mutex, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{PreferenceStore, Subscription};

/// Lifecycle of one consuming context against the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No storage access yet; reads report the fixed fallback.
    Uninitialized,
    /// The one-time load from storage is in progress.
    Hydrating,
    /// Subscribed and tracking the store's live value.
    Live,
    /// Unsubscribed; the context has ended.
    TornDown,
}

/// A per-consumer view of a [`PreferenceStore`].
///
/// Rendering runtimes may execute a pass before durable storage exists (a
/// server-side or pre-hydration pass) and a later interactive pass that can
/// load persisted state. The first pass and the first interactive read must
/// agree, or the consumer observes a visible flicker. The accessor enforces
/// that: until [`attach`](Self::attach) runs, [`value`](Self::value)
/// returns the same fixed fallback on every call, no matter what the store
/// currently holds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prefstore::{MemoryBackend, Phase, PreferenceAccessor, PreferenceStorage, PreferenceStore};
///
/// let storage = PreferenceStorage::new(Arc::new(MemoryBackend::new()), "app.v1.expanded", true);
/// let store = PreferenceStore::new(storage);
///
/// let accessor = PreferenceAccessor::new(store.clone(), true);
/// assert_eq!(accessor.phase(), Phase::Uninitialized);
/// assert!(accessor.value()); // fixed fallback
///
/// accessor.attach(|| { /* schedule a re-render */ });
/// assert_eq!(accessor.phase(), Phase::Live);
///
/// store.set(false);
/// assert!(!accessor.value());
/// ```
pub struct PreferenceAccessor<T> {
    store: PreferenceStore<T>,
    fallback: T,
    phase: RwLock<Phase>,
    subscription: Mutex<Option<Subscription>>,
}

impl<T> PreferenceAccessor<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create an accessor in the `Uninitialized` phase.
    ///
    /// `fallback` is the deterministic pre-hydration value; it should match
    /// the store's configured default.
    pub fn new(store: PreferenceStore<T>, fallback: T) -> Self {
        Self {
            store,
            fallback,
            phase: RwLock::new(Phase::Uninitialized),
            subscription: Mutex::new(None),
        }
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> Phase {
        *self.phase.read().unwrap()
    }

    /// Read the value this consumer should render.
    ///
    /// `Live` reports the store's current value; every other phase reports
    /// the fixed fallback.
    pub fn value(&self) -> T {
        match self.phase() {
            Phase::Live => self.store.get(),
            _ => self.fallback.clone(),
        }
    }

    /// First interactive opportunity: hydrate once, then track live.
    ///
    /// Performs exactly one load from storage (applied to the store via its
    /// write path, so other consumers see it too), registers `on_change`
    /// for notifications, and enters `Live`. Calling `attach` on an already
    /// attached or torn-down accessor is a no-op.
    pub fn attach<F>(&self, on_change: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        {
            let mut phase = self.phase.write().unwrap();
            if *phase != Phase::Uninitialized {
                return;
            }
            *phase = Phase::Hydrating;
        }

        self.store.hydrate();

        let subscription = self.store.subscribe(on_change);
        *self.subscription.lock().unwrap() = Some(subscription);
        *self.phase.write().unwrap() = Phase::Live;
    }

    /// Tear the consumer down: unsubscribe and stop tracking.
    ///
    /// The subscription guard is released here (or on drop), so the
    /// observer set never leaks a departed consumer. Idempotent.
    pub fn detach(&self) {
        self.subscription.lock().unwrap().take();
        *self.phase.write().unwrap() = Phase::TornDown;
    }

    /// The store this accessor views.
    pub fn store(&self) -> &PreferenceStore<T> {
        &self.store
    }
}
