use std::sync::Arc;

use crate::accessor::{Phase, PreferenceAccessor};
use crate::storage::{PreferenceStorage, StorageBackend};
use crate::store::PreferenceStore;

/// Versioned storage key for the sidebar-expansion preference.
pub const SIDEBAR_KEY: &str = "prefstore.v1.sidebar_expanded";

/// The sidebar starts expanded when nothing is persisted.
pub const SIDEBAR_DEFAULT: bool = true;

/// Build the process-wide sidebar-expansion store over `backend`.
///
/// The composition root calls this once and hands clones to every
/// consumer; all of them share one authoritative value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prefstore::{sidebar_store, MemoryBackend};
///
/// let store = sidebar_store(Arc::new(MemoryBackend::new()));
/// assert!(store.get());
/// store.toggle();
/// assert!(!store.get());
/// ```
pub fn sidebar_store(backend: Arc<dyn StorageBackend>) -> PreferenceStore<bool> {
    PreferenceStore::new(PreferenceStorage::new(backend, SIDEBAR_KEY, SIDEBAR_DEFAULT))
}

/// One consumer's view of the sidebar preference.
///
/// Wraps a [`PreferenceAccessor`] with the surface a navigation component
/// wants: `is_expanded`, `toggle`, `expand`, `collapse`. Reads go through
/// the accessor (so pre-hydration renders report the fixed default); writes
/// go straight to the shared store.
pub struct SidebarView {
    accessor: PreferenceAccessor<bool>,
}

impl SidebarView {
    /// Create a view over a clone of the shared sidebar store.
    pub fn new(store: PreferenceStore<bool>) -> Self {
        Self {
            accessor: PreferenceAccessor::new(store, SIDEBAR_DEFAULT),
        }
    }

    /// Whether this consumer should render the sidebar expanded.
    pub fn is_expanded(&self) -> bool {
        self.accessor.value()
    }

    /// Invert the shared preference.
    pub fn toggle(&self) {
        self.accessor.store().toggle();
    }

    /// Expand the sidebar for every consumer.
    pub fn expand(&self) {
        self.accessor.store().set_true();
    }

    /// Collapse the sidebar for every consumer.
    pub fn collapse(&self) {
        self.accessor.store().set_false();
    }

    /// Hydrate once and start tracking; see [`PreferenceAccessor::attach`].
    pub fn attach<F>(&self, on_change: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.accessor.attach(on_change);
    }

    /// Stop tracking; see [`PreferenceAccessor::detach`].
    pub fn detach(&self) {
        self.accessor.detach();
    }

    /// The view's lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.accessor.phase()
    }
}
