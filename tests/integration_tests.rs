//! Integration tests for Prefstore

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use prefstore::{
    sidebar_store, FileBackend, MemoryBackend, NullBackend, Phase, PreferenceAccessor,
    PreferenceStorage, PreferenceStore, SidebarView, StorageBackend, SIDEBAR_KEY,
};

fn memory_store() -> PreferenceStore<bool> {
    sidebar_store(Arc::new(MemoryBackend::new()))
}

#[test]
fn store_integration() {
    let store = memory_store();

    // Default until something is written
    assert!(store.get());

    // Last write wins, synchronously
    store.set(false);
    assert!(!store.get());
    store.set(true);
    store.set(false);
    assert!(!store.get());

    // Boolean conveniences
    store.set_true();
    assert!(store.get());
    store.toggle();
    assert!(!store.get());
    store.toggle();
    assert!(store.get());
}

#[test]
fn subscription_integration() {
    let store = memory_store();
    let notified = Arc::new(AtomicUsize::new(0));

    let guard = store.subscribe({
        let notified = notified.clone();
        move || {
            notified.fetch_add(1, Ordering::SeqCst);
        }
    });

    assert_eq!(notified.load(Ordering::SeqCst), 0);

    store.set(false);
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    store.toggle();
    assert_eq!(notified.load(Ordering::SeqCst), 2);

    drop(guard);
    store.set(true);
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[test]
fn persistence_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::at(dir.path()));

    let store = sidebar_store(Arc::clone(&backend));
    store.set(false);

    // Same directory, fresh process state
    let reloaded = sidebar_store(Arc::clone(&backend));
    assert!(reloaded.get());
    reloaded.hydrate();
    assert!(!reloaded.get());

    // The document lands under the adapter's fixed key.
    let storage = PreferenceStorage::new(backend, SIDEBAR_KEY, true);
    assert!(dir.path().join(format!("{}.json", storage.key())).exists());
    assert!(!storage.load());
}

#[test]
fn corrupt_file_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{SIDEBAR_KEY}.json")), "{{nope").unwrap();

    let store = sidebar_store(Arc::new(FileBackend::at(dir.path())));
    store.hydrate();
    assert!(store.get());
}

#[test]
fn missing_storage_never_raises() {
    let store = sidebar_store(Arc::new(NullBackend::new()));

    // Writes are not durable but still update the shared value.
    store.set(false);
    assert!(!store.get());

    // Hydration degrades to the default.
    store.hydrate();
    assert!(store.get());
}

#[test]
fn accessor_render_parity() {
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    PreferenceStorage::new(Arc::clone(&backend), SIDEBAR_KEY, true).save(&false);

    let store = sidebar_store(backend);
    let accessor = PreferenceAccessor::new(store.clone(), true);

    // Pre-hydration reads are deterministic even while the store moves.
    assert!(accessor.value());
    store.set(false);
    assert!(accessor.value());
    store.set(true);
    assert!(accessor.value());

    // First interactive opportunity: persisted `false` wins.
    accessor.attach(|| {});
    assert_eq!(accessor.phase(), Phase::Live);
    assert!(!accessor.value());
}

#[test]
fn two_sidebar_views_stay_consistent() {
    let store = memory_store();
    let nav = SidebarView::new(store.clone());
    let breadcrumb = SidebarView::new(store);

    let nav_renders = Arc::new(AtomicUsize::new(0));
    let breadcrumb_renders = Arc::new(AtomicUsize::new(0));

    nav.attach({
        let renders = nav_renders.clone();
        move || {
            renders.fetch_add(1, Ordering::SeqCst);
        }
    });
    breadcrumb.attach({
        let renders = breadcrumb_renders.clone();
        move || {
            renders.fetch_add(1, Ordering::SeqCst);
        }
    });

    nav.toggle();

    assert!(!nav.is_expanded());
    assert!(!breadcrumb.is_expanded());
    assert_eq!(nav_renders.load(Ordering::SeqCst), 1);
    assert_eq!(breadcrumb_renders.load(Ordering::SeqCst), 1);

    // A departed consumer stops being notified; the survivor still tracks.
    breadcrumb.detach();
    nav.expand();

    assert!(nav.is_expanded());
    assert_eq!(nav_renders.load(Ordering::SeqCst), 2);
    assert_eq!(breadcrumb_renders.load(Ordering::SeqCst), 1);
}

#[test]
fn hydration_happens_exactly_once_per_consumer() {
    struct CountingBackend {
        inner: MemoryBackend,
        reads: AtomicUsize,
    }

    impl StorageBackend for CountingBackend {
        fn read(&self, key: &str) -> Result<Option<String>, prefstore::StorageError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read(key)
        }

        fn write(&self, key: &str, raw: &str) -> Result<(), prefstore::StorageError> {
            self.inner.write(key, raw)
        }
    }

    let backend = Arc::new(CountingBackend {
        inner: MemoryBackend::new(),
        reads: AtomicUsize::new(0),
    });

    let store = sidebar_store(backend.clone());
    let view = SidebarView::new(store);

    view.attach(|| {});
    view.attach(|| {}); // no-op
    view.is_expanded();
    view.toggle();

    assert_eq!(backend.reads.load(Ordering::SeqCst), 1);
}
