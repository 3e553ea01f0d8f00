//! # Prefstore
//!
//! A persistent shared preference store for Rust UIs.
//!
//! Prefstore keeps one authoritative in-memory value per preference and
//! fans every write out to all registered observers synchronously:
//!
//! ## Storage (durable persistence)
//!
//! Pluggable backends behind a typed adapter that never fails its caller:
//! - `FileBackend` - JSON documents under the per-user config directory
//! - `MemoryBackend` - in-process map for tests and ephemeral contexts
//! - `NullBackend` - models a context with no durable storage at all
//!
//! ## Store (shared state + subscriptions)
//!
//! - `PreferenceStore<T>` - the single source of truth, cheap to clone
//! - `Subscription` - RAII deregistration for observers
//! - Writes persist, then notify every observer before returning
//!
//! ## Accessor (per-consumer lifecycle)
//!
//! - `PreferenceAccessor<T>` - deterministic default before hydration,
//!   exactly one load when the context turns interactive, live tracking
//!   afterwards, clean teardown
//! - `SidebarView` - the concrete navigation-panel preference

pub mod accessor;
pub mod sidebar;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use accessor::{Phase, PreferenceAccessor};
pub use sidebar::{sidebar_store, SidebarView, SIDEBAR_DEFAULT, SIDEBAR_KEY};
pub use storage::{
    FileBackend, MemoryBackend, NullBackend, PreferenceStorage, StorageBackend, StorageError,
};
pub use store::{PreferenceStore, Subscription};
