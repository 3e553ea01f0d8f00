//! Durable persistence for preference values.
//!
//! This module provides the storage layer the preference store writes
//! through:
//! - Backends: raw keyed string storage (file-based, in-memory, or absent)
//! - `PreferenceStorage`: a typed adapter that never fails its caller

mod adapter;
mod backend;

pub use adapter::PreferenceStorage;
pub use backend::{FileBackend, MemoryBackend, NullBackend, StorageBackend, StorageError};
