use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::backend::StorageBackend;

/// Typed persistence for a single preference, keyed by a fixed identifier.
///
/// The adapter owns the serialization format (JSON) and the failure policy:
/// `load` and `save` never fail their caller. Absent, corrupt, or
/// unavailable storage degrades to the configured default, observable only
/// through `tracing` events.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prefstore::{MemoryBackend, PreferenceStorage};
///
/// let backend = Arc::new(MemoryBackend::new());
/// let storage = PreferenceStorage::new(backend, "app.v1.expanded", true);
///
/// assert!(storage.load()); // nothing stored yet, default applies
/// storage.save(&false);
/// assert!(!storage.load());
/// ```
pub struct PreferenceStorage<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    default: T,
}

impl<T> PreferenceStorage<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Create an adapter over `backend` for the preference stored at `key`.
    ///
    /// `default` is returned by `load` whenever no usable value is stored.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>, default: T) -> Self {
        Self {
            backend,
            key: key.into(),
            default,
        }
    }

    /// The fixed storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value `load` falls back to.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Load the stored value, falling back to the default.
    ///
    /// Never raises: a missing entry, an unreadable backend, and a document
    /// that fails to parse all degrade to the default.
    pub fn load(&self) -> T {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(error) => {
                    warn!(key = %self.key, %error, "stored preference is malformed, using default");
                    self.default.clone()
                }
            },
            Ok(None) => self.default.clone(),
            Err(error) => {
                debug!(key = %self.key, %error, "preference storage unreadable, using default");
                self.default.clone()
            }
        }
    }

    /// Serialize and persist `value`.
    ///
    /// A silent no-op when the backend cannot be written; the in-memory
    /// store is still the source of truth for the running process.
    pub fn save(&self, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key = %self.key, %error, "preference could not be serialized");
                return;
            }
        };

        if let Err(error) = self.backend.write(&self.key, &raw) {
            debug!(key = %self.key, %error, "preference not persisted");
        }
    }
}

impl<T: Clone> Clone for PreferenceStorage<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            default: self.default.clone(),
        }
    }
}
