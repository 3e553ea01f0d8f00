use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

/// Errors a storage backend may report.
///
/// None of these ever reach a consumer of the preference store: the
/// [`PreferenceStorage`](super::PreferenceStorage) adapter absorbs every
/// variant and falls back to its configured default.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No durable storage exists in this context.
    #[error("storage is unavailable in this context")]
    Unavailable,

    /// The underlying storage could not be read or written.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be serialized or parsed.
    #[error("stored value is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Raw keyed string storage.
///
/// A backend stores one serialized document per key. It knows nothing about
/// the value type; serialization lives in the adapter above it.
pub trait StorageBackend: Send + Sync {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the document for `key`, replacing any previous one.
    fn write(&self, key: &str, raw: &str) -> Result<(), StorageError>;
}

/// File-backed storage under a per-user configuration directory.
///
/// Each key maps to `<config_dir>/<app>/<key>.json`. Missing files read as
/// absent; writes create the directory on demand.
///
/// # Examples
///
/// ```no_run
/// use prefstore::FileBackend;
///
/// let backend = FileBackend::new("myapp");
/// ```
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at the platform config directory for `app`.
    pub fn new(app: &str) -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app);
        Self { dir }
    }

    /// Create a backend rooted at an explicit directory.
    ///
    /// Useful for tests and for applications that manage their own paths.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }
}

/// In-process storage backed by a map.
///
/// Durable only for the lifetime of the process. The default backend for
/// tests and for contexts without a real storage facility that still want
/// writes to round-trip.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

/// The "no storage in this context" backend.
///
/// Reads report absent and writes report [`StorageError::Unavailable`].
/// Models a render pass that runs before any durable storage exists.
#[derive(Default)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for NullBackend {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _raw: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
