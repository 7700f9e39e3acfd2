//! Key-value persistence backends.
//!
//! The web build writes to `window.localStorage`; native builds keep one JSON
//! file per key under the platform data directory. [`MemoryStore`] backs tests
//! and stands in when no persistent backend is reachable.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read stored value: {0}")]
    Read(String),
    #[error("failed to write stored value: {0}")]
    Write(String),
    #[error("stored value is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process map. Single-threaded by construction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. to simulate what a previous session left behind.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};

    /// `window.localStorage`, looked up on every call so a late-available
    /// storage object is still picked up.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserStore;

    impl BrowserStore {
        fn storage(&self) -> Result<web_sys::Storage, StorageError> {
            let window = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("window is unavailable".into()))?;
            window
                .local_storage()
                .map_err(|_| StorageError::Unavailable("local storage access denied".into()))?
                .ok_or_else(|| StorageError::Unavailable("local storage is unavailable".into()))
        }
    }

    impl KeyValueStore for BrowserStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage()?
                .get_item(key)
                .map_err(|err| StorageError::Read(format!("{err:?}")))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            // Quota errors surface here.
            self.storage()?
                .set_item(key, value)
                .map_err(|err| StorageError::Write(format!("{err:?}")))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.storage()?
                .remove_item(key)
                .map_err(|err| StorageError::Write(format!("{err:?}")))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{data_dir, FileStore};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{KeyValueStore, StorageError};

    /// Platform data directory for AgriPredAI, if one can be determined.
    pub fn data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "AgriPredAI", "AgriPredAI")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// One `<key>.json` file per key inside `root`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        root: PathBuf,
    }

    impl FileStore {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        fn path_for(&self, key: &str) -> PathBuf {
            let safe: String = key
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.root.join(format!("{safe}.json"))
        }
    }

    impl KeyValueStore for FileStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(raw) => Ok(Some(raw)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StorageError::Read(err.to_string())),
            }
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            fs::create_dir_all(&self.root).map_err(|err| StorageError::Write(err.to_string()))?;
            fs::write(self.path_for(key), value).map_err(|err| StorageError::Write(err.to_string()))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::Write(err.to_string())),
            }
        }
    }
}

/// Backend the running platform persists to.
#[cfg(target_arch = "wasm32")]
pub type PlatformStore = BrowserStore;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = FileStore;

#[cfg(target_arch = "wasm32")]
pub fn platform_store() -> PlatformStore {
    BrowserStore
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_store() -> PlatformStore {
    let root = data_dir().unwrap_or_else(|| std::path::PathBuf::from(".agripredai"));
    FileStore::new(root)
}
