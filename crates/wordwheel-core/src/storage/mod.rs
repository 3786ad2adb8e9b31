//! Key/value persistence.
//!
//! The game only ever needs to get, set and remove string values. Typed
//! values go through the JSON helpers on [`KeyValueStore`].

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod localstorage;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use localstorage::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store.
///
/// A missing key is `Ok(None)` from [`get`](KeyValueStore::get) and a no-op
/// for [`remove`](KeyValueStore::remove); errors are reserved for backend
/// failures.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Read and deserialize a JSON value.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Serialize and write a JSON value.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(format!("{}: {}", key, e)))?;
        self.set(key, &json)
    }
}

/// Storage backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

/// Storage backend for the current platform.
#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Open the default storage for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    FileStorage::default_location()
}

/// Open the default storage for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    LocalStorage::new()
}
